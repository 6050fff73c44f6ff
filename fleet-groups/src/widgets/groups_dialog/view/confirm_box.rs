use iced::widget::{
    Space, button, center, column, container, mouse_area, opaque, row, text,
};
use iced::{Element, Length, alignment};

use crate::i18n::Messages;
use crate::style::{action_button_style, backdrop_style, panel_style};
use super::super::event::{
    ConfirmResponse, GroupsDialogIntent,
};

const BOX_WIDTH: f32 = 320.0;
const BOX_PADDING: f32 = 16.0;
const BUTTON_HEIGHT: f32 = 26.0;
const BUTTON_PADDING_X: f32 = 14.0;

/// Props for the removal confirmation box.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConfirmBoxProps<'a> {
    pub(crate) messages: &'a Messages,
}

/// Render the Yes/No removal prompt above a blocking backdrop.
pub(crate) fn view(
    props: ConfirmBoxProps<'_>,
) -> Element<'_, GroupsDialogIntent> {
    let messages = props.messages;

    let answer = |label: &str, response: ConfirmResponse| {
        button(text(label.to_string()).size(13.0))
            .on_press(GroupsDialogIntent::ConfirmResponded(response))
            .padding([0.0, BUTTON_PADDING_X])
            .height(Length::Fixed(BUTTON_HEIGHT))
            .style(|_, status| action_button_style(status))
    };

    let content = column![
        text(messages.confirm.as_str()).size(15.0),
        text(messages.confirm_group_removal.as_str()).size(13.0),
        row![
            Space::new().width(Length::Fill),
            answer(&messages.yes, ConfirmResponse::Yes),
            answer(&messages.no, ConfirmResponse::No),
        ]
        .spacing(8.0)
        .align_y(alignment::Vertical::Center),
    ]
    .spacing(12.0);

    let panel = container(content)
        .width(Length::Fixed(BOX_WIDTH))
        .padding(BOX_PADDING)
        .style(panel_style);

    let backdrop = mouse_area(
        container(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(backdrop_style),
    )
    .on_press(GroupsDialogIntent::ConfirmResponded(
        ConfirmResponse::Dismissed,
    ));

    opaque(iced::widget::stack![backdrop, center(opaque(panel))]).into()
}

use iced::widget::{
    Space, Stack, button, center, column, container, mouse_area, opaque, row,
    text,
};
use iced::{Element, Length, alignment};

use super::confirm_box::{self, ConfirmBoxProps};
use super::group_tree::{self, DESCRIPTION_WIDTH, GroupTreeProps};
use crate::i18n::Messages;
use crate::style::{
    action_button_style, backdrop_style, header_style, panel_style,
};
use super::super::event::GroupsDialogIntent;
use super::super::state::GroupsDialogState;

const DIALOG_WIDTH: f32 = 620.0;
const DIALOG_HEIGHT: f32 = 440.0;
const DIALOG_PADDING: f32 = 12.0;
const TITLE_FONT_SIZE: f32 = 15.0;
const HEADER_FONT_SIZE: f32 = 12.0;
const HEADER_HEIGHT: f32 = 24.0;
const BUTTON_FONT_SIZE: f32 = 13.0;
const BUTTON_HEIGHT: f32 = 26.0;
const BUTTON_PADDING_X: f32 = 12.0;
const BUTTON_SPACING: f32 = 8.0;

/// Props for the groups dialog window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DialogProps<'a> {
    pub(crate) state: &'a GroupsDialogState,
    pub(crate) messages: &'a Messages,
}

/// Render the modal groups window, plus the removal prompt when open.
pub(crate) fn view(props: DialogProps<'_>) -> Element<'_, GroupsDialogIntent> {
    let state = props.state;
    let messages = props.messages;
    let actions = state.actions();

    let toolbar = row![
        action_button(&messages.add, Some(GroupsDialogIntent::AddPressed)),
        action_button(
            &messages.remove,
            actions.remove.then_some(GroupsDialogIntent::RemovePressed),
        ),
        action_button(
            &messages.share,
            actions.share.then_some(GroupsDialogIntent::SharePressed),
        ),
    ]
    .spacing(BUTTON_SPACING);

    let columns = container(
        row![
            text(messages.name.as_str())
                .size(HEADER_FONT_SIZE)
                .width(Length::Fill),
            text(messages.description.as_str())
                .size(HEADER_FONT_SIZE)
                .width(Length::Fixed(DESCRIPTION_WIDTH)),
        ]
        .align_y(alignment::Vertical::Center),
    )
    .padding([0.0, DIALOG_PADDING])
    .height(Length::Fixed(HEADER_HEIGHT))
    .align_y(alignment::Vertical::Center)
    .style(header_style);

    let footer = row![
        Space::new().width(Length::Fill),
        action_button(&messages.save, Some(GroupsDialogIntent::SavePressed)),
        action_button(
            &messages.cancel,
            Some(GroupsDialogIntent::CancelPressed),
        ),
    ]
    .spacing(BUTTON_SPACING);

    let body = column![
        text(messages.groups.as_str()).size(TITLE_FONT_SIZE),
        toolbar,
        columns,
        group_tree::view(GroupTreeProps { state }),
        footer,
    ]
    .spacing(DIALOG_PADDING);

    let panel = container(body)
        .width(Length::Fixed(DIALOG_WIDTH))
        .height(Length::Fixed(DIALOG_HEIGHT))
        .padding(DIALOG_PADDING)
        .style(panel_style);

    // Runs after any row or tree release, so a drop has already landed.
    let panel =
        mouse_area(panel).on_release(GroupsDialogIntent::DragCanceled);

    let backdrop = mouse_area(
        container(Space::new())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(backdrop_style),
    )
    .on_release(GroupsDialogIntent::DragCanceled);

    let mut layers: Vec<Element<'_, GroupsDialogIntent>> =
        vec![backdrop.into(), center(opaque(panel)).into()];
    if state.confirm().is_some() {
        layers.push(confirm_box::view(ConfirmBoxProps { messages }));
    }

    opaque(Stack::with_children(layers)).into()
}

fn action_button(
    label: &str,
    on_press: Option<GroupsDialogIntent>,
) -> Element<'static, GroupsDialogIntent> {
    button(text(label.to_string()).size(BUTTON_FONT_SIZE))
        .on_press_maybe(on_press)
        .padding([0.0, BUTTON_PADDING_X])
        .height(Length::Fixed(BUTTON_HEIGHT))
        .style(|_, status| action_button_style(status))
        .into()
}

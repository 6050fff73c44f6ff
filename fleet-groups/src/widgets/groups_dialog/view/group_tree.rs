use fleet_ui_tree::{TreeRowContext, TreeSource, TreeView};
use iced::widget::{
    Space, container, mouse_area, row, scrollable, text, text_input,
};
use iced::{Element, Length, alignment, mouse};

use crate::style::{PALETTE, thin_scroll_style, tree_row_style};
use super::super::event::GroupsDialogIntent;
use super::super::model::{Group, GroupField, GroupId};
use super::super::state::{DropTarget, GroupsDialogState};

pub(crate) const TREE_ROW_HEIGHT: f32 = 26.0;
pub(crate) const DESCRIPTION_WIDTH: f32 = 240.0;
const TREE_FONT_SIZE: f32 = 13.0;
const TREE_INDENT: f32 = 16.0;
const TOGGLE_WIDTH: f32 = 16.0;
const CELL_PADDING_X: f32 = 6.0;
const MODIFIED_MARK_SIZE: f32 = 6.0;

/// Props for the two-column group tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct GroupTreeProps<'a> {
    pub(crate) state: &'a GroupsDialogState,
}

impl TreeSource for GroupsDialogState {
    type Key = GroupId;
    type Node = Group;

    fn roots(&self) -> Vec<GroupId> {
        self.store().roots()
    }

    fn children(&self, key: &GroupId) -> Vec<GroupId> {
        self.store().children(*key)
    }

    fn node(&self, key: &GroupId) -> Option<&Group> {
        self.store().get(*key)
    }

    fn is_expanded(&self, key: &GroupId) -> bool {
        GroupsDialogState::is_expanded(self, *key)
    }
}

/// Render the group tree with inline cell editors.
pub(crate) fn view(
    props: GroupTreeProps<'_>,
) -> Element<'_, GroupsDialogIntent> {
    let state = props.state;
    let drop_target = state.drop_target();

    let tree = TreeView::new(state, move |context| render_row(state, context))
        .selected(state.selected())
        .hovered(state.hovered())
        .on_toggle(|id| GroupsDialogIntent::ToggleExpanded { id })
        .toggle_content(|context| {
            let glyph = if context.entry.is_expanded { "▾" } else { "▸" };
            text(glyph).size(TREE_FONT_SIZE).into()
        })
        .row_style(move |context| {
            tree_row_style(
                context.is_selected,
                context.is_hovered,
                drop_target == Some(DropTarget::Group(context.entry.key)),
            )
        })
        .indent_width(TREE_INDENT)
        .toggle_width(TOGGLE_WIDTH)
        .view();

    let content = container(tree).width(Length::Fill);
    let scroll = scrollable(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(thin_scroll_style);

    let root_drop = drop_target == Some(DropTarget::Root);
    let area = container(scroll)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| iced::widget::container::Style {
            border: iced::Border {
                width: if root_drop { 1.0 } else { 0.0 },
                color: PALETTE.accent,
                ..Default::default()
            },
            ..Default::default()
        });

    mouse_area(area)
        .on_press(GroupsDialogIntent::BackgroundPressed)
        .on_release(GroupsDialogIntent::BackgroundReleased)
        .on_move(|position| GroupsDialogIntent::CursorMoved { position })
        .on_exit(GroupsDialogIntent::NodeHovered { id: None })
        .into()
}

fn render_row<'a>(
    state: &'a GroupsDialogState,
    context: &TreeRowContext<'a, GroupsDialogState>,
) -> Element<'a, GroupsDialogIntent> {
    let id = context.entry.key;
    row![
        render_cell(state, id, GroupField::Name, Length::Fill),
        render_cell(
            state,
            id,
            GroupField::Description,
            Length::Fixed(DESCRIPTION_WIDTH),
        ),
    ]
    .width(Length::Fill)
    .height(Length::Fixed(TREE_ROW_HEIGHT))
    .into()
}

fn render_cell<'a>(
    state: &'a GroupsDialogState,
    id: GroupId,
    field: GroupField,
    width: Length,
) -> Element<'a, GroupsDialogIntent> {
    if let Some(editor) = state.editor().filter(|e| e.is_editing(id, field)) {
        let input = text_input("", &editor.value)
            .on_input(GroupsDialogIntent::CellEditChanged)
            .on_submit(GroupsDialogIntent::CellEditSubmitted)
            .size(TREE_FONT_SIZE)
            .padding([2.0, CELL_PADDING_X])
            .id(editor.id.clone());
        return container(input)
            .width(width)
            .height(Length::Fill)
            .align_y(alignment::Vertical::Center)
            .into();
    }

    let value = state.store().value(id, field).unwrap_or_default();
    let modified = state.store().is_modified(id, field);

    let mark: Element<'a, GroupsDialogIntent> = if modified {
        container(
            Space::new()
                .width(Length::Fixed(MODIFIED_MARK_SIZE))
                .height(Length::Fixed(MODIFIED_MARK_SIZE)),
        )
        .style(|_| iced::widget::container::Style {
            background: Some(PALETTE.modified.into()),
            ..Default::default()
        })
        .into()
    } else {
        Space::new()
            .width(Length::Fixed(MODIFIED_MARK_SIZE))
            .into()
    };

    let label = container(
        row![mark, text(value).size(TREE_FONT_SIZE)]
            .spacing(4.0)
            .align_y(alignment::Vertical::Center),
    )
    .width(width)
    .height(Length::Fill)
    .padding([0.0, CELL_PADDING_X])
    .align_y(alignment::Vertical::Center);

    mouse_area(label)
        .on_press(GroupsDialogIntent::NodePressed { id })
        .on_release(GroupsDialogIntent::NodeReleased { id })
        .on_enter(GroupsDialogIntent::NodeHovered { id: Some(id) })
        .on_double_click(GroupsDialogIntent::CellEditStarted { id, field })
        .interaction(mouse::Interaction::Pointer)
        .into()
}

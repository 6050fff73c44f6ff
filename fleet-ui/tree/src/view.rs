use iced::alignment;
use iced::widget::{Column, Row, Space, container, mouse_area};
use iced::{Element, Length, mouse};

use crate::model::{FlattenedNode, TreeSource, flatten_tree};

/// Flattened tree row used by [`TreeView`] render callbacks.
pub type TreeRow<'a, S> = FlattenedNode<'a, S>;

/// Rendering context passed to row callbacks.
pub struct TreeRowContext<'a, S: TreeSource> {
    pub entry: TreeRow<'a, S>,
    pub is_selected: bool,
    pub is_hovered: bool,
}

type RowRenderer<'a, S, Message> =
    dyn Fn(&TreeRowContext<'a, S>) -> Element<'a, Message> + 'a;
type RowStyle<'a, S> = dyn Fn(&TreeRowContext<'a, S>) -> container::Style + 'a;
type ToggleContent<'a, S, Message> =
    dyn Fn(&TreeRowContext<'a, S>) -> Element<'a, Message> + 'a;
type KeyAction<'a, K, Message> = dyn Fn(K) -> Message + 'a;

/// Lightweight tree view helper that lays out indented rows.
///
/// Row content and its interaction are produced by the `render_row`
/// callback; the view owns indentation, the expand toggle slot and row
/// styling.
pub struct TreeView<'a, S: TreeSource, Message: Clone + 'a> {
    source: &'a S,
    selected: Option<S::Key>,
    hovered: Option<S::Key>,
    on_toggle: Option<Box<KeyAction<'a, S::Key, Message>>>,
    render_row: Box<RowRenderer<'a, S, Message>>,
    row_style: Option<Box<RowStyle<'a, S>>>,
    toggle_content: Option<Box<ToggleContent<'a, S, Message>>>,
    spacing: f32,
    indent_width: f32,
    toggle_width: f32,
}

impl<'a, S, Message> TreeView<'a, S, Message>
where
    S: TreeSource + 'a,
    Message: Clone + 'a,
{
    /// Create a tree view that renders each row using `render_row`.
    pub fn new(
        source: &'a S,
        render_row: impl Fn(&TreeRowContext<'a, S>) -> Element<'a, Message> + 'a,
    ) -> Self {
        Self {
            source,
            selected: None,
            hovered: None,
            on_toggle: None,
            render_row: Box::new(render_row),
            row_style: None,
            toggle_content: None,
            spacing: 0.0,
            indent_width: 0.0,
            toggle_width: 0.0,
        }
    }

    /// Provide the currently selected key to inform row rendering.
    pub fn selected(mut self, key: Option<S::Key>) -> Self {
        self.selected = key;
        self
    }

    /// Provide the currently hovered key to inform row rendering.
    pub fn hovered(mut self, key: Option<S::Key>) -> Self {
        self.hovered = key;
        self
    }

    /// Emit a message when the toggle of a row with children is pressed.
    pub fn on_toggle(
        mut self,
        on_toggle: impl Fn(S::Key) -> Message + 'a,
    ) -> Self {
        self.on_toggle = Some(Box::new(on_toggle));
        self
    }

    /// Provide a row style callback for background/text styling.
    pub fn row_style(
        mut self,
        row_style: impl Fn(&TreeRowContext<'a, S>) -> container::Style + 'a,
    ) -> Self {
        self.row_style = Some(Box::new(row_style));
        self
    }

    /// Provide content to render inside the toggle area.
    pub fn toggle_content(
        mut self,
        toggle_content: impl Fn(&TreeRowContext<'a, S>) -> Element<'a, Message> + 'a,
    ) -> Self {
        self.toggle_content = Some(Box::new(toggle_content));
        self
    }

    /// Set indentation width per tree depth level.
    pub fn indent_width(mut self, width: f32) -> Self {
        self.indent_width = width.max(0.0);
        self
    }

    /// Set the width reserved for the toggle area.
    pub fn toggle_width(mut self, width: f32) -> Self {
        self.toggle_width = width.max(0.0);
        self
    }

    /// Vertical spacing between rows.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Build the `Element` for the tree view.
    pub fn view(self) -> Element<'a, Message> {
        let mut column = Column::new().spacing(self.spacing);

        for entry in flatten_tree(self.source) {
            let is_selected = self.selected.as_ref() == Some(&entry.key);
            let is_hovered = self.hovered.as_ref() == Some(&entry.key);
            let context = TreeRowContext {
                entry,
                is_selected,
                is_hovered,
            };

            let mut row = Row::new().spacing(0.0);

            let indent = context.entry.depth as f32 * self.indent_width;
            if indent > 0.0 {
                row = row.push(Space::new().width(Length::Fixed(indent)));
            }

            if self.toggle_width > 0.0 || self.toggle_content.is_some() {
                row = row.push(build_toggle_slot(&context, &self));
            }

            row = row.push((self.render_row)(&context));

            let mut row_element: Element<'a, Message> = row.into();

            if let Some(ref row_style) = self.row_style {
                let style = row_style(&context);
                row_element =
                    container(row_element).style(move |_| style).into();
            }

            column = column.push(row_element);
        }

        column.into()
    }
}

fn build_toggle_slot<'a, S, Message>(
    context: &TreeRowContext<'a, S>,
    view: &TreeView<'a, S, Message>,
) -> Element<'a, Message>
where
    S: TreeSource + 'a,
    Message: Clone + 'a,
{
    let content = match view.toggle_content.as_ref() {
        Some(toggle) if context.entry.has_children => toggle(context),
        _ => Space::new().into(),
    };

    let content: Element<'a, Message> = container(content)
        .width(Length::Fixed(view.toggle_width))
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into();

    if !context.entry.has_children {
        return content;
    }

    match view.on_toggle.as_ref() {
        Some(on_toggle) => mouse_area(content)
            .on_press(on_toggle(context.entry.key.clone()))
            .interaction(mouse::Interaction::Pointer)
            .into(),
        None => content,
    }
}

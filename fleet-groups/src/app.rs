use std::path::PathBuf;

use fleet_groups::config::AppConfig;
use fleet_groups::host::GroupsHost;
use fleet_groups::storage::{GroupsFile, load_initial_groups, save_groups};
use fleet_groups::style::{action_button_style, thin_scroll_style};
use fleet_groups::widgets::groups_dialog::{
    Group, GroupId, GroupStore, GroupsDialogCtx, GroupsDialogEvent,
};
use fleet_ui_tree::{TreeSource, flatten_tree};
use iced::keyboard::{self, Key, key::Named};
use iced::widget::{
    Space, button, column, container, row, scrollable, stack, text,
};
use iced::{Element, Length, Subscription, Task, Theme};

pub(crate) const MIN_WINDOW_WIDTH: f32 = 720.0;
pub(crate) const MIN_WINDOW_HEIGHT: f32 = 520.0;

const LIST_INDENT: f32 = 16.0;
const LIST_FONT_SIZE: f32 = 13.0;
const CONTENT_PADDING: f32 = 16.0;

/// App-wide events that drive the root update loop.
#[derive(Debug, Clone)]
pub(crate) enum AppEvent {
    OpenGroups,
    Groups(GroupsDialogEvent),
    Keyboard(keyboard::Event),
    PersistCompleted(usize),
    PersistFailed(String),
}

/// Root application state.
pub(crate) struct App {
    config: AppConfig,
    data_path: PathBuf,
    host: GroupsHost,
}

impl App {
    /// Load config and persisted groups, then start with the dialog closed.
    pub(crate) fn new() -> (Self, Task<AppEvent>) {
        let config = AppConfig::load_or_default();
        let data_path = config.data_path();
        let store = load_initial_groups(&data_path);
        log::info!(
            "loaded {} groups from {}",
            store.len(),
            data_path.display()
        );

        let app = Self {
            config,
            data_path,
            host: GroupsHost::new(store),
        };
        (app, Task::none())
    }

    pub(crate) fn title(&self) -> String {
        self.config.messages.groups.clone()
    }

    pub(crate) fn theme(&self) -> Theme {
        Theme::Dark
    }

    pub(crate) fn subscription(&self) -> Subscription<AppEvent> {
        keyboard::listen().map(AppEvent::Keyboard)
    }

    pub(crate) fn update(&mut self, event: AppEvent) -> Task<AppEvent> {
        match event {
            AppEvent::OpenGroups => {
                self.host.dialog_mut().show();
                Task::none()
            },
            AppEvent::Groups(GroupsDialogEvent::Intent(intent)) => {
                let ctx = GroupsDialogCtx {
                    messages: &self.config.messages,
                };
                self.host
                    .dialog_mut()
                    .reduce(intent, &ctx)
                    .map(AppEvent::Groups)
            },
            AppEvent::Groups(GroupsDialogEvent::Effect(effect)) => {
                self.host.handle(&effect);
                match self.host.take_pending_write() {
                    Some(file) => {
                        request_persist_groups(self.data_path.clone(), file)
                    },
                    None => Task::none(),
                }
            },
            AppEvent::Keyboard(event) => self.handle_keyboard(event),
            AppEvent::PersistCompleted(count) => {
                log::info!(
                    "persisted {count} groups to {}",
                    self.data_path.display()
                );
                Task::none()
            },
            AppEvent::PersistFailed(message) => {
                log::warn!("failed to persist groups: {message}");
                Task::none()
            },
        }
    }

    pub(crate) fn view(&self) -> Element<'_, AppEvent> {
        let messages = &self.config.messages;
        let dialog = self.host.dialog();

        let open =
            button(text(messages.edit_groups.as_str()).size(LIST_FONT_SIZE))
                .on_press(AppEvent::OpenGroups)
                .padding([4.0, 12.0])
                .style(|_, status| action_button_style(status));

        let list: Element<'_, AppEvent> = if dialog.store().is_empty() {
            text(messages.no_groups.as_str()).size(LIST_FONT_SIZE).into()
        } else {
            saved_groups_list(dialog.store())
        };

        let base = container(column![open, list].spacing(12.0))
            .padding(CONTENT_PADDING)
            .width(Length::Fill)
            .height(Length::Fill);

        if dialog.is_visible() {
            stack![base, dialog.view(messages).map(AppEvent::Groups)].into()
        } else {
            base.into()
        }
    }

    fn handle_keyboard(&mut self, event: keyboard::Event) -> Task<AppEvent> {
        let keyboard::Event::KeyPressed { key, .. } = event else {
            return Task::none();
        };
        if !matches!(key, Key::Named(Named::Escape)) {
            return Task::none();
        }
        match self.host.dialog().escape_intent() {
            Some(intent) => {
                Task::done(AppEvent::Groups(GroupsDialogEvent::Intent(intent)))
            },
            None => Task::none(),
        }
    }
}

/// Read-only view of the saved groups, always fully expanded.
struct SavedGroups<'a> {
    store: &'a GroupStore,
}

impl TreeSource for SavedGroups<'_> {
    type Key = GroupId;
    type Node = Group;

    fn roots(&self) -> Vec<GroupId> {
        self.store
            .roots()
            .into_iter()
            .filter(|id| id.is_persisted())
            .collect()
    }

    fn children(&self, key: &GroupId) -> Vec<GroupId> {
        self.store
            .children(*key)
            .into_iter()
            .filter(|id| id.is_persisted())
            .collect()
    }

    fn node(&self, key: &GroupId) -> Option<&Group> {
        self.store.get(*key)
    }

    fn is_expanded(&self, _key: &GroupId) -> bool {
        true
    }
}

fn saved_groups_list(store: &GroupStore) -> Element<'_, AppEvent> {
    let source = SavedGroups { store };
    let rows = flatten_tree(&source).into_iter().map(|entry| {
        row![
            Space::new().width(Length::Fixed(entry.depth as f32 * LIST_INDENT)),
            text(entry.node.name().to_string()).size(LIST_FONT_SIZE),
        ]
        .into()
    });

    scrollable(column(rows).spacing(4.0))
        .height(Length::Fill)
        .style(thin_scroll_style)
        .into()
}

fn request_persist_groups(path: PathBuf, file: GroupsFile) -> Task<AppEvent> {
    Task::perform(
        async move {
            let count = file.groups.len();
            match save_groups(&path, &file) {
                Ok(()) => Ok(count),
                Err(err) => Err(format!("{err}")),
            }
        },
        |result| match result {
            Ok(count) => AppEvent::PersistCompleted(count),
            Err(message) => AppEvent::PersistFailed(message),
        },
    )
}

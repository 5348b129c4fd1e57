//! Shell state and the intents views send to it
//!
//! Views never mutate state directly. Icons, window chrome, the taskbar and
//! the hosted apps push [`DesktopIntent`]s during a frame; the desktop hands
//! them to [`Shell::dispatch`] once rendering is done.

use crate::filesystem::{self, FileSystemItem, FileTree};
use crate::window_manager::{WindowChange, WindowManager};

#[derive(Debug, Clone, PartialEq)]
pub enum DesktopIntent {
    Open(FileSystemItem),
    OpenMyPc,
    OpenTutorial,
    Close(String),
    ToggleMinimize(String),
    ToggleMaximize(String),
    Focus(String),
    TaskbarClick(String),
    /// Single click on an icon; `None` clears the selection.
    Select(Option<String>),
    SnakeWon,
    DismissAlert,
}

impl DesktopIntent {
    /// Window the intent acts on, if any.
    pub fn window_id(&self) -> Option<&str> {
        match self {
            DesktopIntent::Open(item) => Some(&item.id),
            DesktopIntent::OpenMyPc => Some(filesystem::MY_PC_ID),
            DesktopIntent::OpenTutorial => Some(filesystem::TUTORIAL_ID),
            DesktopIntent::Close(id)
            | DesktopIntent::ToggleMinimize(id)
            | DesktopIntent::ToggleMaximize(id)
            | DesktopIntent::Focus(id)
            | DesktopIntent::TaskbarClick(id) => Some(id),
            DesktopIntent::Select(_) | DesktopIntent::SnakeWon | DesktopIntent::DismissAlert => None,
        }
    }
}

/// Icon id used for the "My PC" desktop icon selection.
pub const MY_PC_ICON: &str = "hd";

#[derive(Debug, Default)]
pub struct Shell {
    pub tree: FileTree,
    pub windows: WindowManager,
    /// Selected icon, on the desktop or inside a folder window.
    pub selected: Option<String>,
    /// Modal message shown until dismissed.
    pub alert: Option<String>,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one intent. Returns the window it touched and what happened to it.
    pub fn dispatch(&mut self, intent: DesktopIntent) -> Option<(String, WindowChange)> {
        let id = intent.window_id().map(str::to_string);
        let change = match intent {
            DesktopIntent::Open(item) => self.open(&item),
            DesktopIntent::OpenMyPc => self.open(&filesystem::my_pc(self.tree.items())),
            DesktopIntent::OpenTutorial => self.open(&filesystem::tutorial()),
            DesktopIntent::Close(id) => self.windows.close(&id),
            DesktopIntent::ToggleMinimize(id) => self.windows.toggle_minimize(&id),
            DesktopIntent::ToggleMaximize(id) => self.windows.toggle_maximize(&id),
            DesktopIntent::Focus(id) => self.windows.focus(&id),
            DesktopIntent::TaskbarClick(id) => self.windows.taskbar_click(&id),
            DesktopIntent::Select(id) => {
                self.selected = id;
                WindowChange::None
            }
            DesktopIntent::SnakeWon => {
                if self.tree.unlock_secret() {
                    log::info!("[visiondesktop] secret file unlocked");
                }
                WindowChange::None
            }
            DesktopIntent::DismissAlert => {
                self.alert = None;
                WindowChange::None
            }
        };
        match (id, change) {
            (Some(id), change) if change != WindowChange::None => Some((id, change)),
            _ => None,
        }
    }

    fn open(&mut self, item: &FileSystemItem) -> WindowChange {
        match self.windows.open(item) {
            Ok(change) => change,
            Err(e) => {
                self.alert = Some(e.to_string());
                WindowChange::None
            }
        }
    }
}

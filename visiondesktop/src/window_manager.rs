//! Window manager: the open windows and which one has focus
//!
//! Windows are kept in open order. That order sets the cascade position of
//! new windows and the stacking of the unfocused ones; the focused window is
//! always drawn above everything else and minimized windows are not drawn at
//! all.
//!
//! Every operation on an unknown id is a no-op. The only failure is trying to
//! open a locked item.

use crate::filesystem::FileSystemItem;
use thiserror::Error;

/// Offset of the first window from the top-left corner of the desktop.
pub const CASCADE_ORIGIN: (f32, f32) = (150.0, 100.0);
/// Step between consecutive windows.
pub const CASCADE_STEP: f32 = 40.0;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("ACCESS DENIED. Win Snake game to unlock.")]
    AccessDenied { name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub id: String,
    /// The item as it was when the window opened.
    pub item: FileSystemItem,
    pub minimized: bool,
    /// Kept while minimized, takes effect again on restore.
    pub maximized: bool,
}

/// Where a window sits in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowLayer {
    Focused,
    Background,
    Hidden,
}

/// What a state change did, so the desktop can start the matching transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowChange {
    None,
    Opened,
    Focused,
    Minimized,
    Restored,
    Maximized,
    Unmaximized,
    Closed,
}

#[derive(Debug, Default)]
pub struct WindowManager {
    windows: Vec<WindowRecord>,
    focused: Option<String>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.windows.iter().position(|w| w.id == id)
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn is_focused(&self, id: &str) -> bool {
        self.focused.as_deref() == Some(id)
    }

    /// Open a window for `item`, or bring its existing window back.
    pub fn open(&mut self, item: &FileSystemItem) -> Result<WindowChange, WindowError> {
        if item.locked {
            log::info!("[visiondesktop] access denied: {}", item.name);
            return Err(WindowError::AccessDenied { name: item.name.clone() });
        }

        if self.get(&item.id).is_some() {
            return Ok(self.restore_and_focus(&item.id));
        }

        log::debug!("[visiondesktop] open {} ({})", item.id, item.name);
        self.windows.push(WindowRecord {
            id: item.id.clone(),
            item: item.clone(),
            minimized: false,
            maximized: false,
        });
        self.focused = Some(item.id.clone());
        Ok(WindowChange::Opened)
    }

    pub fn close(&mut self, id: &str) -> WindowChange {
        let Some(index) = self.index_of(id) else {
            return WindowChange::None;
        };
        self.windows.remove(index);
        if self.is_focused(id) {
            self.focused = None;
        }
        log::debug!("[visiondesktop] close {}", id);
        WindowChange::Closed
    }

    /// Minimizing always drops focus from the window; restoring focuses it.
    pub fn toggle_minimize(&mut self, id: &str) -> WindowChange {
        let Some(window) = self.get_mut(id) else {
            return WindowChange::None;
        };
        window.minimized = !window.minimized;
        if window.minimized {
            if self.is_focused(id) {
                self.focused = None;
            }
            WindowChange::Minimized
        } else {
            self.focused = Some(id.to_string());
            WindowChange::Restored
        }
    }

    pub fn toggle_maximize(&mut self, id: &str) -> WindowChange {
        let Some(window) = self.get_mut(id) else {
            return WindowChange::None;
        };
        window.maximized = !window.maximized;
        let change = if window.maximized {
            WindowChange::Maximized
        } else {
            WindowChange::Unmaximized
        };
        // Maximizing a minimized window is not reachable from the chrome, but
        // focus must not land on a hidden window
        if !window.minimized {
            self.focused = Some(id.to_string());
        }
        change
    }

    /// Give focus to a visible window.
    pub fn focus(&mut self, id: &str) -> WindowChange {
        match self.get(id) {
            Some(w) if !w.minimized => {
                if self.is_focused(id) {
                    return WindowChange::None;
                }
                self.focused = Some(id.to_string());
                WindowChange::Focused
            }
            _ => WindowChange::None,
        }
    }

    pub fn restore_and_focus(&mut self, id: &str) -> WindowChange {
        let Some(window) = self.get_mut(id) else {
            return WindowChange::None;
        };
        let was_minimized = std::mem::replace(&mut window.minimized, false);
        self.focused = Some(id.to_string());
        if was_minimized {
            WindowChange::Restored
        } else {
            WindowChange::Focused
        }
    }

    /// Taskbar entry clicked: a minimized window comes back, the focused one
    /// minimizes, any other one gets focus.
    pub fn taskbar_click(&mut self, id: &str) -> WindowChange {
        let Some(window) = self.get(id) else {
            return WindowChange::None;
        };
        if window.minimized {
            self.restore_and_focus(id)
        } else if self.is_focused(id) {
            self.toggle_minimize(id)
        } else {
            self.focus(id)
        }
    }

    pub fn layer(&self, id: &str) -> WindowLayer {
        match self.get(id) {
            None => WindowLayer::Hidden,
            Some(w) if w.minimized => WindowLayer::Hidden,
            Some(_) if self.is_focused(id) => WindowLayer::Focused,
            Some(_) => WindowLayer::Background,
        }
    }

    /// Position a window opens at when not maximized.
    pub fn default_position(&self, id: &str) -> Option<(f32, f32)> {
        self.index_of(id).map(cascade_position)
    }

    /// Visible windows, bottom of the stack first.
    pub fn draw_order(&self) -> Vec<&WindowRecord> {
        let mut order: Vec<&WindowRecord> = self.windows.iter().filter(|w| !w.minimized).collect();
        // Stable: keeps open order among background windows
        order.sort_by_key(|w| self.is_focused(&w.id));
        order
    }
}

pub fn cascade_position(index: usize) -> (f32, f32) {
    let offset = index as f32 * CASCADE_STEP;
    (CASCADE_ORIGIN.0 + offset, CASCADE_ORIGIN.1 + offset)
}

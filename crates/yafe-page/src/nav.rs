//! Mobile navigation drawer.
//!
//! The hamburger button toggles the drawer. The overlay, any drawer
//! link, and Escape all close it. While open, the page body must not
//! scroll; the controller turns open/close transitions into scroll
//! lock effects.

use yafe_types::event::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrawerState {
    Closed,
    Open,
}

#[derive(Debug)]
pub struct MobileNav {
    state: DrawerState,
}

impl Default for MobileNav {
    fn default() -> Self {
        Self::new()
    }
}

impl MobileNav {
    pub fn new() -> Self {
        MobileNav {
            state: DrawerState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == DrawerState::Open
    }

    /// Flip the drawer. Returns true when it is now open.
    pub fn toggle(&mut self) -> bool {
        self.state = match self.state {
            DrawerState::Closed => DrawerState::Open,
            DrawerState::Open => DrawerState::Closed,
        };
        self.is_open()
    }

    /// Close the drawer. Returns true when it was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = DrawerState::Closed;
        was_open
    }

    /// Keyboard activation of the hamburger button. Enter and Space act
    /// like a press; other keys do nothing. Returns true when the state
    /// changed.
    pub fn key(&mut self, key: Key) -> bool {
        match key {
            Key::Enter | Key::Space => {
                self.toggle();
                true
            },
            _ => false,
        }
    }
}

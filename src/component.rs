//! Component trait - Interface for UI components
//!
//! Components keep only presentation state (cursor positions, input
//! buffers). Domain state lives in the filter and DPS stores owned by
//! `App`, which passes it down when drawing.

use crate::action::Action;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Trait for UI components
///
/// 1. `handle_key_event` turns a key press into an Action
/// 2. `update` applies an Action to the component's own state
/// 3. `draw` renders into the given area
pub trait Component {
    /// Called once before the first frame
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Map a key press to an Action. Cursor movement inside a menu may be
    /// handled here directly.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Apply an Action; may return a follow-up Action
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    /// Render the component. Components that need store data expose a
    /// `draw_with_*` variant instead and leave this as a no-op.
    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()>;
}

//! Display boundary for the node terminals

use crate::state::MatchSnapshot;

/// Errors that can occur while driving the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The terminal line rejected a write
    WriteFailed,
}

/// A court display.
///
/// Rendering is idempotent: the same snapshot may be drawn twice
/// without harm, and every repaint carries the whole court. The bell
/// shares the terminal line, matching the BEL acknowledgement the
/// nodes emit on a bounce.
pub trait Display {
    /// Repaint the court from one consistent snapshot
    fn render(&mut self, snapshot: &MatchSnapshot) -> Result<(), DisplayError>;

    /// Ring the terminal bell
    fn bell(&mut self) -> Result<(), DisplayError>;
}

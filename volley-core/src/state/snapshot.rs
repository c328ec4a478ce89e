//! Render snapshots and the redraw dirty check.
//!
//! Interrupt-context producers and the render loop never share fields
//! piecemeal: a whole [`MatchSnapshot`] is copied out per iteration, so
//! a redraw always sees one consistent tick.

use volley_protocol::Side;

use crate::state::MatchState;

/// Everything a display needs for one repaint, as one `Copy` value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatchSnapshot {
    pub ball_x: i16,
    pub ball_y: i16,
    pub left_y: i16,
    pub right_y: i16,
    pub score: [u8; 2],
}

impl MatchSnapshot {
    /// Snapshot of an authoritative match state
    pub fn of(state: &MatchState) -> Self {
        Self {
            ball_x: state.ball.x,
            ball_y: state.ball.y,
            left_y: state.paddles.get(Side::Left),
            right_y: state.paddles.get(Side::Right),
            score: [
                state.score.get(Side::Left),
                state.score.get(Side::Right),
            ],
        }
    }

    /// Paddle row for one side
    pub fn paddle_y(&self, side: Side) -> i16 {
        match side {
            Side::Left => self.left_y,
            Side::Right => self.right_y,
        }
    }
}

/// Compares each snapshot against the last one handed out and yields
/// only when something visible moved.
///
/// The watched set is ball and paddle positions. Score is deliberately
/// not watched: a point always repositions the ball in the same tick,
/// so the scoreboard still repaints with it.
#[derive(Debug, Clone, Copy)]
pub struct RedrawTracker {
    last: MatchSnapshot,
}

impl RedrawTracker {
    /// Start tracking from an already-drawn snapshot
    pub fn new(drawn: MatchSnapshot) -> Self {
        Self { last: drawn }
    }

    /// Hand out `current` if it needs drawing, and remember it as drawn
    pub fn take(&mut self, current: MatchSnapshot) -> Option<MatchSnapshot> {
        let moved = current.ball_x != self.last.ball_x
            || current.ball_y != self.last.ball_y
            || current.left_y != self.last.left_y
            || current.right_y != self.last.right_y;

        if moved {
            self.last = current;
            Some(current)
        } else {
            None
        }
    }
}

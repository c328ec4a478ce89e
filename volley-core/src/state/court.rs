//! Match state owned by the master and mirrored by the slaves.
//!
//! One struct holds everything the rally needs: ball, movement vector,
//! both paddles, both scores, and the serve bookkeeping. The master owns
//! the authoritative copy; slaves hold partial mirrors fed off the bus.

use volley_protocol::Side;

use crate::board;

/// Ball position in court cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ball {
    pub x: i16,
    pub y: i16,
}

/// Ball movement vector; each component is -1 or +1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector {
    pub dx: i8,
    pub dy: i8,
}

impl Vector {
    /// Reverse the horizontal direction
    pub fn flip_x(&mut self) {
        self.dx = -self.dx;
    }

    /// Reverse the vertical direction
    pub fn flip_y(&mut self) {
        self.dy = -self.dy;
    }
}

/// Top rows of both paddles, kept in range at every write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paddles {
    ys: [i16; 2],
}

impl Paddles {
    /// Both paddles vertically centered
    pub const fn centered() -> Self {
        Self {
            ys: [board::PADDLE_START_Y; 2],
        }
    }

    /// Top row of one paddle
    pub fn get(&self, side: Side) -> i16 {
        self.ys[side.index()]
    }

    /// Move one paddle, clamping to the court
    pub fn set(&mut self, side: Side, y: i16) {
        self.ys[side.index()] = y.clamp(0, board::PADDLE_MAX_Y);
    }
}

/// Per-side point tally; single digits, wrapping at ten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Score {
    points: [u8; 2],
}

impl Score {
    /// Award one point
    pub fn tally(&mut self, side: Side) {
        let idx = side.index();
        self.points[idx] = (self.points[idx] + 1) % 10;
    }

    /// Current digit for one side
    pub fn get(&self, side: Side) -> u8 {
        self.points[side.index()]
    }
}

/// Serve bookkeeping: while `pending`, the ball is glued to the holder's
/// paddle and only the holder's serve request puts it in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Service {
    pub pending: bool,
    pub holder: Side,
}

/// The whole match, as the master sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatchState {
    pub ball: Ball,
    pub vector: Vector,
    pub paddles: Paddles,
    pub score: Score,
    pub service: Service,
}

impl MatchState {
    /// Kickoff layout: paddles centered, left side to serve, ball held
    /// at the left serve spot.
    pub fn new() -> Self {
        let paddles = Paddles::centered();
        let (x, y) = board::serve_spot(Side::Left, paddles.get(Side::Left));

        Self {
            ball: Ball { x, y },
            vector: Vector { dx: 1, dy: 1 },
            paddles,
            score: Score::default(),
            service: Service {
                pending: true,
                holder: Side::Left,
            },
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

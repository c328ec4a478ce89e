//! Slave-node mirror and input controller.
//!
//! A slave owns exactly one thing: its paddle row. Everything else on
//! its screen (ball, opposing paddle, score) is a mirror fed off the
//! bus, applied without interpretation. Key input moves the local
//! paddle, announcing each actual move, or asks the master for serve.

use volley_protocol::{KeyCommand, Message, Side};

use crate::board;
use crate::state::{Ball, MatchSnapshot, RedrawTracker, Score};

/// Per-node options for a slave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlaveConfig {
    /// Which paddle this node owns
    pub side: Side,
    /// Whether this node keeps and draws the score mirror
    pub scoreboard: bool,
}

/// Side effect a handled key or frame asks the node to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Put this frame on the bus
    Transmit(Message),
    /// Ring the terminal bell
    Bell,
}

/// Mirror state and input handling for one slave node
#[derive(Debug, Clone)]
pub struct SlaveController {
    side: Side,
    scoreboard: bool,
    own_y: i16,
    opponent_y: i16,
    ball: Ball,
    score: Score,
    tracker: RedrawTracker,
}

impl SlaveController {
    /// Fresh mirror at the kickoff layout.
    ///
    /// The boot screen is drawn from [`Self::snapshot`] right after
    /// construction, so the tracker starts in sync with the terminal.
    pub fn new(config: SlaveConfig) -> Self {
        let (ball_x, ball_y) = board::serve_spot(Side::Left, board::PADDLE_START_Y);
        let boot = MatchSnapshot {
            ball_x,
            ball_y,
            left_y: board::PADDLE_START_Y,
            right_y: board::PADDLE_START_Y,
            score: [0, 0],
        };

        Self {
            side: config.side,
            scoreboard: config.scoreboard,
            own_y: board::PADDLE_START_Y,
            opponent_y: board::PADDLE_START_Y,
            ball: Ball {
                x: ball_x,
                y: ball_y,
            },
            score: Score::default(),
            tracker: RedrawTracker::new(boot),
        }
    }

    /// Which paddle this node owns
    pub fn side(&self) -> Side {
        self.side
    }

    /// This node's paddle row
    pub fn own_y(&self) -> i16 {
        self.own_y
    }

    /// What the terminal should currently show
    pub fn snapshot(&self) -> MatchSnapshot {
        let (left_y, right_y) = match self.side {
            Side::Left => (self.own_y, self.opponent_y),
            Side::Right => (self.opponent_y, self.own_y),
        };
        MatchSnapshot {
            ball_x: self.ball.x,
            ball_y: self.ball.y,
            left_y,
            right_y,
            score: [self.score.get(Side::Left), self.score.get(Side::Right)],
        }
    }

    /// Consume one key press from the terminal.
    ///
    /// Movement that would leave the court does nothing at all: the
    /// paddle stays put and nothing goes on the bus.
    pub fn handle_key(&mut self, key: KeyCommand) -> Option<Effect> {
        match key {
            KeyCommand::MoveUp | KeyCommand::MoveDown => {
                let next = (self.own_y + key.movement_delta()).clamp(0, board::PADDLE_MAX_Y);
                if next == self.own_y {
                    return None;
                }
                self.own_y = next;
                Some(Effect::Transmit(Message::Paddle {
                    side: self.side,
                    y: self.own_y as u16,
                }))
            }
            KeyCommand::RequestService => Some(Effect::Transmit(Message::ServiceRequest {
                side: self.side,
            })),
            KeyCommand::Buzz => Some(Effect::Bell),
        }
    }

    /// Consume one message received off the bus.
    ///
    /// Frames that do not concern this node (its own paddle echoed back,
    /// serve requests that slipped past the filter) are dropped without
    /// effect.
    pub fn handle_message(&mut self, msg: Message) -> Option<Effect> {
        match msg {
            Message::Ball { x, y } => {
                self.ball = Ball {
                    x: x as i16,
                    y: y as i16,
                };
                None
            }
            Message::Bounce => Some(Effect::Bell),
            Message::Point { winner } => {
                if self.scoreboard {
                    self.score.tally(winner);
                }
                None
            }
            Message::Paddle { side, y } if side == self.side.other() => {
                self.opponent_y = (y as i16).clamp(0, board::PADDLE_MAX_Y);
                None
            }
            Message::Paddle { .. } | Message::ServiceRequest { .. } => None,
        }
    }

    /// Snapshot to repaint, if anything visible moved since the last one
    pub fn take_redraw(&mut self) -> Option<MatchSnapshot> {
        let current = self.snapshot();
        self.tracker.take(current)
    }
}

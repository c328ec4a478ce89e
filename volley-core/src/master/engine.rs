//! Authoritative match simulation.
//!
//! One [`Engine`] runs on the master node. Each tick it advances the
//! ball, resolves deflections, scores points, and reports the frames to
//! broadcast. Between ticks it consumes paddle mirrors and serve
//! requests received off the bus.
//!
//! Tick order matters and is fixed: move (or hold a pending serve),
//! paddle deflection, wall deflection, scoring. The tick carries one
//! event slot; a point displaces a bounce from the same tick, and two
//! deflections in one tick still produce a single bounce.

use heapless::Vec;

use volley_protocol::{Message, Side};

use crate::board;
use crate::state::{Ball, MatchState, Service};
use crate::traits::{BusTx, TransportError};

/// The reportable event of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickEvent {
    /// Ball deflected off a paddle or wall
    Bounce,
    /// Point scored by this side
    Point(Side),
}

/// What one tick produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    pub event: Option<TickEvent>,
    pub ball: Ball,
}

impl TickOutcome {
    /// Frames to broadcast for this tick, in send order: the event frame
    /// first if there is one, then always the ball position.
    pub fn broadcast(&self) -> Vec<Message, 2> {
        let mut frames = Vec::new();
        // Pushes cannot fail: at most two frames per tick
        match self.event {
            Some(TickEvent::Bounce) => {
                let _ = frames.push(Message::Bounce);
            }
            Some(TickEvent::Point(winner)) => {
                let _ = frames.push(Message::Point { winner });
            }
            None => {}
        }
        let _ = frames.push(Message::Ball {
            x: self.ball.x as u16,
            y: self.ball.y as u16,
        });
        frames
    }
}

/// xorshift32, seeded once at node startup. Only serve directions come
/// from it, so quality hardly matters; determinism under a fixed seed
/// does, and the tests rely on it.
#[derive(Debug, Clone)]
struct ServeRng(u32);

impl ServeRng {
    fn new(seed: u32) -> Self {
        // xorshift sticks at zero
        Self(seed | 1)
    }

    /// Fair-ish coin: -1 or +1
    fn coin(&mut self) -> i8 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        if x & 1 == 0 {
            -1
        } else {
            1
        }
    }
}

/// Authoritative simulation state plus the serve coin
#[derive(Debug, Clone)]
pub struct Engine {
    state: MatchState,
    rng: ServeRng,
}

impl Engine {
    /// Fresh match: kickoff layout, left side to serve
    pub fn new(seed: u32) -> Self {
        let mut rng = ServeRng::new(seed);
        let mut state = MatchState::new();
        state.vector.dy = rng.coin();
        Self { state, rng }
    }

    /// The authoritative match state
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Advance the match by one tick
    pub fn tick(&mut self) -> TickOutcome {
        let mut event = None;

        // Move the ball, or keep a pending serve glued to its paddle
        if self.state.service.pending {
            let holder = self.state.service.holder;
            let (x, y) = board::serve_spot(holder, self.state.paddles.get(holder));
            self.state.ball = Ball { x, y };
        } else {
            self.state.ball.x += i16::from(self.state.vector.dx);
            self.state.ball.y += i16::from(self.state.vector.dy);
        }

        // Paddle deflection: dx always reverses; dy reverses only when
        // the ball is moving toward the near paddle's center row and has
        // not yet reached it
        if paddle_hit(&self.state) {
            event = Some(TickEvent::Bounce);
            self.state.vector.flip_x();

            let near = if self.state.ball.x < board::WIDTH / 2 {
                Side::Left
            } else {
                Side::Right
            };
            let center = board::paddle_center(self.state.paddles.get(near));
            if self.state.vector.dy == 1 && self.state.ball.y < center {
                self.state.vector.dy = -1;
            } else if self.state.vector.dy == -1 && self.state.ball.y > center {
                self.state.vector.dy = 1;
            }
        }

        // Wall deflection shares the bounce slot with the paddle
        if self.state.ball.y <= 0 || self.state.ball.y >= board::LENGTH {
            event = Some(TickEvent::Bounce);
            self.state.vector.flip_y();
        }

        // Scoring: reset the ball at the loser's mouth and hand them the
        // serve. A point displaces a bounce from the same tick.
        let winner = if self.state.ball.x <= 0 {
            Some(Side::Right)
        } else if self.state.ball.x >= board::WIDTH {
            Some(Side::Left)
        } else {
            None
        };
        if let Some(winner) = winner {
            let loser = winner.other();
            self.state.score.tally(winner);
            let (x, y) = board::reset_spot(loser, self.state.paddles.get(loser));
            self.state.ball = Ball { x, y };
            self.state.service = Service {
                pending: true,
                holder: loser,
            };
            event = Some(TickEvent::Point(winner));
        }

        TickOutcome {
            event,
            ball: self.state.ball,
        }
    }

    /// Advance one tick and put its frames on the bus.
    ///
    /// On a busy bus the rest of this tick's frames are dropped; the
    /// next tick's ball frame brings the mirrors back in step.
    pub fn tick_and_broadcast(
        &mut self,
        bus: &mut impl BusTx,
    ) -> Result<TickOutcome, TransportError> {
        let outcome = self.tick();
        for msg in outcome.broadcast() {
            bus.send(&msg.to_wire())?;
        }
        Ok(outcome)
    }

    /// Consume one message received off the bus.
    ///
    /// Paddle frames update the master's mirrors (clamped); a serve
    /// request is honored only while a serve is pending and the sender
    /// holds it. The master's own broadcast kinds never loop back and
    /// are dropped if they somehow appear.
    pub fn handle_message(&mut self, msg: Message) {
        match msg {
            Message::Paddle { side, y } => {
                self.state.paddles.set(side, y as i16);
            }
            Message::ServiceRequest { side } => self.try_serve(side),
            Message::Ball { .. } | Message::Bounce | Message::Point { .. } => {}
        }
    }

    fn try_serve(&mut self, side: Side) {
        if !(self.state.service.pending && self.state.service.holder == side) {
            return;
        }
        self.state.service.pending = false;
        self.state.vector.dx = match side {
            Side::Left => 1,
            Side::Right => -1,
        };
        self.state.vector.dy = self.rng.coin();
    }
}

/// The ball counts as hitting a paddle when it is level with the paddle
/// column (or past it) and inside the paddle's row span
fn paddle_hit(state: &MatchState) -> bool {
    let Ball { x, y } = state.ball;
    let left_y = state.paddles.get(Side::Left);
    let right_y = state.paddles.get(Side::Right);

    (x <= board::PADDLE_LEFT_X + board::PADDLE_WIDTH
        && y >= left_y
        && y < left_y + board::PADDLE_LEN)
        || (x >= board::PADDLE_RIGHT_X && y >= right_y && y < right_y + board::PADDLE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Vector;
    use crate::traits::BusTx;
    use volley_protocol::WireFrame;

    fn make_engine() -> Engine {
        Engine::new(0xC0FFEE)
    }

    /// Engine mid-rally: serve done, ball and vector as given
    fn rally_engine(ball: Ball, vector: Vector) -> Engine {
        let mut engine = make_engine();
        engine.state.service.pending = false;
        engine.state.ball = ball;
        engine.state.vector = vector;
        engine
    }

    #[test]
    fn test_new_engine_at_kickoff() {
        let engine = make_engine();
        let state = engine.state();

        assert!(state.service.pending);
        assert_eq!(state.service.holder, Side::Left);
        assert_eq!(state.ball, Ball { x: 5, y: 12 });
        assert!(matches!(state.vector.dy, -1 | 1));
    }

    #[test]
    fn test_free_flight_moves_ball_and_sends_only_ball() {
        let mut engine = rally_engine(Ball { x: 40, y: 10 }, Vector { dx: 1, dy: 1 });

        let outcome = engine.tick();

        assert_eq!(outcome.event, None);
        assert_eq!(outcome.ball, Ball { x: 41, y: 11 });
        assert_eq!(
            outcome.broadcast().as_slice(),
            &[Message::Ball { x: 41, y: 11 }]
        );
    }

    #[test]
    fn test_pending_serve_glues_ball_to_holder() {
        let mut engine = make_engine();
        engine.handle_message(Message::Paddle {
            side: Side::Left,
            y: 4,
        });

        let outcome = engine.tick();

        assert_eq!(outcome.event, None);
        assert_eq!(outcome.ball, Ball { x: 5, y: 6 });
        assert_eq!(
            outcome.broadcast().as_slice(),
            &[Message::Ball { x: 5, y: 6 }]
        );
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let mut engine = rally_engine(Ball { x: 40, y: 23 }, Vector { dx: 1, dy: 1 });

        let outcome = engine.tick();

        assert_eq!(outcome.event, Some(TickEvent::Bounce));
        assert_eq!(outcome.ball, Ball { x: 41, y: 24 });
        assert_eq!(engine.state().vector, Vector { dx: 1, dy: -1 });
        assert_eq!(
            outcome.broadcast().as_slice(),
            &[Message::Bounce, Message::Ball { x: 41, y: 24 }]
        );
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut engine = rally_engine(Ball { x: 40, y: 1 }, Vector { dx: 1, dy: -1 });

        let outcome = engine.tick();

        assert_eq!(outcome.event, Some(TickEvent::Bounce));
        assert_eq!(outcome.ball, Ball { x: 41, y: 0 });
        assert_eq!(engine.state().vector, Vector { dx: 1, dy: 1 });
    }

    #[test]
    fn test_left_paddle_hit_reverses_dx_only_when_past_center() {
        // Ball level with the paddle center row: dy stays
        let mut engine = rally_engine(Ball { x: 5, y: 12 }, Vector { dx: -1, dy: 1 });

        let outcome = engine.tick();

        assert_eq!(outcome.event, Some(TickEvent::Bounce));
        assert_eq!(engine.state().vector, Vector { dx: 1, dy: 1 });
    }

    #[test]
    fn test_left_paddle_upper_half_deflects_upward() {
        // Moving down, above the center row: dy reverses
        let mut engine = rally_engine(Ball { x: 5, y: 10 }, Vector { dx: -1, dy: 1 });

        engine.tick();

        assert_eq!(engine.state().vector, Vector { dx: 1, dy: -1 });
    }

    #[test]
    fn test_left_paddle_lower_half_deflects_downward() {
        // Moving up, below the center row: dy reverses
        let mut engine = rally_engine(Ball { x: 5, y: 14 }, Vector { dx: -1, dy: -1 });

        engine.tick();

        assert_eq!(engine.state().vector, Vector { dx: 1, dy: 1 });
    }

    #[test]
    fn test_right_paddle_mirrors_deflection() {
        let mut engine = rally_engine(Ball { x: 75, y: 10 }, Vector { dx: 1, dy: 1 });

        let outcome = engine.tick();

        assert_eq!(outcome.event, Some(TickEvent::Bounce));
        assert_eq!(outcome.ball, Ball { x: 76, y: 11 });
        assert_eq!(engine.state().vector, Vector { dx: -1, dy: -1 });
    }

    #[test]
    fn test_corner_hit_emits_single_bounce() {
        // Paddle at the very top, ball into the corner: paddle and wall
        // deflect in the same tick, one bounce frame goes out
        let mut engine = rally_engine(Ball { x: 5, y: 1 }, Vector { dx: -1, dy: -1 });
        engine.handle_message(Message::Paddle {
            side: Side::Left,
            y: 0,
        });

        let outcome = engine.tick();

        assert_eq!(outcome.event, Some(TickEvent::Bounce));
        assert_eq!(
            outcome.broadcast().as_slice(),
            &[Message::Bounce, Message::Ball { x: 4, y: 0 }]
        );
        assert_eq!(engine.state().vector, Vector { dx: 1, dy: 1 });
    }

    #[test]
    fn test_point_when_ball_exits_left() {
        let mut engine = rally_engine(Ball { x: 0, y: 12 }, Vector { dx: -1, dy: 1 });

        let outcome = engine.tick();

        assert_eq!(outcome.event, Some(TickEvent::Point(Side::Right)));
        assert_eq!(engine.state().score.get(Side::Right), 1);
        assert_eq!(engine.state().score.get(Side::Left), 0);
        // Ball waits at the left mouth, left side to serve
        assert_eq!(outcome.ball, Ball { x: 5, y: 11 });
        assert!(engine.state().service.pending);
        assert_eq!(engine.state().service.holder, Side::Left);
        assert_eq!(
            outcome.broadcast().as_slice(),
            &[
                Message::Point {
                    winner: Side::Right
                },
                Message::Ball { x: 5, y: 11 }
            ]
        );
    }

    #[test]
    fn test_point_when_ball_exits_right() {
        let mut engine = rally_engine(Ball { x: 79, y: 20 }, Vector { dx: 1, dy: -1 });

        let outcome = engine.tick();

        assert_eq!(outcome.event, Some(TickEvent::Point(Side::Left)));
        assert_eq!(engine.state().score.get(Side::Left), 1);
        assert_eq!(outcome.ball, Ball { x: 75, y: 11 });
        assert_eq!(engine.state().service.holder, Side::Right);
    }

    #[test]
    fn test_point_displaces_bounce_in_same_tick() {
        // Ball grazes the left paddle band on its way out: the paddle
        // deflection fires, but only the point frame is sent
        let mut engine = rally_engine(Ball { x: 0, y: 11 }, Vector { dx: -1, dy: 1 });

        let outcome = engine.tick();

        assert_eq!(outcome.event, Some(TickEvent::Point(Side::Right)));
        let frames = outcome.broadcast();
        assert_eq!(frames.len(), 2);
        assert_eq!(
            frames[0],
            Message::Point {
                winner: Side::Right
            }
        );
    }

    #[test]
    fn test_serve_honored_only_for_pending_holder() {
        let mut engine = make_engine();
        assert_eq!(engine.state().service.holder, Side::Left);

        // Wrong side: ignored
        engine.handle_message(Message::ServiceRequest { side: Side::Right });
        assert!(engine.state().service.pending);

        // Holder: ball goes into play, away from the server
        engine.handle_message(Message::ServiceRequest { side: Side::Left });
        assert!(!engine.state().service.pending);
        assert_eq!(engine.state().vector.dx, 1);
        assert!(matches!(engine.state().vector.dy, -1 | 1));
    }

    #[test]
    fn test_serve_request_ignored_mid_rally() {
        let mut engine = make_engine();
        engine.handle_message(Message::ServiceRequest { side: Side::Left });
        let vector = engine.state().vector;

        // Duplicate request must not re-randomize the rally
        engine.handle_message(Message::ServiceRequest { side: Side::Left });

        assert!(!engine.state().service.pending);
        assert_eq!(engine.state().vector, vector);
    }

    #[test]
    fn test_right_serve_sends_ball_left() {
        let mut engine = make_engine();
        engine.state.service.holder = Side::Right;

        engine.handle_message(Message::ServiceRequest { side: Side::Right });

        assert_eq!(engine.state().vector.dx, -1);
    }

    #[test]
    fn test_serve_then_first_move() {
        let mut engine = make_engine();
        engine.tick();
        engine.handle_message(Message::ServiceRequest { side: Side::Left });

        let outcome = engine.tick();

        let dy = i16::from(engine.state().vector.dy);
        assert_eq!(outcome.ball, Ball { x: 6, y: 12 + dy });
        assert_eq!(outcome.event, None);
    }

    #[test]
    fn test_paddle_frames_update_and_clamp() {
        let mut engine = make_engine();

        engine.handle_message(Message::Paddle {
            side: Side::Right,
            y: 7,
        });
        assert_eq!(engine.state().paddles.get(Side::Right), 7);

        engine.handle_message(Message::Paddle {
            side: Side::Left,
            y: 300,
        });
        assert_eq!(
            engine.state().paddles.get(Side::Left),
            board::PADDLE_MAX_Y
        );
    }

    #[test]
    fn test_broadcast_kinds_dropped_if_looped_back() {
        let mut engine = make_engine();
        let before = *engine.state();

        engine.handle_message(Message::Ball { x: 1, y: 1 });
        engine.handle_message(Message::Bounce);
        engine.handle_message(Message::Point { winner: Side::Left });

        assert_eq!(*engine.state(), before);
    }

    #[test]
    fn test_same_seed_same_serves() {
        let mut a = Engine::new(42);
        let mut b = Engine::new(42);

        for _ in 0..5 {
            a.handle_message(Message::ServiceRequest { side: Side::Left });
            b.handle_message(Message::ServiceRequest { side: Side::Left });
            assert_eq!(a.state().vector, b.state().vector);
            a.state.service = Service {
                pending: true,
                holder: Side::Left,
            };
            b.state.service = Service {
                pending: true,
                holder: Side::Left,
            };
        }
    }

    #[derive(Default)]
    struct RecordingBus {
        sent: heapless::Vec<WireFrame, 8>,
    }

    impl BusTx for RecordingBus {
        fn send(&mut self, frame: &WireFrame) -> Result<(), TransportError> {
            self.sent.push(*frame).map_err(|_| TransportError::Busy)
        }
    }

    #[test]
    fn test_tick_and_broadcast_puts_frames_on_bus() {
        let mut engine = rally_engine(Ball { x: 40, y: 23 }, Vector { dx: 1, dy: 1 });
        let mut bus = RecordingBus::default();

        let outcome = engine.tick_and_broadcast(&mut bus).unwrap();

        assert_eq!(outcome.event, Some(TickEvent::Bounce));
        assert_eq!(bus.sent.len(), 2);
        assert_eq!(Message::from_wire(&bus.sent[0]), Ok(Message::Bounce));
        assert_eq!(
            Message::from_wire(&bus.sent[1]),
            Ok(Message::Ball { x: 41, y: 24 })
        );
    }
}

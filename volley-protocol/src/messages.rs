//! Typed messages carried on the match bus.
//!
//! The master broadcasts `Ball`, `Bounce`, and `Point`; each slave sends
//! its own `Paddle` position and `ServiceRequest`. Every node decodes
//! into the same enum and matches exhaustively, ignoring the variants
//! that do not concern it.

use heapless::Vec;

use crate::frame::{CodecError, Frame, WireFrame, MAX_WORDS};
use crate::ident::{Ident, Side};

/// Everything that crosses the bus, in both directions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    /// Authoritative ball position (sent every master tick)
    Ball { x: u16, y: u16 },
    /// The ball deflected off a paddle or wall this tick
    Bounce,
    /// A point was scored by `winner`
    Point { winner: Side },
    /// A slave moved its paddle to row `y`
    Paddle { side: Side, y: u16 },
    /// A slave asks to put the ball in play
    ServiceRequest { side: Side },
}

impl Message {
    /// The bus identifier this message travels under
    pub fn ident(&self) -> Ident {
        match *self {
            Message::Ball { .. } => Ident::Ball,
            Message::Bounce => Ident::Bounce,
            Message::Point { .. } => Ident::Point,
            Message::Paddle { side, .. } => Ident::Paddle(side),
            Message::ServiceRequest { side } => Ident::ServiceRequest(side),
        }
    }

    /// Encode into a typed frame
    pub fn to_frame(&self) -> Frame {
        let mut words = Vec::<u16, MAX_WORDS>::new();
        // Pushes cannot fail: every arity is below the frame capacity
        match *self {
            Message::Ball { x, y } => {
                let _ = words.push(x);
                let _ = words.push(y);
            }
            Message::Point { winner } => {
                let _ = words.push(winner.code());
            }
            Message::Paddle { y, .. } => {
                let _ = words.push(y);
            }
            Message::Bounce | Message::ServiceRequest { .. } => {}
        }
        Frame::from_parts(self.ident(), words)
    }

    /// Decode from a typed frame.
    ///
    /// The frame's arity is already checked; this only validates payload
    /// values (a `Point` winner code must name a real side).
    pub fn from_frame(frame: &Frame) -> Result<Self, CodecError> {
        let words = frame.words();
        match frame.ident {
            Ident::Ball => Ok(Message::Ball {
                x: words[0],
                y: words[1],
            }),
            Ident::Bounce => Ok(Message::Bounce),
            Ident::Point => {
                let winner =
                    Side::from_code(words[0]).ok_or(CodecError::InvalidPayload)?;
                Ok(Message::Point { winner })
            }
            Ident::Paddle(side) => Ok(Message::Paddle { side, y: words[0] }),
            Ident::ServiceRequest(side) => Ok(Message::ServiceRequest { side }),
        }
    }

    /// Pack straight to wire form
    pub fn to_wire(&self) -> WireFrame {
        self.to_frame().to_wire()
    }

    /// Unpack straight from wire form
    pub fn from_wire(wire: &WireFrame) -> Result<Self, CodecError> {
        Message::from_frame(&Frame::from_wire(wire)?)
    }
}

//! Bus identifiers and the acceptance filter.
//!
//! Identifiers are 11-bit standard values laid out so that every frame a
//! slave has to mirror (ball, bounce, point, both paddles) is even, while
//! the two serve requests are odd. A single mask/filter pair on the low
//! identifier bit is then enough to keep serve traffic out of the slaves;
//! only the master sees the odd half of the identifier space.

use crate::frame::{CodecError, Profile};

// Wire identifier values
pub const ID_BALL: u16 = 0x00;
pub const ID_BOUNCE: u16 = 0x02;
pub const ID_POINT: u16 = 0x04;
pub const ID_PADDLE_LEFT: u16 = 0x0A;
pub const ID_SERVICE_LEFT: u16 = 0x0B;
pub const ID_PADDLE_RIGHT: u16 = 0x14;
pub const ID_SERVICE_RIGHT: u16 = 0x15;

/// Largest raw value an 11-bit standard identifier can take
pub const MAX_STANDARD_ID: u16 = 0x7FF;

/// Which player a paddle, serve, or point belongs to.
///
/// Wire code is 1 for Left and 2 for Right; the `Point` payload and the
/// serve bookkeeping both use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Wire code for this side (1 or 2)
    pub fn code(self) -> u16 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }

    /// Parse a side from its wire code
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Side::Left),
            2 => Some(Side::Right),
            _ => None,
        }
    }

    /// The opposing side
    pub fn other(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Index into two-element per-side arrays (Left = 0, Right = 1)
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// The closed set of identifiers the match protocol uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ident {
    /// Ball position broadcast, master to slaves (2 words: x, y)
    Ball,
    /// Ball deflected this tick, master to slaves (no payload)
    Bounce,
    /// Point scored, master to slaves (1 word: winner side code)
    Point,
    /// Paddle moved, slave to everyone (1 word: new y)
    Paddle(Side),
    /// Serve requested, slave to master only (no payload)
    ServiceRequest(Side),
}

impl Ident {
    /// Raw 11-bit identifier for this message kind
    pub fn raw(self) -> u16 {
        match self {
            Ident::Ball => ID_BALL,
            Ident::Bounce => ID_BOUNCE,
            Ident::Point => ID_POINT,
            Ident::Paddle(Side::Left) => ID_PADDLE_LEFT,
            Ident::Paddle(Side::Right) => ID_PADDLE_RIGHT,
            Ident::ServiceRequest(Side::Left) => ID_SERVICE_LEFT,
            Ident::ServiceRequest(Side::Right) => ID_SERVICE_RIGHT,
        }
    }

    /// Parse a raw identifier received from the bus
    pub fn from_raw(raw: u16) -> Result<Self, CodecError> {
        match raw {
            ID_BALL => Ok(Ident::Ball),
            ID_BOUNCE => Ok(Ident::Bounce),
            ID_POINT => Ok(Ident::Point),
            ID_PADDLE_LEFT => Ok(Ident::Paddle(Side::Left)),
            ID_PADDLE_RIGHT => Ok(Ident::Paddle(Side::Right)),
            ID_SERVICE_LEFT => Ok(Ident::ServiceRequest(Side::Left)),
            ID_SERVICE_RIGHT => Ok(Ident::ServiceRequest(Side::Right)),
            _ => Err(CodecError::UnknownIdentifier),
        }
    }

    /// Number of 16-bit payload words this identifier carries
    pub fn arity(self) -> usize {
        match self {
            Ident::Ball => 2,
            Ident::Point | Ident::Paddle(_) => 1,
            Ident::Bounce | Ident::ServiceRequest(_) => 0,
        }
    }

    /// Wire encoding profile for this identifier's payload.
    ///
    /// Coordinate pairs go out word-packed; single small values go out
    /// byte-packed. Zero-arity identifiers encode identically under
    /// either profile.
    pub fn profile(self) -> Profile {
        match self {
            Ident::Ball => Profile::Word,
            _ => Profile::Byte,
        }
    }

    /// The side this identifier belongs to, if it is per-side
    pub fn side(self) -> Option<Side> {
        match self {
            Ident::Paddle(side) | Ident::ServiceRequest(side) => Some(side),
            _ => None,
        }
    }
}

/// Mask/filter pair over raw identifiers.
///
/// Mirrors the hardware acceptance registers: a bit set in `mask` means
/// the corresponding `filter` bit must match for the frame to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcceptanceFilter {
    mask: u16,
    filter: u16,
}

impl AcceptanceFilter {
    /// Build a filter from raw mask/filter values
    pub const fn new(mask: u16, filter: u16) -> Self {
        Self { mask, filter }
    }

    /// Accept every identifier (the master's filter)
    pub const fn all() -> Self {
        Self::new(0, 0)
    }

    /// Accept even identifiers only (the slaves' filter).
    ///
    /// Drops both `ServiceRequest` identifiers, which only the master
    /// consumes.
    pub const fn even_only() -> Self {
        Self::new(0b1, 0b0)
    }

    /// Raw mask value, for programming hardware filter banks
    pub const fn mask(&self) -> u16 {
        self.mask
    }

    /// Raw filter value, for programming hardware filter banks
    pub const fn filter(&self) -> u16 {
        self.filter
    }

    /// Whether a frame with this raw identifier passes the filter
    pub fn accepts(&self, raw: u16) -> bool {
        raw & self.mask == self.filter & self.mask
    }
}

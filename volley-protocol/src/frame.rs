//! Frame payload packing for the match bus.
//!
//! A frame is an identifier plus up to four 16-bit payload words. Two
//! wire profiles exist, kept from the two transmit paths of the original
//! bus layer:
//!
//! - [`Profile::Word`]: one word per mailbox slot, low byte first, so
//!   the data length is twice the word count. Coordinate pairs use this.
//! - [`Profile::Byte`]: one payload byte per slot, so the data length
//!   equals the word count. Single small values use this.
//!
//! Each identifier fixes its profile; decode is strict about the data
//! length the profile implies.

use heapless::Vec;

use crate::ident::Ident;

/// Maximum payload words per frame
pub const MAX_WORDS: usize = 4;

/// Maximum wire data bytes per frame
pub const MAX_DATA: usize = 8;

/// Errors that can occur while packing or unpacking frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Raw identifier is not part of the protocol
    UnknownIdentifier,
    /// Payload word count does not match the identifier's arity
    InvalidArity,
    /// More data than a frame can carry
    PayloadTooLong,
    /// Payload value outside its legal range
    InvalidPayload,
}

/// How payload words map onto wire data bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Profile {
    /// One 16-bit word per slot, low byte first (2 bytes per word)
    Word,
    /// One byte per slot (1 byte per word, high byte discarded)
    Byte,
}

/// A typed frame: identifier plus arity-checked payload words
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Message identifier
    pub ident: Ident,
    words: Vec<u16, MAX_WORDS>,
}

impl Frame {
    /// Create a frame, enforcing the identifier's exact arity
    pub fn new(ident: Ident, words: &[u16]) -> Result<Self, CodecError> {
        if words.len() != ident.arity() {
            return Err(CodecError::InvalidArity);
        }

        let mut payload = Vec::new();
        payload
            .extend_from_slice(words)
            .map_err(|_| CodecError::PayloadTooLong)?;

        Ok(Self {
            ident,
            words: payload,
        })
    }

    /// Build a frame whose arity is already known to match
    pub(crate) fn from_parts(ident: Ident, words: Vec<u16, MAX_WORDS>) -> Self {
        debug_assert_eq!(words.len(), ident.arity());
        Self { ident, words }
    }

    /// Payload words
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    /// Pack this frame for transmission under its identifier's profile
    pub fn to_wire(&self) -> WireFrame {
        let mut data = [0u8; MAX_DATA];
        let dlc = match self.ident.profile() {
            Profile::Word => {
                for (i, &word) in self.words.iter().enumerate() {
                    data[2 * i] = word as u8;
                    data[2 * i + 1] = (word >> 8) as u8;
                }
                self.words.len() * 2
            }
            Profile::Byte => {
                for (i, &word) in self.words.iter().enumerate() {
                    debug_assert!(word <= u16::from(u8::MAX));
                    data[i] = word as u8;
                }
                self.words.len()
            }
        };

        WireFrame {
            raw_id: self.ident.raw(),
            dlc: dlc as u8,
            data,
        }
    }

    /// Unpack a frame received from the bus
    pub fn from_wire(wire: &WireFrame) -> Result<Self, CodecError> {
        let ident = Ident::from_raw(wire.raw_id)?;
        let arity = ident.arity();
        let expected_dlc = match ident.profile() {
            Profile::Word => arity * 2,
            Profile::Byte => arity,
        };
        if usize::from(wire.dlc) != expected_dlc {
            return Err(CodecError::InvalidArity);
        }

        let mut words = Vec::new();
        for i in 0..arity {
            let word = match ident.profile() {
                Profile::Word => {
                    u16::from(wire.data[2 * i]) | (u16::from(wire.data[2 * i + 1]) << 8)
                }
                Profile::Byte => u16::from(wire.data[i]),
            };
            words.push(word).map_err(|_| CodecError::PayloadTooLong)?;
        }

        Ok(Self { ident, words })
    }
}

/// Raw frame as it crosses the bus: identifier, data length, data bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WireFrame {
    /// Raw 11-bit identifier
    pub raw_id: u16,
    dlc: u8,
    data: [u8; MAX_DATA],
}

impl WireFrame {
    /// Build a wire frame from received identifier and data bytes
    pub fn new(raw_id: u16, data: &[u8]) -> Result<Self, CodecError> {
        if data.len() > MAX_DATA {
            return Err(CodecError::PayloadTooLong);
        }

        let mut bytes = [0u8; MAX_DATA];
        bytes[..data.len()].copy_from_slice(data);

        Ok(Self {
            raw_id,
            dlc: data.len() as u8,
            data: bytes,
        })
    }

    /// Data length code
    pub fn dlc(&self) -> u8 {
        self.dlc
    }

    /// Valid data bytes
    pub fn data(&self) -> &[u8] {
        &self.data[..usize::from(self.dlc)]
    }
}

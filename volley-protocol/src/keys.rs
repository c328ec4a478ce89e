//! Key commands from a node's serial terminal

/// Commands a player can type at a slave node's terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCommand {
    /// Move the local paddle one row up
    MoveUp,
    /// Move the local paddle one row down
    MoveDown,
    /// Ask the master to put the ball in play
    RequestService,
    /// Ring the terminal bell (local echo only, nothing goes on the bus)
    Buzz,
}

// Wire format values
pub const KEY_UP: u8 = b'i';
pub const KEY_DOWN: u8 = b'k';
pub const KEY_SERVICE: u8 = b'j';
pub const KEY_BUZZ: u8 = b'b';

impl KeyCommand {
    /// Parse a command from a received terminal byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            KEY_UP => Some(KeyCommand::MoveUp),
            KEY_DOWN => Some(KeyCommand::MoveDown),
            KEY_SERVICE => Some(KeyCommand::RequestService),
            KEY_BUZZ => Some(KeyCommand::Buzz),
            _ => None,
        }
    }

    /// Convert to its terminal byte
    pub fn to_byte(self) -> u8 {
        match self {
            KeyCommand::MoveUp => KEY_UP,
            KeyCommand::MoveDown => KEY_DOWN,
            KeyCommand::RequestService => KEY_SERVICE,
            KeyCommand::Buzz => KEY_BUZZ,
        }
    }

    /// Returns true if this command moves the paddle
    pub fn is_movement(&self) -> bool {
        matches!(self, KeyCommand::MoveUp | KeyCommand::MoveDown)
    }

    /// Paddle row delta for movement commands (-1, 0, or +1).
    ///
    /// Rows grow downward, so up is negative.
    pub fn movement_delta(&self) -> i16 {
        match self {
            KeyCommand::MoveUp => -1,
            KeyCommand::MoveDown => 1,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_roundtrip() {
        let commands = [
            KeyCommand::MoveUp,
            KeyCommand::MoveDown,
            KeyCommand::RequestService,
            KeyCommand::Buzz,
        ];

        for command in commands {
            let byte = command.to_byte();
            let parsed = KeyCommand::from_byte(byte).unwrap();
            assert_eq!(command, parsed);
        }
    }

    #[test]
    fn test_movement_delta() {
        assert_eq!(KeyCommand::MoveUp.movement_delta(), -1);
        assert_eq!(KeyCommand::MoveDown.movement_delta(), 1);
        assert_eq!(KeyCommand::RequestService.movement_delta(), 0);
        assert_eq!(KeyCommand::Buzz.movement_delta(), 0);
    }

    #[test]
    fn test_is_movement() {
        assert!(KeyCommand::MoveUp.is_movement());
        assert!(KeyCommand::MoveDown.is_movement());
        assert!(!KeyCommand::RequestService.is_movement());
        assert!(!KeyCommand::Buzz.is_movement());
    }

    #[test]
    fn test_unknown_byte_dropped() {
        assert!(KeyCommand::from_byte(b'q').is_none());
        assert!(KeyCommand::from_byte(0x00).is_none());
        assert!(KeyCommand::from_byte(0xFF).is_none());
    }
}

//! VT100 terminal renderer.
//!
//! Paints the court over the serial line with ANSI cursor addressing.
//! After the initial full paint only the cells that changed since the
//! last snapshot are rewritten, so a tick costs a few dozen bytes at
//! 115200 baud. Writes are blocking; the UART FIFO drains far faster
//! than the tick cadence.

use core::fmt::Write as _;

use embassy_stm32::mode::Async;
use embassy_stm32::usart::UartTx;
use heapless::String;

use volley_core::board;
use volley_core::state::MatchSnapshot;
use volley_core::traits::{Display, DisplayError};
use volley_protocol::Side;

const BELL: u8 = 0x07;

/// Terminal column where each score digit block starts (1-based)
const SCORE_LEFT_COL: u8 = 32;
const SCORE_RIGHT_COL: u8 = 45;
/// Terminal row of the top glyph line
const SCORE_ROW: u8 = 2;

const WALL_ROW: [u8; board::WIDTH as usize] = [b'-'; board::WIDTH as usize];

/// 4x5 block digits, one bitmask per glyph row, bit 3 is the left column
const DIGITS: [[u8; 5]; 10] = [
    [0b1111, 0b1001, 0b1001, 0b1001, 0b1111], // 0
    [0b0010, 0b0110, 0b0010, 0b0010, 0b0111], // 1
    [0b1111, 0b0001, 0b1111, 0b1000, 0b1111], // 2
    [0b1111, 0b0001, 0b0111, 0b0001, 0b1111], // 3
    [0b1001, 0b1001, 0b1111, 0b0001, 0b0001], // 4
    [0b1111, 0b1000, 0b1111, 0b0001, 0b1111], // 5
    [0b1111, 0b1000, 0b1111, 0b1001, 0b1111], // 6
    [0b1111, 0b0001, 0b0010, 0b0100, 0b0100], // 7
    [0b1111, 0b1001, 0b1111, 0b1001, 0b1111], // 8
    [0b1111, 0b1001, 0b1111, 0b0001, 0b1111], // 9
];

/// Incremental court painter over a serial terminal
pub struct Vt100<'d> {
    tx: UartTx<'d, Async>,
    last: Option<MatchSnapshot>,
}

impl<'d> Vt100<'d> {
    pub fn new(tx: UartTx<'d, Async>) -> Self {
        Self { tx, last: None }
    }

    fn put(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        self.tx
            .blocking_write(bytes)
            .map_err(|_| DisplayError::WriteFailed)
    }

    fn move_to(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        let mut seq: String<12> = String::new();
        let _ = write!(seq, "\x1b[{};{}H", row, col);
        self.put(seq.as_bytes())
    }

    fn put_at(&mut self, col: u8, row: u8, bytes: &[u8]) -> Result<(), DisplayError> {
        self.move_to(col, row)?;
        self.put(bytes)
    }

    /// Court coordinates are zero based, the terminal is one based
    fn ball_cell(x: i16, y: i16) -> (u8, u8) {
        (x.clamp(0, board::WIDTH - 1) as u8 + 1, (y + 1) as u8)
    }

    /// What an emptied cell should show again
    fn background(y: i16) -> &'static [u8] {
        if y == 0 || y == board::LENGTH {
            b"-"
        } else {
            b" "
        }
    }

    /// Full repaint: clear screen, walls, score, paddles, ball
    pub fn draw_court(&mut self, snapshot: &MatchSnapshot) -> Result<(), DisplayError> {
        self.put(b"\x1b[2J\x1b[H")?;
        self.move_to(1, 1)?;
        self.put(&WALL_ROW)?;
        self.move_to(1, (board::LENGTH + 1) as u8)?;
        self.put(&WALL_ROW)?;

        self.draw_score(snapshot.score)?;
        for side in [Side::Left, Side::Right] {
            self.draw_paddle(side, snapshot.paddle_y(side), None)?;
        }
        let (col, row) = Self::ball_cell(snapshot.ball_x, snapshot.ball_y);
        self.put_at(col, row, b"o")?;
        self.move_to(1, (board::LENGTH + 2) as u8)?;

        self.last = Some(*snapshot);
        Ok(())
    }

    /// Repaint one paddle, erasing its previous rows first
    fn draw_paddle(
        &mut self,
        side: Side,
        y: i16,
        old_y: Option<i16>,
    ) -> Result<(), DisplayError> {
        let x = match side {
            Side::Left => board::PADDLE_LEFT_X,
            Side::Right => board::PADDLE_RIGHT_X,
        };
        let col = x as u8 + 1;

        if let Some(old) = old_y {
            if old == y {
                return Ok(());
            }
            for i in 0..board::PADDLE_LEN {
                let row_y = old + i;
                let bg = Self::background(row_y);
                self.put_at(col, (row_y + 1) as u8, bg)?;
                self.put(bg)?;
            }
        }
        for i in 0..board::PADDLE_LEN {
            self.put_at(col, (y + i + 1) as u8, b"##")?;
        }
        Ok(())
    }

    fn draw_score(&mut self, score: [u8; 2]) -> Result<(), DisplayError> {
        for (digit, col) in [(score[0], SCORE_LEFT_COL), (score[1], SCORE_RIGHT_COL)] {
            let glyph = &DIGITS[(digit % 10) as usize];
            for (i, mask) in glyph.iter().enumerate() {
                self.move_to(col, SCORE_ROW + i as u8)?;
                for bit in (0..4u8).rev() {
                    self.put(if mask & (1 << bit) != 0 { b"#" } else { b" " })?;
                }
            }
        }
        Ok(())
    }
}

impl Display for Vt100<'_> {
    fn render(&mut self, snapshot: &MatchSnapshot) -> Result<(), DisplayError> {
        let Some(last) = self.last else {
            return self.draw_court(snapshot);
        };

        if (last.ball_x, last.ball_y) != (snapshot.ball_x, snapshot.ball_y) {
            let (col, row) = Self::ball_cell(last.ball_x, last.ball_y);
            self.put_at(col, row, Self::background(last.ball_y))?;
            let (col, row) = Self::ball_cell(snapshot.ball_x, snapshot.ball_y);
            self.put_at(col, row, b"o")?;
        }
        for side in [Side::Left, Side::Right] {
            self.draw_paddle(side, snapshot.paddle_y(side), Some(last.paddle_y(side)))?;
        }
        if last.score != snapshot.score {
            self.draw_score(snapshot.score)?;
        }
        // Keep the cursor out of the court between repaints
        self.move_to(1, (board::LENGTH + 2) as u8)?;

        self.last = Some(*snapshot);
        Ok(())
    }

    fn bell(&mut self) -> Result<(), DisplayError> {
        self.put(&[BELL])
    }
}

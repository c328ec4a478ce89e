//! Court geometry.
//!
//! The court is a WIDTH x LENGTH cell grid matching the 80x24 terminals
//! the nodes draw on. Rows grow downward; column 0 is the left edge.
//! Paddle coordinates name the top-left cell of the paddle.

use volley_protocol::Side;

/// Court width in cells (columns)
pub const WIDTH: i16 = 80;

/// Court length in cells (rows)
pub const LENGTH: i16 = 24;

/// Ball edge length
pub const BALL_LEN: i16 = 1;

/// Paddle length (rows)
pub const PADDLE_LEN: i16 = 5;

/// Paddle width (columns)
pub const PADDLE_WIDTH: i16 = 2;

/// Left paddle column
pub const PADDLE_LEFT_X: i16 = 2;

/// Right paddle column
pub const PADDLE_RIGHT_X: i16 = 76;

/// Lowest row a paddle top can sit on
pub const PADDLE_MAX_Y: i16 = LENGTH - PADDLE_LEN;

/// Row both paddle tops start on (vertically centered)
pub const PADDLE_START_Y: i16 = LENGTH / 2 - PADDLE_LEN / 2;

/// Center row of a paddle whose top sits on `paddle_y`
pub fn paddle_center(paddle_y: i16) -> i16 {
    paddle_y + PADDLE_LEN / 2
}

/// Where a pending serve holds the ball: level with the serving paddle's
/// center, one clear cell off its face.
pub fn serve_spot(side: Side, paddle_y: i16) -> (i16, i16) {
    match side {
        Side::Left => (PADDLE_LEFT_X + PADDLE_WIDTH + 1, paddle_center(paddle_y)),
        Side::Right => (PADDLE_RIGHT_X - 2, paddle_center(paddle_y)),
    }
}

/// Where the ball sits right after a point, at the mouth of the loser's
/// paddle: one row above the serve spot, and on the right side one cell
/// closer to the paddle face.
pub fn reset_spot(side: Side, paddle_y: i16) -> (i16, i16) {
    match side {
        Side::Left => (
            PADDLE_LEFT_X + PADDLE_WIDTH + 1,
            paddle_center(paddle_y) - BALL_LEN,
        ),
        Side::Right => (PADDLE_RIGHT_X - 1, paddle_center(paddle_y) - BALL_LEN),
    }
}

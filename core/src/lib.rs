pub mod attacks;
pub mod board;
pub mod error;
pub mod move_gen;
pub mod perft;
pub mod status;
pub mod types;

pub use board::*;
pub use error::{ChessError, ChessResult};
pub use perft::{perft, perft_detailed, perft_divide, positions, PerftResults};
pub use status::GameStatus;
pub use types::*;

//! Image composition for qrferry.
//!
//! Takes a deck of rendered QR images and persists it: one numbered PNG per
//! part plus a single combined grid image laid out in chunk order, so a deck
//! can be printed or displayed as one picture and scanned back part by part.
//!
//! # Layout
//!
//! - Parts: `qr_code_part_{n}.png`, 1-indexed
//! - Combined: `combined_qr_codes.png`, a `floor(sqrt(n))+1` square grid

pub mod error;
pub mod grid;
pub mod writer;

pub use error::{ComposeError, ComposeResult};
pub use grid::grid_size;
pub use writer::{save_set, SavedSet};

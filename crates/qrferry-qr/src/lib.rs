//! QR matrix generation for qrferry.
//!
//! Converts capacity-bounded chunks into scannable QR code bitmaps at a
//! forced version and error-correction level, so every part of a deck has
//! identical geometry.
//!
//! # Key Types
//!
//! - [`QrGenerator`] — chunk in, rendered [`QrImage`] out
//! - [`QrImage`] — one chunk's RGB bitmap, tagged with its chunk index
//! - [`GenerateError`] — per-chunk failures, most notably
//!   [`GenerateError::CapacityExceeded`]

pub mod error;
pub mod generate;

pub use error::{GenerateError, GenerateResult};
pub use generate::{QrGenerator, QrImage};

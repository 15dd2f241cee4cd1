//! QR matrix generation at a forced version and error-correction level.
//!
//! The version is never allowed to float: a deck scanned back by a
//! companion decoder relies on every part having identical geometry. A
//! chunk that does not fit the forced version fails individually; the
//! caller decides what to do with the gap.

use image::{Rgb, RgbImage};
use qrcode::{EcLevel, QrCode, Version};
use tracing::debug;

use qrferry_types::{Chunk, ErrorCorrection, TransportProfile};

use crate::error::{GenerateError, GenerateResult};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

// ---------------------------------------------------------------------------
// QrImage
// ---------------------------------------------------------------------------

/// A rendered QR code for one chunk.
#[derive(Clone, Debug)]
pub struct QrImage {
    index: usize,
    image: RgbImage,
}

impl QrImage {
    /// Wrap an already-rendered bitmap. Mainly useful for tests and for
    /// callers substituting their own renderer.
    pub fn new(index: usize, image: RgbImage) -> Self {
        Self { index, image }
    }

    /// 0-based index of the chunk this image encodes.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The underlying bitmap.
    pub fn image(&self) -> &RgbImage {
        &self.image
    }
}

// ---------------------------------------------------------------------------
// QrGenerator
// ---------------------------------------------------------------------------

/// Builds QR images at a fixed version, EC level, and render geometry.
#[derive(Clone, Copy, Debug)]
pub struct QrGenerator {
    profile: TransportProfile,
}

impl QrGenerator {
    /// Create a generator for the given transport profile.
    pub fn new(profile: TransportProfile) -> Self {
        Self { profile }
    }

    /// Generate the QR image for one chunk.
    ///
    /// Fails with [`GenerateError::CapacityExceeded`] when the chunk's wire
    /// payload does not fit the forced version at the forced EC level. The
    /// failure carries the chunk index; it is never fatal to a batch.
    pub fn generate(&self, chunk: &Chunk) -> GenerateResult<QrImage> {
        let payload = chunk.payload();
        let code = QrCode::with_version(
            payload.as_bytes(),
            Version::Normal(self.profile.qr_version),
            ec_level(self.profile.ec_level),
        )
        .map_err(|e| match e {
            qrcode::types::QrError::DataTooLong => GenerateError::CapacityExceeded {
                index: chunk.index(),
                data_len: payload.len(),
            },
            other => GenerateError::Encoding {
                index: chunk.index(),
                reason: other.to_string(),
            },
        })?;

        let image = render(&code, self.profile.module_size, self.profile.border_modules);
        debug!(
            index = chunk.index(),
            symbols = chunk.len(),
            payload_len = payload.len(),
            px = image.width(),
            "generated QR image"
        );
        Ok(QrImage {
            index: chunk.index(),
            image,
        })
    }
}

fn ec_level(ec: ErrorCorrection) -> EcLevel {
    match ec {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}

/// Scale the module matrix onto a white canvas with a quiet zone.
fn render(code: &QrCode, module_size: u32, border: u32) -> RgbImage {
    let modules = code.to_colors();
    let width = code.width() as u32;
    let total = (width + 2 * border) * module_size;
    let mut image = RgbImage::from_pixel(total, total, WHITE);

    for (i, color) in modules.iter().enumerate() {
        if *color != qrcode::Color::Dark {
            continue;
        }
        let mx = (i as u32 % width + border) * module_size;
        let my = (i as u32 / width + border) * module_size;
        for dy in 0..module_size {
            for dx in 0..module_size {
                image.put_pixel(mx + dx, my + dy, BLACK);
            }
        }
    }
    image
}

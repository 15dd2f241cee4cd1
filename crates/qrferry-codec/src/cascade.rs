//! Cascade compression: repeated zlib passes at a fixed level.
//!
//! Each pass's output feeds the next pass's input. Highly redundant input
//! shrinks dramatically; already-compressed input grows by a few header
//! bytes per pass. Both outcomes are accepted, not errors.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::debug;

use crate::error::{CodecError, CodecResult};

/// Compress `data` with `passes` successive zlib passes at `level`.
///
/// Empty input passes through unchanged so that an empty file produces an
/// empty symbol stream downstream rather than a deck of header bytes.
pub fn compress(data: &[u8], passes: u32, level: u32) -> CodecResult<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut current = data.to_vec();
    for pass in 1..=passes {
        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity(current.len() / 2 + 64),
            Compression::new(level),
        );
        encoder
            .write_all(&current)
            .map_err(|source| CodecError::Compression { pass, source })?;
        current = encoder
            .finish()
            .map_err(|source| CodecError::Compression { pass, source })?;
        debug!(pass, len = current.len(), "cascade compress pass");
    }
    Ok(current)
}

/// Invert [`compress`]: `passes` successive zlib inflate passes.
pub fn decompress(data: &[u8], passes: u32) -> CodecResult<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut current = data.to_vec();
    for pass in 1..=passes {
        let mut decoder = ZlibDecoder::new(current.as_slice());
        let mut output = Vec::new();
        decoder
            .read_to_end(&mut output)
            .map_err(|source| CodecError::Decompression { pass, source })?;
        current = output;
        debug!(pass, len = current.len(), "cascade decompress pass");
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PASSES: u32 = 5;
    const LEVEL: u32 = 9;

    #[test]
    fn roundtrip_small() {
        let data = b"hello world";
        let compressed = compress(data, PASSES, LEVEL).unwrap();
        let restored = decompress(&compressed, PASSES).unwrap();
        assert_eq!(restored, data);
    }

    #[test]
    fn roundtrip_redundant_input_shrinks() {
        let data = vec![0x41u8; 100_000];
        let compressed = compress(&data, PASSES, LEVEL).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decompress(&compressed, PASSES).unwrap(), data);
    }

    #[test]
    fn incompressible_input_grows_but_roundtrips() {
        // xorshift noise defeats deflate; the cascade still inverts cleanly.
        let mut state = 0x2545F491u32;
        let data: Vec<u8> = (0..4096)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();
        let compressed = compress(&data, PASSES, LEVEL).unwrap();
        assert!(compressed.len() >= data.len());
        assert_eq!(decompress(&compressed, PASSES).unwrap(), data);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(compress(&[], PASSES, LEVEL).unwrap().is_empty());
        assert!(decompress(&[], PASSES).unwrap().is_empty());
    }

    #[test]
    fn corrupt_input_fails_decompression() {
        let err = decompress(&[0xDE, 0xAD, 0xBE, 0xEF], PASSES).unwrap_err();
        assert!(matches!(err, CodecError::Decompression { pass: 1, .. }));
    }

    #[test]
    fn single_pass_differs_from_cascade() {
        let data = b"abababababababab";
        let once = compress(data, 1, LEVEL).unwrap();
        let five = compress(data, PASSES, LEVEL).unwrap();
        assert_ne!(once, five);
    }

    proptest! {
        #[test]
        fn roundtrip_arbitrary(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let compressed = compress(&data, PASSES, LEVEL).unwrap();
            prop_assert_eq!(decompress(&compressed, PASSES).unwrap(), data);
        }
    }
}

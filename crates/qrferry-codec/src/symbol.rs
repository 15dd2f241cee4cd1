//! Symbol codecs: bytes to bounded-alphabet symbol streams and back.
//!
//! Two transforms exist. [`SymbolCodec::Packed`] is the default: big-endian
//! 11-bit packing, lossless, one symbol per 11 payload bits.
//! [`SymbolCodec::Legacy`] reproduces the historical pair encoding, which
//! drops any 16-bit group outside the alphabet and therefore cannot
//! round-trip arbitrary binary data. Legacy exists for behavioral parity
//! and must be selected explicitly.

use serde::{Deserialize, Serialize};
use tracing::warn;

use qrferry_types::{Symbol, SymbolStream};

use crate::error::{CodecError, CodecResult};

/// Payload bits carried by one symbol (the alphabet is 2^11).
const SYMBOL_BITS: usize = 11;

/// Selects the byte-to-symbol transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolCodec {
    /// Lossless big-endian 11-bit packing.
    #[default]
    Packed,
    /// Historical pair encoding: `high << 8 | low` per byte pair, an 8-bit
    /// value for a trailing odd byte, values >= 2048 silently dropped.
    Legacy,
}

impl SymbolCodec {
    /// Encode bytes into a symbol stream.
    pub fn encode(self, bytes: &[u8]) -> SymbolStream {
        match self {
            Self::Packed => pack(bytes),
            Self::Legacy => legacy_encode(bytes),
        }
    }

    /// Decode a symbol stream back into bytes.
    ///
    /// `byte_len` is the original payload length; the 11-bit padding (and
    /// the legacy trailing-byte case) is not self-describing, so the length
    /// travels out of band in the manifest.
    pub fn decode(self, stream: &SymbolStream, byte_len: usize) -> CodecResult<Vec<u8>> {
        match self {
            Self::Packed => unpack(stream.as_slice(), byte_len),
            Self::Legacy => legacy_decode(stream.as_slice(), byte_len),
        }
    }
}

impl std::fmt::Display for SymbolCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Packed => write!(f, "packed"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

// ---------------------------------------------------------------------------
// Packed codec
// ---------------------------------------------------------------------------

fn pack(bytes: &[u8]) -> SymbolStream {
    let mut symbols = Vec::with_capacity((bytes.len() * 8).div_ceil(SYMBOL_BITS));
    let mut acc: u32 = 0;
    let mut nbits = 0;

    for &byte in bytes {
        acc = (acc << 8) | u32::from(byte);
        nbits += 8;
        while nbits >= SYMBOL_BITS {
            nbits -= SYMBOL_BITS;
            symbols.push(Symbol::from_bits((acc >> nbits) as u16));
            acc &= (1 << nbits) - 1;
        }
    }
    if nbits > 0 {
        // Final partial group, zero-padded on the right.
        symbols.push(Symbol::from_bits((acc << (SYMBOL_BITS - nbits)) as u16));
    }
    SymbolStream::from_vec(symbols)
}

fn unpack(symbols: &[Symbol], byte_len: usize) -> CodecResult<Vec<u8>> {
    let expected = (byte_len * 8).div_ceil(SYMBOL_BITS);
    if symbols.len() != expected {
        return Err(CodecError::LengthMismatch {
            symbols: symbols.len(),
            byte_len,
        });
    }

    let mut bytes = Vec::with_capacity(byte_len);
    let mut acc: u32 = 0;
    let mut nbits = 0;

    for symbol in symbols {
        acc = (acc << SYMBOL_BITS) | u32::from(symbol.value());
        nbits += SYMBOL_BITS;
        while nbits >= 8 && bytes.len() < byte_len {
            nbits -= 8;
            bytes.push((acc >> nbits) as u8);
            acc &= (1 << nbits) - 1;
        }
    }

    if bytes.len() != byte_len {
        return Err(CodecError::LengthMismatch {
            symbols: symbols.len(),
            byte_len,
        });
    }
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// Legacy codec
// ---------------------------------------------------------------------------

fn legacy_encode(bytes: &[u8]) -> SymbolStream {
    let mut symbols = Vec::with_capacity(bytes.len().div_ceil(2));
    let mut dropped = 0usize;

    for pair in bytes.chunks(2) {
        let value = if pair.len() == 2 {
            u16::from(pair[0]) << 8 | u16::from(pair[1])
        } else {
            u16::from(pair[0])
        };
        match Symbol::new(value) {
            Ok(symbol) => symbols.push(symbol),
            Err(_) => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "legacy codec dropped out-of-alphabet groups");
    }
    SymbolStream::from_vec(symbols)
}

fn legacy_decode(symbols: &[Symbol], byte_len: usize) -> CodecResult<Vec<u8>> {
    let expected = byte_len.div_ceil(2);
    if symbols.len() < expected {
        // Fewer symbols than groups: the encoder dropped some. The stream
        // cannot be reconstructed.
        return Err(CodecError::LossyStream {
            dropped: expected - symbols.len(),
        });
    }
    if symbols.len() > expected {
        return Err(CodecError::LengthMismatch {
            symbols: symbols.len(),
            byte_len,
        });
    }

    let mut bytes = Vec::with_capacity(byte_len);
    for (i, symbol) in symbols.iter().enumerate() {
        let trailing = i + 1 == symbols.len() && byte_len % 2 == 1;
        if trailing {
            if symbol.value() > 0xFF {
                return Err(CodecError::LengthMismatch {
                    symbols: symbols.len(),
                    byte_len,
                });
            }
            bytes.push(symbol.value() as u8);
        } else {
            bytes.push((symbol.value() >> 8) as u8);
            bytes.push((symbol.value() & 0xFF) as u8);
        }
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn packed_symbol_count_is_ceil_of_bits() {
        for len in [0usize, 1, 2, 3, 10, 11, 100, 1000] {
            let bytes = vec![0xA5u8; len];
            let stream = SymbolCodec::Packed.encode(&bytes);
            assert_eq!(stream.len(), (len * 8).div_ceil(11));
        }
    }

    #[test]
    fn packed_roundtrip_known_bytes() {
        let bytes = [0u8, 1, 2, 3, 4];
        let stream = SymbolCodec::Packed.encode(&bytes);
        let restored = SymbolCodec::Packed.decode(&stream, bytes.len()).unwrap();
        assert_eq!(restored, bytes);
    }

    #[test]
    fn packed_empty_input() {
        let stream = SymbolCodec::Packed.encode(&[]);
        assert!(stream.is_empty());
        assert!(SymbolCodec::Packed.decode(&stream, 0).unwrap().is_empty());
    }

    #[test]
    fn packed_decode_rejects_wrong_length() {
        let stream = SymbolCodec::Packed.encode(&[1, 2, 3]);
        let err = SymbolCodec::Packed.decode(&stream, 5).unwrap_err();
        assert!(matches!(err, CodecError::LengthMismatch { .. }));
    }

    #[test]
    fn legacy_keeps_in_alphabet_pairs() {
        // Groups 0x0001 and 0x0203 are both < 2048.
        let stream = SymbolCodec::Legacy.encode(&[0x00, 0x01, 0x02, 0x03]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.as_slice()[0].value(), 0x0001);
        assert_eq!(stream.as_slice()[1].value(), 0x0203);
    }

    #[test]
    fn legacy_emits_trailing_odd_byte() {
        let stream = SymbolCodec::Legacy.encode(&[0x01, 0x02, 0xFF]);
        assert_eq!(stream.len(), 2);
        assert_eq!(stream.as_slice()[1].value(), 0xFF);
    }

    #[test]
    fn legacy_drops_out_of_alphabet_groups() {
        // 0x0801 = 2049 is dropped; 0x0001 survives.
        let stream = SymbolCodec::Legacy.encode(&[0x08, 0x01, 0x00, 0x01]);
        assert_eq!(stream.len(), 1);
        assert_eq!(stream.as_slice()[0].value(), 0x0001);
    }

    #[test]
    fn legacy_roundtrip_when_nothing_dropped() {
        let bytes = [0x00, 0x10, 0x07, 0xFF, 0x05];
        let stream = SymbolCodec::Legacy.encode(&bytes);
        assert_eq!(stream.len(), bytes.len().div_ceil(2));
        let restored = SymbolCodec::Legacy.decode(&stream, bytes.len()).unwrap();
        assert_eq!(restored, bytes);
    }

    #[test]
    fn legacy_decode_detects_dropped_symbols() {
        let stream = SymbolCodec::Legacy.encode(&[0x08, 0x01, 0x00, 0x01]);
        let err = SymbolCodec::Legacy.decode(&stream, 4).unwrap_err();
        assert!(matches!(err, CodecError::LossyStream { dropped: 1 }));
    }

    proptest! {
        #[test]
        fn packed_roundtrip_arbitrary(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let stream = SymbolCodec::Packed.encode(&bytes);
            prop_assert!(stream.iter().all(|s| s.value() <= Symbol::MAX));
            prop_assert_eq!(SymbolCodec::Packed.decode(&stream, bytes.len()).unwrap(), bytes);
        }

        #[test]
        fn legacy_roundtrip_low_groups(pairs in proptest::collection::vec((0u8..8, any::<u8>()), 0..256)) {
            // Every 16-bit group stays below 2048 when the high byte is < 8.
            let bytes: Vec<u8> = pairs.iter().flat_map(|&(hi, lo)| [hi, lo]).collect();
            let stream = SymbolCodec::Legacy.encode(&bytes);
            prop_assert_eq!(stream.len(), bytes.len().div_ceil(2));
            prop_assert_eq!(SymbolCodec::Legacy.decode(&stream, bytes.len()).unwrap(), bytes);
        }
    }
}

//! Byte pipeline codecs for qrferry.
//!
//! Three stages, applied in order when encoding a file for QR transport:
//!
//! - **Cascade compression** ([`cascade`]): a fixed number of successive
//!   zlib passes at a fixed level, plus the inverse cascade
//! - **Symbol encoding** ([`symbol`]): bytes into the bounded [0, 2047]
//!   alphabet, losslessly bit-packed by default
//! - **Chunking** ([`chunk`]): capacity-bounded slicing of the symbol
//!   stream, one chunk per eventual QR code

pub mod cascade;
pub mod chunk;
pub mod error;
pub mod symbol;

pub use cascade::{compress, decompress};
pub use chunk::chunk;
pub use error::{CodecError, CodecResult};
pub use symbol::SymbolCodec;

#[cfg(test)]
mod tests {
    use super::*;
    use qrferry_types::TransportProfile;

    /// The full byte-side pipeline inverts: chunked symbols, rejoined and
    /// decoded, decompress back to the original payload.
    #[test]
    fn compress_encode_chunk_inverts() {
        let profile = TransportProfile::default();
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 31) as u8).collect();

        let compressed =
            compress(&data, profile.cascade_passes, profile.compression_level).unwrap();
        let stream = SymbolCodec::Packed.encode(&compressed);
        let chunks = chunk(&stream, 100);

        let rejoined: qrferry_types::SymbolStream = chunks
            .iter()
            .flat_map(|c| c.symbols().to_vec())
            .collect();
        let decoded = SymbolCodec::Packed
            .decode(&rejoined, compressed.len())
            .unwrap();
        let restored = decompress(&decoded, profile.cascade_passes).unwrap();
        assert_eq!(restored, data);
    }
}

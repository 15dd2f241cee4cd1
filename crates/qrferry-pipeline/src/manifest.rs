use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use qrferry_codec::SymbolCodec;

/// Output record of a save operation.
///
/// Everything a companion decoder needs to reassemble and verify the file:
/// the part files in order, the codec that produced the symbols, the
/// original byte length (the 11-bit padding is not self-describing), and a
/// BLAKE3 digest of the raw payload. Written as `manifest.json` beside the
/// images and returned to the caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Length of the raw source in bytes.
    pub source_len: usize,
    /// BLAKE3 digest of the raw source, hex encoded.
    pub source_digest: String,
    /// The symbol codec used on the wire.
    pub codec: SymbolCodec,
    /// Columns (and rows) of the combined grid.
    pub grid_size: u32,
    /// Individual part files, in chunk order.
    pub parts: Vec<PathBuf>,
    /// The combined grid image.
    pub combined: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_roundtrips_through_json() {
        let manifest = Manifest {
            source_len: 42,
            source_digest: "ab".repeat(32),
            codec: SymbolCodec::Packed,
            grid_size: 2,
            parts: vec![PathBuf::from("qr_code_part_1.png")],
            combined: PathBuf::from("combined_qr_codes.png"),
        };
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.source_len, 42);
        assert_eq!(back.codec, SymbolCodec::Packed);
        assert_eq!(back.parts.len(), 1);
    }
}

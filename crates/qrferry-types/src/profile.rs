use serde::{Deserialize, Serialize};

/// QR error-correction level, trading data capacity for scan resilience.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% recovery. The transport default: maximizes payload capacity.
    Low,
    /// ~15% recovery.
    Medium,
    /// ~25% recovery.
    Quartile,
    /// ~30% recovery.
    High,
}

impl std::fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "L"),
            Self::Medium => write!(f, "M"),
            Self::Quartile => write!(f, "Q"),
            Self::High => write!(f, "H"),
        }
    }
}

/// The fixed transport constants.
///
/// Generator and any companion decoder must agree on every field exactly;
/// changing one silently breaks reassembly of previously produced decks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportProfile {
    /// Forced QR symbol version (1..=40).
    pub qr_version: i16,
    /// Error-correction level for every generated code.
    pub ec_level: ErrorCorrection,
    /// Pixels per QR module in rendered images.
    pub module_size: u32,
    /// Quiet-zone width around the matrix, in modules.
    pub border_modules: u32,
    /// Maximum symbols per chunk. 2953 is the byte capacity of a
    /// version-40 code at level L, the historical unit of slicing.
    pub chunk_capacity: usize,
    /// Number of successive compression passes in the cascade.
    pub cascade_passes: u32,
    /// zlib compression level used by every pass (0..=9).
    pub compression_level: u32,
}

impl TransportProfile {
    /// The interoperable constant set.
    pub const DEFAULT: Self = Self {
        qr_version: 40,
        ec_level: ErrorCorrection::Low,
        module_size: 10,
        border_modules: 4,
        chunk_capacity: 2953,
        cascade_passes: 5,
        compression_level: 9,
    };
}

impl Default for TransportProfile {
    fn default() -> Self {
        Self::DEFAULT
    }
}

use serde::{Deserialize, Serialize};

use qrferry_codec::SymbolCodec;
use qrferry_types::TransportProfile;

use crate::error::{PipelineError, PipelineResult};

/// Configuration for one pipeline run.
///
/// The default mirrors [`TransportProfile::DEFAULT`] with the lossless
/// packed codec; anything else is an explicit caller decision.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// The fixed transport constants (QR geometry, capacity, cascade).
    pub profile: TransportProfile,
    /// The byte-to-symbol transform.
    pub codec: SymbolCodec,
}

impl PipelineConfig {
    /// Check the configuration for values no run can proceed with.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.profile.cascade_passes == 0 {
            return Err(PipelineError::InvalidConfig(
                "cascade_passes must be at least 1".into(),
            ));
        }
        if self.profile.compression_level > 9 {
            return Err(PipelineError::InvalidConfig(format!(
                "compression_level {} exceeds zlib maximum 9",
                self.profile.compression_level
            )));
        }
        if self.profile.chunk_capacity == 0 {
            return Err(PipelineError::InvalidConfig(
                "chunk_capacity must be at least 1".into(),
            ));
        }
        if !(1..=40).contains(&self.profile.qr_version) {
            return Err(PipelineError::InvalidConfig(format!(
                "qr_version {} outside 1..=40",
                self.profile.qr_version
            )));
        }
        Ok(())
    }
}

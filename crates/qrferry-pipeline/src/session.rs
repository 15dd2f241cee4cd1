//! The request-scoped pipeline session.
//!
//! A session owns everything one load operation produced: the generated
//! images in chunk order and the per-chunk report. Saving is a separate
//! operation over the held images. Each load builds a fresh session; there
//! is no cross-request state.

use std::path::Path;

use tracing::{info, warn};

use qrferry_codec::{cascade, chunk};
use qrferry_compose::save_set;
use qrferry_qr::{QrGenerator, QrImage};
use qrferry_types::SymbolStream;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::manifest::Manifest;
use crate::report::{ChunkOutcome, GenerationReport, StreamStats};

/// One load operation's results: held QR images plus the generation report.
#[derive(Debug)]
pub struct Session {
    config: PipelineConfig,
    source_len: usize,
    source_digest: blake3::Hash,
    images: Vec<QrImage>,
    report: GenerationReport,
}

impl Session {
    /// Read `path` fully into memory and run the pipeline over it.
    pub fn from_path(path: &Path, config: PipelineConfig) -> PipelineResult<Self> {
        let bytes = std::fs::read(path).map_err(|source| PipelineError::ReadInput {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, config)
    }

    /// Run compress -> encode -> chunk -> generate over `bytes`.
    ///
    /// Every chunk is attempted; a chunk that does not fit the forced QR
    /// version is recorded as failed in the report and skipped, never fatal
    /// to the rest of the batch.
    pub fn from_bytes(bytes: &[u8], config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        let profile = config.profile;

        let compressed =
            cascade::compress(bytes, profile.cascade_passes, profile.compression_level)?;
        let stream = config.codec.encode(&compressed);
        let chunks = chunk(&stream, profile.chunk_capacity);

        let stats = StreamStats {
            raw_len: bytes.len(),
            compressed_len: compressed.len(),
            symbol_count: stream.len(),
            chunk_count: chunks.len(),
            oversized_chunks: chunks
                .iter()
                .filter(|c| c.payload_len() > profile.chunk_capacity)
                .count(),
        };

        let generator = QrGenerator::new(profile);
        let mut images = Vec::with_capacity(chunks.len());
        let mut outcomes = Vec::with_capacity(chunks.len());
        for chunk in &chunks {
            match generator.generate(chunk) {
                Ok(image) => {
                    outcomes.push(ChunkOutcome::generated(chunk));
                    images.push(image);
                }
                Err(e) => {
                    warn!(index = chunk.index(), error = %e, "chunk generation failed");
                    outcomes.push(ChunkOutcome::failed(chunk, e.to_string()));
                }
            }
        }

        info!(
            raw_len = stats.raw_len,
            compressed_len = stats.compressed_len,
            symbols = stats.symbol_count,
            chunks = stats.chunk_count,
            generated = images.len(),
            "pipeline run complete"
        );

        Ok(Self {
            config,
            source_len: bytes.len(),
            source_digest: blake3::hash(bytes),
            images,
            report: GenerationReport { stats, outcomes },
        })
    }

    /// The successfully generated images, in chunk order.
    pub fn images(&self) -> &[QrImage] {
        &self.images
    }

    /// The per-chunk generation report.
    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// The configuration this session ran with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Persist the held images into `dir` and write `manifest.json`.
    ///
    /// Delegates layout to the compositor; a session holding no images
    /// surfaces [`qrferry_compose::ComposeError::EmptyInput`].
    pub fn save(&self, dir: &Path) -> PipelineResult<Manifest> {
        let saved = save_set(&self.images, dir)?;

        let manifest = Manifest {
            source_len: self.source_len,
            source_digest: self.source_digest.to_hex().to_string(),
            codec: self.config.codec,
            grid_size: saved.grid_size,
            parts: saved.parts,
            combined: saved.combined,
        };

        let manifest_path = dir.join("manifest.json");
        let json = serde_json::to_string_pretty(&manifest)?;
        std::fs::write(&manifest_path, json).map_err(|source| PipelineError::WriteManifest {
            path: manifest_path.clone(),
            source,
        })?;
        info!(manifest = %manifest_path.display(), "manifest written");

        Ok(manifest)
    }
}

/// Run the byte side of the pipeline without rendering any images.
///
/// Useful for previewing how a file will chunk before committing to QR
/// generation, which dominates the run time for large inputs.
pub fn survey(bytes: &[u8], config: PipelineConfig) -> PipelineResult<StreamStats> {
    config.validate()?;
    let profile = config.profile;

    let compressed = cascade::compress(bytes, profile.cascade_passes, profile.compression_level)?;
    let stream: SymbolStream = config.codec.encode(&compressed);
    let chunks = chunk(&stream, profile.chunk_capacity);

    Ok(StreamStats {
        raw_len: bytes.len(),
        compressed_len: compressed.len(),
        symbol_count: stream.len(),
        chunk_count: chunks.len(),
        oversized_chunks: chunks
            .iter()
            .filter(|c| c.payload_len() > profile.chunk_capacity)
            .count(),
    })
}

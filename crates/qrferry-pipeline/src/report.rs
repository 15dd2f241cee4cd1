use serde::{Deserialize, Serialize};

use qrferry_types::Chunk;

// ---------------------------------------------------------------------------
// StreamStats
// ---------------------------------------------------------------------------

/// Byte- and symbol-level statistics for one pipeline run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamStats {
    /// Length of the raw input in bytes.
    pub raw_len: usize,
    /// Length after the full compression cascade.
    pub compressed_len: usize,
    /// Symbols produced by the codec.
    pub symbol_count: usize,
    /// Chunks the stream was sliced into.
    pub chunk_count: usize,
    /// Chunks whose wire payload exceeds the single-code byte capacity and
    /// will fail generation at the forced version.
    pub oversized_chunks: usize,
}

// ---------------------------------------------------------------------------
// ChunkOutcome
// ---------------------------------------------------------------------------

/// What happened to one chunk during generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChunkStatus {
    /// A QR image was produced.
    Generated,
    /// Generation failed; the chunk is absent from the output set.
    Failed { reason: String },
}

/// Per-chunk record in a generation report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChunkOutcome {
    /// 0-based chunk index.
    pub index: usize,
    /// Symbols in the chunk.
    pub symbols: usize,
    /// Wire payload length in bytes.
    pub payload_len: usize,
    #[serde(flatten)]
    pub status: ChunkStatus,
}

impl ChunkOutcome {
    pub(crate) fn generated(chunk: &Chunk) -> Self {
        Self {
            index: chunk.index(),
            symbols: chunk.len(),
            payload_len: chunk.payload_len(),
            status: ChunkStatus::Generated,
        }
    }

    pub(crate) fn failed(chunk: &Chunk, reason: String) -> Self {
        Self {
            index: chunk.index(),
            symbols: chunk.len(),
            payload_len: chunk.payload_len(),
            status: ChunkStatus::Failed { reason },
        }
    }

    /// Returns `true` if this chunk produced an image.
    pub fn is_generated(&self) -> bool {
        self.status == ChunkStatus::Generated
    }

    /// The failure reason, if generation failed.
    pub fn reason(&self) -> Option<&str> {
        match &self.status {
            ChunkStatus::Generated => None,
            ChunkStatus::Failed { reason } => Some(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationReport
// ---------------------------------------------------------------------------

/// The full account of a load operation: stream statistics plus one outcome
/// per chunk, in chunk order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationReport {
    pub stats: StreamStats,
    pub outcomes: Vec<ChunkOutcome>,
}

impl GenerationReport {
    /// Number of chunks that produced an image.
    pub fn generated(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_generated()).count()
    }

    /// The outcomes of chunks that failed, in chunk order.
    pub fn failures(&self) -> Vec<&ChunkOutcome> {
        self.outcomes.iter().filter(|o| !o.is_generated()).collect()
    }

    /// Returns `true` when every chunk produced an image.
    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.is_generated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrferry_types::Symbol;

    fn chunk(index: usize, len: usize) -> Chunk {
        Chunk::new(index, vec![Symbol::from_bits(1); len])
    }

    #[test]
    fn report_counts_generated_and_failed() {
        let report = GenerationReport {
            stats: StreamStats {
                raw_len: 10,
                compressed_len: 20,
                symbol_count: 15,
                chunk_count: 3,
                oversized_chunks: 1,
            },
            outcomes: vec![
                ChunkOutcome::generated(&chunk(0, 5)),
                ChunkOutcome::failed(&chunk(1, 5), "too big".into()),
                ChunkOutcome::generated(&chunk(2, 5)),
            ],
        };
        assert_eq!(report.generated(), 2);
        assert_eq!(report.failures().len(), 1);
        assert_eq!(report.failures()[0].index, 1);
        assert!(!report.is_complete());
    }

    #[test]
    fn outcome_serializes_with_flat_status() {
        let outcome = ChunkOutcome::failed(&chunk(4, 2), "nope".into());
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"status\":\"failed\""));
        assert!(json.contains("\"index\":4"));
    }
}

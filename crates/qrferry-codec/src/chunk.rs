//! Capacity-bounded slicing of symbol streams.

use qrferry_types::{Chunk, SymbolStream};

/// Split `stream` into consecutive chunks of at most `capacity` symbols.
///
/// Pure slicing: no reordering, no overlap; the final chunk may be shorter.
/// An empty stream yields no chunks.
pub fn chunk(stream: &SymbolStream, capacity: usize) -> Vec<Chunk> {
    assert!(capacity > 0, "chunk capacity must be non-zero");
    stream
        .as_slice()
        .chunks(capacity)
        .enumerate()
        .map(|(index, symbols)| Chunk::new(index, symbols.to_vec()))
        .collect()
}

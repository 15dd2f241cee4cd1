//! Session orchestration for qrferry.
//!
//! Wires the stages into one request-scoped pipeline:
//! raw bytes -> cascade compression -> symbol encoding -> chunking ->
//! per-chunk QR generation -> (on save) image composition.
//!
//! # Key Types
//!
//! - [`Session`] — owns one load operation's images and report
//! - [`PipelineConfig`] — validated run configuration; `Default` is the
//!   interoperable constant set
//! - [`GenerationReport`] / [`ChunkOutcome`] — the typed per-chunk account
//!   a caller gets instead of UI dialogs
//! - [`Manifest`] — what a save produced, including the source digest a
//!   companion decoder verifies against

pub mod config;
pub mod error;
pub mod manifest;
pub mod report;
pub mod session;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use manifest::Manifest;
pub use report::{ChunkOutcome, ChunkStatus, GenerationReport, StreamStats};
pub use session::{survey, Session};

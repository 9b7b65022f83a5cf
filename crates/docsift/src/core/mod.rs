//! Core building blocks of the index.
//!
//! - **Configuration**: [`IndexConfig`] and its loaders
//! - **Formats**: the fixed extension table used for dispatch
//! - **I/O**: directory walking and file metadata
//! - **Pipeline**: extract, classify and stat a single file

pub mod config;
pub mod formats;
pub mod io;
pub mod pipeline;

pub use config::{IndexConfig, SearchConfig};
pub use formats::DocumentFormat;
pub use pipeline::DocumentPipeline;

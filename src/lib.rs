//! Rule-based extraction of the primary insured entity from insurance document text.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod matching;
pub mod metrics;
pub mod pipeline;
pub mod service;
pub mod types;

// Re-export the extraction entry points
pub use error::{ExtractorError, Result};
pub use pipeline::entity::{clean, extend};
pub use pipeline::{extract, Extractor};
pub use types::{Candidate, Extraction, ExtractionResult, Provenance, Tier};

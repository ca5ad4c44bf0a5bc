pub mod analyzer;
pub mod config;
pub mod domain_utils;
pub mod entities;
pub mod extraction;
pub mod features;
pub mod report;
pub mod scoring;
pub mod similarity;

pub use analyzer::{analyze, AnalysisResult, Analyzer};
pub use config::{Config, HeuristicConfig};
pub use entities::{extract, ExtractedEntities, IdnInfo};
pub use extraction::{ExtractionError, TextExtractor};
pub use features::{Finding, Level};
pub use scoring::Verdict;

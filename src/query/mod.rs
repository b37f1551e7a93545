pub mod analyze;
pub mod output;

pub use analyze::{AnalysisResult, AnalyzeRequest, analyze};

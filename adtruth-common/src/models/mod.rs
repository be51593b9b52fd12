// File: adtruth-common/src/models/mod.rs
pub mod analysis;
pub mod verdict;

pub use analysis::{
    AnalysisOutcome, AnalysisRecord, AnalysisRequest, AnalysisResponse, Classification,
    ErrorResponse, NewAnalysisRecord, ResponseStatus, NO_AD_TEXT_MESSAGE, REFERENCE_NOT_FOUND,
};
pub use verdict::{TrustScore, Verdict};

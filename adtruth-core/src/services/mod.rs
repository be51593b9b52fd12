pub mod analysis_service;
pub mod fact_check;

pub use analysis_service::AnalysisService;
pub use fact_check::{
    FactCheckConfig, FactCheckLookup, GoogleFactCheckClient, LookupOutcome, NoResultReason,
};

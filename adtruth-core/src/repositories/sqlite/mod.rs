pub mod analysis_log;

pub use analysis_log::SqliteAnalysisLogRepository;

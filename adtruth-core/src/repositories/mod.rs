// src/repositories/mod.rs

pub use adtruth_common::traits::repository_traits::AnalysisLogRepository;

pub use sqlite::analysis_log::SqliteAnalysisLogRepository;

pub mod sqlite;

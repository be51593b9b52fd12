// src/lib.rs

pub mod config;
pub mod db;
pub mod http;
pub mod repositories;
pub mod services;
pub mod web;

pub use config::AppConfig;
pub use db::Database;
pub use adtruth_common::error::Error;
pub use http::{DefaultHttpClient, HttpClient, HttpResponse};

// File: adtruth-core/tests/test_utils/helpers.rs

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use adtruth_ai::{ChatMessage, ChatOptions, ModelProvider, ProviderKind, VerdictClassifier};
use adtruth_core::repositories::SqliteAnalysisLogRepository;
use adtruth_core::services::{AnalysisService, FactCheckLookup, LookupOutcome};
use adtruth_core::{Database, Error, HttpClient, HttpResponse};

/// Model provider that answers every prompt with a canned reply.
pub struct FakeProvider {
    reply: Result<String, String>,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelProvider for FakeProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Cohere
    }

    async fn chat(&self, messages: Vec<ChatMessage>, _options: ChatOptions) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.extend(messages.into_iter().map(|m| m.content));
        }
        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        }
    }
}

/// Lookup that always returns the same outcome.
pub struct FakeLookup {
    outcome: LookupOutcome,
    pub calls: AtomicUsize,
}

impl FakeLookup {
    pub fn returning(outcome: LookupOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FactCheckLookup for FakeLookup {
    async fn lookup(&self, _claim: &str) -> LookupOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// HTTP client that counts requests and answers with a fixed response.
pub struct FakeHttpClient {
    response: HttpResponse,
    pub calls: AtomicUsize,
}

impl FakeHttpClient {
    pub fn new(response: HttpResponse) -> Arc<Self> {
        Arc::new(Self {
            response,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for FakeHttpClient {
    async fn get(&self, _url: String, _timeout: Duration) -> Result<HttpResponse, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// SQLite-backed log in a throwaway directory. Keep the `TempDir` alive for the test.
pub fn temp_repository() -> Result<(TempDir, SqliteAnalysisLogRepository), Error> {
    let dir = tempfile::tempdir()?;
    let db = Database::new(dir.path().join("history.db"))?;
    Ok((dir, SqliteAnalysisLogRepository::new(db)))
}

pub fn analysis_service(
    provider: Arc<FakeProvider>,
    lookup: Arc<dyn FactCheckLookup>,
    repo: SqliteAnalysisLogRepository,
) -> AnalysisService {
    AnalysisService::new(VerdictClassifier::new(provider), lookup, Arc::new(repo))
}

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use adtruth_ai::{ProviderConfig, ProviderKind};
use adtruth_core::services::FactCheckConfig;
use adtruth_core::{AppConfig, Error};

mod server;

#[derive(Parser, Debug, Clone)]
#[command(name = "adtruth")]
#[command(author, version, about = "AdTruth - ad claim classifier with fact-check lookup")]
struct Args {
    /// Mode: "server" (serve POST /analyze) or "history" (print the analysis log)
    #[arg(long, default_value = "server")]
    mode: String,

    /// Address to which the server will bind
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = adtruth_core::config::DEFAULT_PORT)]
    port: u16,

    /// Path to the SQLite analysis log
    #[arg(long, env = "DATABASE_PATH", default_value = adtruth_core::config::DEFAULT_DATABASE_PATH)]
    db_path: PathBuf,

    /// Generative model backend: "cohere" or "openai"
    #[arg(long, env = "AI_PROVIDER", default_value = "cohere")]
    ai_provider: String,

    /// Model name; defaults to the provider's standard model
    #[arg(long, env = "AI_MODEL")]
    ai_model: Option<String>,

    /// Override the provider's API base URL
    #[arg(long, env = "AI_API_BASE")]
    ai_api_base: Option<String>,

    #[arg(long, env = "COHERE_API_KEY", hide_env_values = true)]
    cohere_api_key: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    #[arg(long, env = "GOOGLE_FACT_CHECK_API_KEY", hide_env_values = true)]
    fact_check_api_key: Option<String>,
}

impl Args {
    fn app_config(&self) -> Result<AppConfig, Error> {
        let kind: ProviderKind = self.ai_provider.parse().map_err(Error::Config)?;

        let api_key = match kind {
            ProviderKind::Cohere => self.cohere_api_key.clone(),
            ProviderKind::OpenAi => self.openai_api_key.clone(),
        };

        let mut ai = ProviderConfig::new(kind, api_key.unwrap_or_default());
        if let Some(model) = self.ai_model.as_ref().filter(|m| !m.trim().is_empty()) {
            ai.default_model = model.trim().to_string();
        }
        ai.api_base = self
            .ai_api_base
            .as_ref()
            .map(|base| base.trim().to_string())
            .filter(|base| !base.is_empty());

        Ok(AppConfig {
            host: self.host,
            port: self.port,
            database_path: self.db_path.clone(),
            ai,
            fact_check: FactCheckConfig::with_api_key(self.fact_check_api_key.clone()),
        })
    }
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("adtruth=info,tower_http=info"));
    let sub = fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(sub)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let args = Args::parse();
    let config = args.app_config()?;
    info!("AdTruth starting. mode={}, ai={}", args.mode, config.ai);

    match args.mode.as_str() {
        "server" => {
            if let Err(e) = server::run_server(config).await {
                error!("Server error: {:?}", e);
                return Err(e.into());
            }
        }
        "history" => {
            server::run_history(config).await?;
        }
        other => {
            error!("Invalid mode '{}'. Use --mode=server or --mode=history.", other);
            anyhow::bail!("invalid mode '{}'", other);
        }
    }
    Ok(())
}

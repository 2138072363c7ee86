use clap::{Parser, ValueEnum};
use local_lead_scraper::config::{AppConfig, DEFAULT_QUERY, load_config};
use local_lead_scraper::pipeline::{Pipeline, Target};
use local_lead_scraper::proxy::ProxyPool;
use local_lead_scraper::scraper::{HttpFactory, SessionFactory, WebDriverFactory};
use local_lead_scraper::storage::JsonStore;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Chrome through a WebDriver server.
    Webdriver,
    /// Plain HTTP requests, no script execution.
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "local-lead-scraper", about = "Scrape local business listings into JSON")]
struct Cli {
    /// Free-text search query
    #[arg(default_value = DEFAULT_QUERY)]
    query: String,

    #[arg(short, long, value_enum, default_value = "maps")]
    target: Target,

    #[arg(short, long, value_enum, default_value = "webdriver")]
    backend: Backend,

    /// Optional JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Newline-separated proxy URIs
    #[arg(long)]
    proxies: Option<String>,

    /// Output directory
    #[arg(short, long)]
    output: Option<String>,

    #[arg(long)]
    webdriver_url: Option<String>,

    #[arg(long)]
    max_pages: Option<u32>,

    #[arg(long)]
    max_attempts: Option<u32>,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.proxies {
            config.proxies_file = path.clone();
        }
        if let Some(dir) = &self.output {
            config.output_dir = dir.clone();
        }
        if let Some(url) = &self.webdriver_url {
            config.webdriver_url = url.clone();
        }
        if let Some(pages) = self.max_pages {
            config.max_pages = pages;
        }
        if let Some(attempts) = self.max_attempts {
            config.max_attempts = attempts;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Config load error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };
    cli.apply(&mut config);

    let pool = match ProxyPool::load(&config.proxies_file) {
        Ok(pool) => pool,
        Err(e) => {
            error!("{}. Please add proxies to {}", e, config.proxies_file);
            return ExitCode::FAILURE;
        }
    };
    info!("Loaded {} proxies", pool.len());

    let factory: Box<dyn SessionFactory> = match cli.backend {
        Backend::Webdriver => Box::new(WebDriverFactory::new(
            config.webdriver_url.clone(),
            config.user_agent.clone(),
            config.headless,
            config.timing.navigation_timeout(),
        )),
        Backend::Http => Box::new(HttpFactory::new(
            config.user_agent.clone(),
            config.timing.navigation_timeout(),
        )),
    };
    let store = JsonStore::new(config.output_dir.clone());

    let pipeline = match Pipeline::new(factory, pool, store, config) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to build parsers: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match pipeline.run(cli.target, &cli.query).await {
        Ok(report) => {
            info!(
                "Job finished: {} listings -> {}",
                report.listings.len(),
                report.file_name
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to save results: {}", e);
            ExitCode::FAILURE
        }
    }
}

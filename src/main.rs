mod cli;
mod crawl;
mod seeds;

use anyhow::Result;
use clap::Parser;
use tracing::warn;

use sitewalk_core::AppConfig;

use crate::cli::{Cli, Commands};
use crate::crawl::run_crawl;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config_str = std::fs::read_to_string(&cli.config).unwrap_or_else(|_| {
        warn!(path = %cli.config, "config file not found, using defaults");
        include_str!("../config/default.toml").to_string()
    });
    let mut config: AppConfig = toml::from_str(&config_str)?;
    apply_env_overrides(&mut config);

    match cli.command {
        Commands::Crawl(args) => {
            run_crawl(config, args).await?;
        }
        Commands::CheckConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(v) = std::env::var("SITEWALK_MAX_DEPTH") {
        if let Ok(n) = v.parse::<u32>() {
            config.crawl.max_depth = n;
        }
    }
    if let Ok(v) = std::env::var("SITEWALK_MAX_PAGES") {
        if let Ok(n) = v.parse::<usize>() {
            config.crawl.max_pages = n;
        }
    }
    if let Ok(v) = std::env::var("SITEWALK_AUTO_FILL_FORMS") {
        config.crawl.auto_fill_forms = v != "0" && v.to_lowercase() != "false";
    }
    if let Ok(v) = std::env::var("CHROME_PATH") {
        config.browser.chrome_path = Some(v);
    }
}

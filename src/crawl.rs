use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{info, warn};

use sitewalk_browser::ChromeSession;
use sitewalk_core::{AppConfig, CrawlReport};
use sitewalk_crawler::Crawler;

use crate::cli::CrawlArgs;
use crate::seeds::{load_form_fields, load_seed_routes};

/// Fold command-line flags into the loaded config. Flags win.
pub fn apply_args(config: &mut AppConfig, args: &CrawlArgs) -> Result<()> {
    if let Some(depth) = args.depth {
        config.crawl.max_depth = depth;
    }
    if let Some(pages) = args.max_pages {
        config.crawl.max_pages = pages;
    }
    config.crawl.include_patterns.extend(args.include.iter().cloned());
    config.crawl.exclude_patterns.extend(args.exclude.iter().cloned());
    if args.no_forms {
        config.crawl.auto_fill_forms = false;
    }
    if let Some(path) = &args.seed_routes {
        config.crawl.seed_routes = Some(load_seed_routes(path)?);
    }
    if let Some(path) = &args.form_fields {
        config.crawl.custom_form_fields = Some(load_form_fields(path)?);
    }
    if let Some(output) = &args.output {
        config.output.report_path = output.clone();
    }
    Ok(())
}

pub async fn run_crawl(mut config: AppConfig, args: CrawlArgs) -> Result<()> {
    apply_args(&mut config, &args)?;

    let session = ChromeSession::launch(&config.browser).context("failed to start browser")?;

    let stop = Arc::new(AtomicBool::new(false));
    let signal_flag = Arc::clone(&stop);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received, stopping after current page");
            signal_flag.store(true, Ordering::Relaxed);
        }
    });

    let mut crawler = Crawler::new(config.crawl.clone(), config.timing.clone(), session).with_cancel(stop);
    let report = crawler.run(&args.url).await?;

    write_report(&report, &config.output.report_path)?;
    print_summary(&report, &config.output.report_path);
    Ok(())
}

fn write_report(report: &CrawlReport, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("failed to write report to {}", path))?;
    Ok(())
}

fn print_summary(report: &CrawlReport, path: &str) {
    let elapsed = report.finished_at - report.started_at;
    println!(
        "Crawl of {} finished ({}) in {}s",
        report.start_url,
        report.termination,
        elapsed.num_seconds()
    );
    println!("  discovered: {}", report.pages.len());
    println!("  visited:    {}", report.visited_count);
    println!("  form pairs: {}", report.form_pairs().count());
    println!(
        "  skipped:    {} visited, {} too deep, {} filtered, {} unreachable",
        report.skipped.already_visited,
        report.skipped.too_deep,
        report.skipped.filtered,
        report.skipped.navigation_failed
    );
    for page in &report.pages {
        match &page.form_interaction {
            Some(form) => println!("  [{}] {} -> {}", page.depth, page.url, form.after_url),
            None => println!("  [{}] {}", page.depth, page.url),
        }
    }
    if report.pages.is_empty() {
        warn!("no pages discovered");
    }
    println!("Report written to {}", path);
}

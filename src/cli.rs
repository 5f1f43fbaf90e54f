use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sitewalk", about = "Browser-driven site crawler with form interaction")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl a site breadth-first from a start URL
    Crawl(CrawlArgs),
    /// Print the effective configuration (file + environment) and exit
    CheckConfig,
}

#[derive(Args, Debug, Default)]
pub struct CrawlArgs {
    /// Start URL
    pub url: String,

    /// Maximum link depth from the start URL
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Stop after this many pages
    #[arg(short = 'p', long)]
    pub max_pages: Option<usize>,

    /// Only crawl URLs containing this substring (repeatable)
    #[arg(short, long)]
    pub include: Vec<String>,

    /// Never crawl URLs containing this substring (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Do not fill or submit forms
    #[arg(long)]
    pub no_forms: bool,

    /// Extra routes to seed at depth 0 (JSON array or one per line)
    #[arg(long)]
    pub seed_routes: Option<String>,

    /// Form values to use instead of generated ones (JSON array of {selector, value})
    #[arg(long)]
    pub form_fields: Option<String>,

    /// Report output file
    #[arg(short, long)]
    pub output: Option<String>,
}

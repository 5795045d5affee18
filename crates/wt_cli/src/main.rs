use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use wt_core::{sample_report, AnalysisSource, Result, TrustReport};
use wt_scrappers::logging::init_logging;
use wt_scrappers::SourceArgs;
use wt_web::bootstrap::{DEFAULT_MOUNT_ID, DEFAULT_TEMPLATE};
use wt_web::{AppState, AssetSet, PageShell};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "WikiTrust Index: how far can a wiki article be trusted",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    source: SourceArgs,
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the API and the report page
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
        /// Answer with an error instead of the sample when the wiki is unreachable
        #[arg(long)]
        no_fallback: bool,
        /// Page template to mount the report into (defaults to the built-in page)
        #[arg(long)]
        template: Option<PathBuf>,
        /// Id of the element the report is mounted into
        #[arg(long, default_value = DEFAULT_MOUNT_ID)]
        mount_id: String,
    },
    /// Analyze one article and print the report
    Analyze {
        title: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the built-in sample report
    Sample {
        #[arg(long)]
        json: bool,
    },
}

fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read page template: {}", path.display()))?),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

fn print_report(report: &TrustReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let a = &report.analysis;
    println!("📰 {} ({})", a.title, a.url);
    println!("   type: {}{}", a.content_type, if a.is_stub { ", stub" } else { "" });
    println!("🤖 AI content risk: {:.0}%", a.ai_content_risk * 100.0);
    println!(
        "🔗 {} internal, {} external, {} broken",
        a.total_links_internal, a.total_links_external, a.broken_links_count
    );
    for link in &a.broken_external_links {
        println!("   💔 {}", link);
    }
    match (a.birth_year, a.death_year) {
        (Some(born), Some(died)) => println!("👤 {} to {}", born, died),
        (Some(born), None) => println!("👤 born {}", born),
        (None, Some(died)) => println!("👤 died {}", died),
        (None, None) => {}
    }
    if !a.categories.is_empty() {
        println!("🏷️  {}", a.categories.join(", "));
    }
    println!("\n{}\n", a.ai_explanation);
    for (i, item) in report.recommendations.iter().enumerate() {
        println!("{}. {}", i + 1, item);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { Level::DEBUG } else { Level::INFO });

    match cli.command {
        Commands::Serve {
            addr,
            no_fallback,
            template,
            mount_id,
        } => {
            let template = load_template(template.as_deref())?;
            let shell = PageShell::bootstrap(&template, &mount_id, AssetSet::default())?;
            let source = cli.source.create_source()?;
            info!("🧠 Analysis source ready (using {})", source.name());

            let mut state = AppState::new(source, shell);
            if no_fallback {
                state = state.without_fallback();
            }
            let app = wt_web::create_app(state).await;

            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("🌐 Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Analyze { title, json } => {
            let source = cli.source.create_source()?;
            info!("🔍 Analyzing {:?} (using {})", title, source.name());
            let report = source.analyze(&title).await?;
            print_report(&report, json)?;
        }
        Commands::Sample { json } => {
            print_report(&sample_report(), json)?;
        }
    }

    Ok(())
}

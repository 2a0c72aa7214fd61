mod config;
mod csv_source;
mod db;
mod export;
mod normalize;
mod site;
mod sitemap;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use config::SiteConfig;

#[derive(Parser)]
#[command(name = "pulse_gen", about = "Static site generator for the fractional executive job board")]
struct Cli {
    /// Directory holding jobs.json / market_stats.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    /// Output directory for generated pages
    #[arg(long, default_value = "site")]
    site_dir: PathBuf,
    /// Canonical site origin (no trailing slash)
    #[arg(long, default_value = "https://fractionalpulse.com")]
    base_url: String,
    /// Google Analytics 4 measurement ID (empty disables)
    #[arg(long, default_value = "")]
    ga4_id: String,
    /// Microsoft Clarity project ID (empty disables)
    #[arg(long, default_value = "")]
    clarity_id: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize source records into jobs.json + market_stats.json
    Export {
        /// SQLite database of scraped listings
        #[arg(long, default_value = "data/fractional_jobs.db")]
        db: PathBuf,
        /// Read a JobSpy-style CSV instead of the database
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Generate the homepage
    Home,
    /// Generate the /jobs/ board page
    Board,
    /// Generate one detail page per job
    Pages,
    /// Generate sitemaps and robots.txt
    Sitemap,
    /// Export + all page generation in one pipeline
    Build {
        #[arg(long, default_value = "data/fractional_jobs.db")]
        db: PathBuf,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show export statistics
    Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let cfg = SiteConfig {
        base_url: cli.base_url.trim_end_matches('/').to_string(),
        data_dir: cli.data_dir,
        site_dir: cli.site_dir,
        ga4_id: cli.ga4_id,
        clarity_id: cli.clarity_id,
        ..SiteConfig::default()
    };

    let result = match cli.command {
        Commands::Export { db, csv } => run_export(&cfg, &db, csv.as_deref()),
        Commands::Home => {
            let path = site::home::generate(&cfg)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Commands::Board => {
            let path = site::board::generate(&cfg)?;
            println!("Wrote {}", path.display());
            Ok(())
        }
        Commands::Pages => {
            let count = site::job_pages::generate(&cfg)?;
            println!("Wrote {} job pages under {}", count, cfg.site_dir.join("jobs").display());
            Ok(())
        }
        Commands::Sitemap => {
            let bundle = site::load_bundle(&cfg.data_dir)?;
            let urls = sitemap::generate(&cfg, &bundle)?;
            println!(
                "Wrote sitemaps ({} URLs) and robots.txt to {}",
                urls,
                cfg.site_dir.display()
            );
            Ok(())
        }
        Commands::Build { db, csv } => {
            run_export(&cfg, &db, csv.as_deref())?;
            site::home::generate(&cfg)?;
            site::board::generate(&cfg)?;
            let pages = site::job_pages::generate(&cfg)?;
            let bundle = site::load_bundle(&cfg.data_dir)?;
            sitemap::generate(&cfg, &bundle)?;
            println!(
                "Built site: homepage, board, {} job pages, sitemaps -> {}",
                pages,
                cfg.site_dir.display()
            );
            Ok(())
        }
        Commands::Stats => {
            let bundle = site::load_bundle(&cfg.data_dir)?;
            println!("Total jobs:    {}", bundle.total_jobs);
            println!("C-Level:       {}", bundle.stats.c_level);
            println!("VP-Level:      {}", bundle.stats.vp_level);
            println!("With salary:   {}", bundle.stats.with_salary);
            println!("Last updated:  {}", bundle.last_updated);
            if let Some(stats) = site::load_market_stats(&cfg.data_dir) {
                match stats.compensation.avg_hourly_rate {
                    Some(avg) => println!("Avg hourly:    ${:.0}", avg),
                    None => println!("Avg hourly:    n/a"),
                }
                println!(
                    "Disclosure:    {:.1}% ({} rates)",
                    stats.compensation.disclosure_rate, stats.compensation.sample_size
                );
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn run_export(cfg: &SiteConfig, db_path: &std::path::Path, csv: Option<&std::path::Path>) -> anyhow::Result<()> {
    let (bundle, stats) = match csv {
        Some(csv_path) => {
            let records = csv_source::read_records(csv_path)?;
            let bundle = export::bundle_from_csv(&records);
            let stats = export::market_stats_from_bundle(&bundle);
            (bundle, stats)
        }
        None => {
            let conn = db::connect(db_path)?;
            db::init_schema(&conn)?;
            let bundle = export::bundle_from_db(&conn)?;
            let stats = export::market_stats_from_db(&conn)?;
            (bundle, stats)
        }
    };

    let jobs_path = export::write_bundle(&bundle, &cfg.data_dir)?;
    let stats_path = export::write_market_stats(&stats, &cfg.data_dir)?;

    println!("Exported {} jobs to {}", bundle.total_jobs, jobs_path.display());
    println!(
        "  C-Level: {} | VP-Level: {} | With salary: {}",
        bundle.stats.c_level, bundle.stats.vp_level, bundle.stats.with_salary
    );
    println!("Market stats to {}", stats_path.display());
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use laptop_specs::db::{self, SqliteSink};
use laptop_specs::parser::{extract_detailed, overrides};
use laptop_specs::pipeline;
use laptop_specs::settings::Settings;
use laptop_specs::sink::{JsonLinesSink, RecordSink};
use laptop_specs::source::read_rows;
use laptop_specs::RawRow;

#[derive(Parser)]
#[command(name = "laptop_specs", about = "Extract laptop specs from scraped retail listings")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every row of a JSON Lines listing dump
    Run {
        /// Input file, or "-" for stdin
        #[arg(default_value = "-")]
        input: String,
        /// Write records as JSON Lines here (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also store records in SQLite
        #[arg(long)]
        db: bool,
        /// SQLite path (implies --db)
        #[arg(long)]
        db_path: Option<PathBuf>,
        /// Max rows to read
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Extract on one thread
        #[arg(long)]
        sequential: bool,
    },
    /// Extract a single listing and print the record
    Check {
        #[arg(long)]
        intro: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        url: String,
    },
    /// List the hand-maintained product overrides
    Overrides,
    /// Show stored record statistics
    Stats {
        #[arg(long)]
        db_path: Option<PathBuf>,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    let t0 = Instant::now();

    match cli.command {
        Commands::Run {
            input,
            output,
            db,
            db_path,
            limit,
            sequential,
        } => {
            let mut settings = settings;
            if sequential {
                settings.parallel = false;
            }

            let reader: Box<dyn BufRead> = if input == "-" {
                Box::new(BufReader::new(io::stdin()))
            } else {
                let file = File::open(&input).with_context(|| format!("Failed to open {}", input))?;
                Box::new(BufReader::new(file))
            };
            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(
                    File::create(path).with_context(|| format!("Failed to create {:?}", path))?,
                )),
                None => {
                    settings.progress = false;
                    Box::new(BufWriter::new(io::stdout()))
                }
            };

            let mut sinks: Vec<Box<dyn RecordSink>> = vec![Box::new(JsonLinesSink::new(writer))];
            if db || db_path.is_some() {
                let path = db_path.unwrap_or_else(|| settings.db_path.clone());
                eprintln!("Database: {:?}", path);
                sinks.push(Box::new(SqliteSink::open(&path, settings.chunk_size)?));
            }

            let rows = read_rows(reader).take(limit.unwrap_or(usize::MAX));
            let stats = pipeline::run(rows, &mut sinks, &settings)?;
            eprintln!(
                "Done: {} rows ({} extracted, {} skipped, {} warnings) in {:.1}s",
                stats.total,
                stats.extracted,
                stats.skipped,
                stats.warnings,
                t0.elapsed().as_secs_f64()
            );
        }
        Commands::Check { intro, price, url } => {
            let row = RawRow::new(intro, price, url);
            match extract_detailed(&row) {
                Ok(ex) => {
                    println!("{}", serde_json::to_string_pretty(&ex.record)?);
                    for w in &ex.warnings {
                        eprintln!("warning: {}", w);
                    }
                }
                Err(skip) => eprintln!("skipped: {}", skip.reason()),
            }
        }
        Commands::Overrides => {
            for entry in overrides::OVERRIDES {
                println!("{:<45} {}", entry.name, entry.patched_fields().join(", "));
            }
            println!("\n{} overrides", overrides::OVERRIDES.len());
        }
        Commands::Stats { db_path } => {
            let path = db_path.unwrap_or(settings.db_path);
            let conn = db::connect(&path)?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Laptops:         {}", s.laptops);
            println!("Skipped rows:    {}", s.skips);
            println!("Discrete GPUs:   {}", s.discrete_gpus);
            println!("Storage devices: {}", s.storage_devices);
            if !s.by_brand.is_empty() {
                println!("\n--- Brands ---");
                for (brand, n) in &s.by_brand {
                    println!("  {:<12} {:>4}", brand, n);
                }
            }
        }
    }

    Ok(())
}

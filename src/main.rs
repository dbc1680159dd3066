use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::{error, info};

use insured_extractor::config::Config;
use insured_extractor::logging;
use insured_extractor::matching::find_best_match;
use insured_extractor::service::{ChatRequest, ExtractionService};
use insured_extractor::{Extractor, Provenance, Tier};

#[derive(Parser)]
#[command(name = "insured_extractor")]
#[command(about = "Extract the primary insured entity from insurance document text")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to $INSURED_EXTRACTOR_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the insured entity from files, or from stdin when none are given
    Extract {
        files: Vec<PathBuf>,
        /// Print which stage produced the result
        #[arg(long)]
        explain: bool,
        /// Print the JSON response body a transport would return
        #[arg(long, conflicts_with = "explain")]
        json: bool,
    },
    /// Look up a name in the configured insured registry
    Match {
        #[arg(long)]
        name: String,
    },
    /// List the matching rules in evaluation order
    Rules,
}

fn read_documents(files: &[PathBuf]) -> anyhow::Result<Vec<(String, String)>> {
    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read document from stdin")?;
        return Ok(vec![("<stdin>".to_string(), text)]);
    }
    files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            Ok((path.display().to_string(), text))
        })
        .collect()
}

fn print_explanation(label: &str, extractor: &Extractor, text: &str) {
    let extraction = extractor.extract_detailed(text);
    println!("{}: {}", label, extraction.result);
    match &extraction.provenance {
        Provenance::Degenerate => println!("   stage: normalizer (PDF metadata)"),
        Provenance::Rule { tier, rule } => println!("   stage: {} rule '{}'", tier, rule),
        Provenance::Ranked { score, candidates } => {
            println!("   stage: ranker (score {:.2})", score);
            for candidate in candidates {
                println!("     {:>5.2}  {}", candidate.score, candidate.name);
            }
        }
        Provenance::NoMatch => println!("   stage: no candidates"),
    }
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Extract { files, explain, json } => {
            let documents = read_documents(&files)?;
            info!("Extracting from {} document(s)", documents.len());

            if json {
                let service = ExtractionService::new(config.service)?;
                for (label, text) in documents {
                    match service.handle(&ChatRequest::new(text)) {
                        Ok(response) => println!("{}", serde_json::to_string(&response)?),
                        Err(e) => {
                            error!("Extraction failed for {}: {}", label, e);
                            return Err(e.into());
                        }
                    }
                }
                return Ok(());
            }

            let extractor = Extractor::new()?;
            for (label, text) in documents {
                if explain {
                    print_explanation(&label, &extractor, &text);
                } else {
                    println!("{}", extractor.extract(&text));
                }
            }
        }
        Commands::Match { name } => {
            let result = find_best_match(&name, &config.insureds, config.matching.threshold);
            if result.is_match() {
                println!("{} ({}) confidence {:.2}", result.name, result.internal_id, result.confidence);
            } else {
                println!("{}", result.name);
            }
        }
        Commands::Rules => {
            let extractor = Extractor::new()?;
            for tier in Tier::ALL {
                println!("{}", tier);
                for rule in extractor.rules().tier(tier) {
                    println!("   {}", rule.id);
                }
            }
        }
    }

    Ok(())
}

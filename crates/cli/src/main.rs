use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use naf_cli::report;
use naf_core::config;
use naf_core::models::{parse_rank, EntityKind, ItemKind};
use naf_core::query::{rank_items, with_arg, Analyzer, Outcome};
use serde::Serialize;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("loading configuration")?;
    info!("corpus root: {}", cfg.corpus.root);
    let analyzer = Analyzer::from_config(&cfg).context("preparing corpus")?;
    let json = cli.json;

    match cli.command {
        Commands::Files { select } => emit(
            analyzer.select_files(&select.program, &select.language)?,
            json,
            |files| report::files(files),
        ),
        Commands::Frequency { kind, top, select } => {
            let label = kind.clone();
            let outcome = with_arg(kind.parse::<ItemKind>(), |kind| {
                analyzer.frequency(kind, &select.program, &select.language)
            })?;
            emit(
                map(outcome, |counter| {
                    rank_items(&counter, top.unwrap_or(counter.len()))
                }),
                json,
                |rows| report::ranked_table(&capitalize(&label), rows),
            )
        }
        Commands::Average { kind, select } => emit(
            with_arg(kind.parse::<ItemKind>(), |kind| {
                analyzer.average_items(kind, &select.program, &select.language)
            })?,
            json,
            |v| report::number(*v),
        ),
        Commands::Sentences { select } => emit(
            analyzer.average_sentences(&select.program, &select.language)?,
            json,
            |v| report::number(*v),
        ),
        Commands::Ttr { select } => emit(
            analyzer.type_token_ratio(&select.program, &select.language)?,
            json,
            |v| report::number(*v),
        ),
        Commands::Longest { rank, select } => emit(
            with_arg(parse_rank(&rank), |rank| {
                analyzer.longest_sentences(rank, &select.program, &select.language)
            })?,
            json,
            |sentences| report::longest_sentences(sentences),
        ),
        Commands::Entities {
            entity_type,
            rank,
            select,
        } => {
            let args = entity_type
                .parse::<EntityKind>()
                .and_then(|kind| parse_rank(&rank).map(|rank| (kind, rank)));
            emit(
                with_arg(args, |(kind, rank)| {
                    analyzer.most_common_entities(kind, rank, &select.program, &select.language)
                })?,
                json,
                |rows| report::ranked_table("Entity", rows),
            )
        }
        Commands::EntityFreq {
            entity_type,
            top,
            select,
        } => {
            let kind = entity_type.as_deref().map(str::parse::<EntityKind>).transpose();
            let outcome = with_arg(kind, |kind| {
                analyzer.entity_frequency(kind, &select.program, &select.language)
            })?;
            emit(
                map(outcome, |counter| {
                    rank_items(&counter, top.unwrap_or(counter.len()))
                }),
                json,
                |rows| report::ranked_table("Entity", rows),
            )
        }
    }
}

/// Prints an answer to stdout, or the reason it was rejected to stderr.
/// Rejections are not failures: the process still exits successfully.
fn emit<T: Serialize>(outcome: Outcome<T>, json: bool, text: impl FnOnce(&T) -> String) -> Result<()> {
    match outcome {
        Outcome::Answer(value) => {
            let rendered = if json {
                report::json(&value)?
            } else {
                text(&value)
            };
            print!("{}", rendered);
        }
        Outcome::Rejected(reason) => eprintln!("{}", reason),
    }
    Ok(())
}

fn map<T, U>(outcome: Outcome<T>, f: impl FnOnce(T) -> U) -> Outcome<U> {
    match outcome {
        Outcome::Answer(v) => Outcome::Answer(f(v)),
        Outcome::Rejected(e) => Outcome::Rejected(e),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Parser)]
#[command(name = "naf-stats")]
#[command(about = "Descriptive statistics over a NAF thesis corpus", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Selection {
    /// Program codes (comma-separated), e.g. arch,tlw
    #[arg(short, long, value_delimiter = ',', num_args = 1.., required = true)]
    program: Vec<String>,
    /// Languages (comma-separated): en, nl
    #[arg(short, long, value_delimiter = ',', num_args = 1.., required = true)]
    language: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the documents selected by program and language
    Files {
        #[command(flatten)]
        select: Selection,
    },
    /// Token or type frequency table
    Frequency {
        /// token|type
        #[arg(short, long)]
        kind: String,
        /// Only show the N most frequent items
        #[arg(long)]
        top: Option<usize>,
        #[command(flatten)]
        select: Selection,
    },
    /// Average number of tokens or types per document
    Average {
        /// token|type
        #[arg(short, long)]
        kind: String,
        #[command(flatten)]
        select: Selection,
    },
    /// Average number of sentences per document
    Sentences {
        #[command(flatten)]
        select: Selection,
    },
    /// Type-token ratio
    Ttr {
        #[command(flatten)]
        select: Selection,
    },
    /// Longest sentences, ties at the cut-off length included
    Longest {
        /// How many sentences to show at least
        #[arg(short, long)]
        rank: String,
        #[command(flatten)]
        select: Selection,
    },
    /// Most common entities of one type
    Entities {
        /// person|place
        #[arg(short = 't', long = "type")]
        entity_type: String,
        /// How many entities to show
        #[arg(short, long)]
        rank: String,
        #[command(flatten)]
        select: Selection,
    },
    /// Entity frequency table, optionally restricted to one type
    EntityFreq {
        /// person|place
        #[arg(short = 't', long = "type")]
        entity_type: Option<String>,
        /// Only show the N most frequent entities
        #[arg(long)]
        top: Option<usize>,
        #[command(flatten)]
        select: Selection,
    },
}

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use caseclock_core::{Category, evaluate};
use caseclock_sync::{CandidateSource, HttpSource, JsonFileSource, gather};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};

mod display;

#[derive(Parser)]
#[command(name = "caseclock", version, about = "Unify case deadlines and score deadline risk")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate candidate files exported by the domain calculators.
    Evaluate {
        /// Court / CPR deadlines (JSON array).
        #[arg(long)]
        court: Option<PathBuf>,
        /// Housing-disrepair deadlines (JSON array).
        #[arg(long)]
        housing: Option<PathBuf>,
        /// Limitation-period deadlines (JSON array).
        #[arg(long)]
        limitation: Option<PathBuf>,
        /// Manually created deadlines (JSON array).
        #[arg(long)]
        manual: Option<PathBuf>,
        /// Keep only this case's deadlines (plus domain-global ones).
        #[arg(long, default_value = "")]
        case_id: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Pull one case's candidates from an HTTP upstream and evaluate them.
    Pull {
        #[arg(long, env = "CASECLOCK_BASE_URL")]
        base_url: String,
        #[arg(long)]
        case_id: String,
        /// Per-request timeout for each domain endpoint.
        #[arg(long, default_value_t = 10)]
        timeout_secs: u64,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args)]
struct OutputArgs {
    /// Evaluation instant (RFC 3339). Defaults to the current time.
    #[arg(long, env = "CASECLOCK_NOW", value_parser = parse_now)]
    now: Option<DateTime<Utc>>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Exit non-zero if any source failed.
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn parse_now(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    tracing::debug!("caseclock v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Evaluate {
            court,
            housing,
            limitation,
            manual,
            case_id,
            output,
        } => {
            let sources: Vec<Box<dyn CandidateSource>> = [
                (Category::Court, court),
                (Category::Housing, housing),
                (Category::Limitation, limitation),
                (Category::Manual, manual),
            ]
            .into_iter()
            .filter_map(|(category, path)| path.map(|p| JsonFileSource::new(category, p)))
            .map(|s| Box::new(s) as Box<dyn CandidateSource>)
            .collect();
            run(&sources, &case_id, &output).await
        }
        Command::Pull {
            base_url,
            case_id,
            timeout_secs,
            output,
        } => {
            let timeout = Duration::from_secs(timeout_secs);
            let mut sources: Vec<Box<dyn CandidateSource>> = Vec::new();
            for category in Category::ALL {
                let source = HttpSource::new(&base_url, category, timeout)
                    .with_context(|| format!("configuring {} source", category.as_str()))?;
                sources.push(Box::new(source));
            }
            run(&sources, &case_id, &output).await
        }
    }
}

async fn run(
    sources: &[Box<dyn CandidateSource>],
    case_id: &str,
    output: &OutputArgs,
) -> anyhow::Result<()> {
    // The one clock read for this evaluation.
    let now = output.now.unwrap_or_else(Utc::now);

    let gathered = gather(sources, case_id).await;
    let complete = gathered.is_complete();
    let failures = gathered.failures;
    let evaluation = evaluate(gathered.candidates, now);

    match output.format {
        Format::Json => {
            let json =
                serde_json::to_string_pretty(&evaluation).context("serialising evaluation")?;
            println!("{json}");
            for f in &failures {
                eprintln!("warning: {} failed: {}", f.name, f.error);
            }
        }
        Format::Text => print!("{}", display::Report::new(&evaluation, &failures)),
    }

    if output.strict && !complete {
        anyhow::bail!("{} deadline source(s) failed", failures.len());
    }
    Ok(())
}

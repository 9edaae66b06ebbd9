use anyhow::{Context, Result, bail};
use clap::Parser;
use resolock::{GraphModel, Resolock, detect, prevention};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Resolock - Resource Allocation Graph Deadlock Analyzer"
)]
struct Cli {
    /// Path to a saved graph model (JSON)
    model_file: PathBuf,

    /// Apply the Nth proposed strategy (1-based) and re-run detection
    #[arg(long, value_name = "N")]
    apply: Option<usize>,

    /// Write analysis events to the given log file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let builder = Resolock::new();
    let builder = match &cli.log {
        Some(path) => builder.with_log(path),
        None => builder,
    };
    builder.start()?;

    let text = fs::read_to_string(&cli.model_file)
        .with_context(|| format!("Failed to read {}", cli.model_file.display()))?;
    let model = GraphModel::from_json(&text)?;

    let result = detect(&model);
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.deadlock {
        return Ok(());
    }

    let strategies = prevention::propose(&model, &result.cycle);
    eprintln!("Proposed strategies:");
    for (index, strategy) in strategies.iter().enumerate() {
        eprintln!("  [{}] {}: {}", index + 1, strategy.title, strategy.description);
    }

    if let Some(choice) = cli.apply {
        let Some(strategy) = choice.checked_sub(1).and_then(|i| strategies.get(i)) else {
            bail!(
                "No strategy {} (proposed 1..={})",
                choice,
                strategies.len()
            );
        };
        let next = prevention::apply(&model, strategy);
        let after = detect(&next);
        println!("{}", next.to_json()?);
        println!("{}", serde_json::to_string_pretty(&after)?);
    }

    Ok(())
}

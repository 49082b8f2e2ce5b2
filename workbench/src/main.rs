use anyhow::Context;
use clap::Parser;
use generator::profile::build_population;
use report::WorkflowSummary;
use std::fs;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Spectral preprocessing workflow driver")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Number of synthetic spectra to generate
    #[arg(long, default_value_t = 40)]
    count: usize,
    /// Points per synthetic spectrum
    #[arg(long, default_value_t = 256)]
    points: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Kennard-Stone subset size (-1 keeps everything)
    #[arg(long, allow_negative_numbers = true)]
    subset: Option<i64>,
    /// Write the JSON summary here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
    /// Include the selected spectra in the summary
    #[arg(long, default_value_t = false)]
    emit_spectra: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workflow_config = if let Some(path) = args.workflow {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.count, args.points, args.seed, args.subset)
    };

    let spectra = build_population(&workflow_config.generator)?;
    let runner = Runner::new(workflow_config.clone());
    let result = runner.execute(&spectra)?;

    log::info!(
        "workflow -> processed {}, selected {}, failures {}",
        result.processed.len(),
        result.selected.len(),
        result.pipeline_metrics.failed
    );

    let summary = WorkflowSummary::new(&workflow_config, spectra.len(), &result, args.emit_spectra);
    let json = serde_json::to_string_pretty(&summary).context("serializing workflow summary")?;

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, json)
                .with_context(|| format!("writing summary to {}", path.display()))?;
        }
        None => println!("{}", json),
    }

    Ok(())
}

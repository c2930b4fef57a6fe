use anyhow::Context;
use clap::{Parser, Subcommand};
use triest_graph::prelude::*;
use triest_graph::streaming::read_edge_stream;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "triest")]
#[command(about = "Fixed-memory triangle count estimation over edge streams")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream an edge list through the estimator and print its state
    Estimate {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        memory: Option<usize>,
        #[arg(short, long)]
        seed: Option<u64>,
        /// JSON file with `memory_size` and `seed`; flags take precedence
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Count the triangles of the streamed graph exactly
    Exact {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Run repeated estimates over a range of memory sizes
    Experiment {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,
        #[arg(short, long)]
        trials: Option<usize>,
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate { input, memory, seed, config, json } => {
            let mut triest_config = match config {
                Some(path) => TriestConfig::from_json_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => TriestConfig::default(),
            };
            if let Some(memory) = memory {
                triest_config.memory_size = memory;
            }
            if seed.is_some() {
                triest_config.seed = seed;
            }

            let mut triest = FullyDynamicTriest::<u64>::from_config(&triest_config)?;
            let reader = EdgeStreamReader::<_, u64>::open(&input)
                .with_context(|| format!("opening {}", input.display()))?;
            let mut sample_changes = 0usize;
            for event in reader {
                if triest.ingest(event?).mutated_sample() {
                    sample_changes += 1;
                }
            }
            log::info!(
                "{} events processed, {} changed the sample",
                triest.time(),
                sample_changes
            );

            let stats = triest.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print!("{}", stats);
            }
        }
        Commands::Exact { input } => {
            let mut exact = ExactTriangleCount::<u64>::new();
            let reader = EdgeStreamReader::<_, u64>::open(&input)
                .with_context(|| format!("opening {}", input.display()))?;
            for event in reader {
                exact.apply(event?);
            }

            println!("Edges = {}", exact.edge_count());
            println!("Triangles = {}", exact.triangles());
        }
        Commands::Experiment { input, sizes, trials, seed, config, output } => {
            let mut experiment = match config {
                Some(path) => ExperimentConfig::from_json_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => ExperimentConfig::default(),
            };
            if let Some(sizes) = sizes {
                experiment.memory_sizes = sizes;
            }
            if let Some(trials) = trials {
                experiment.trials = trials;
            }
            if seed.is_some() {
                experiment.seed = seed;
            }

            let events = read_edge_stream(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let result = run_memory_sweep(&events, &experiment)?;
            let rendered = result.to_json()?;

            match output {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", rendered),
            }
        }
    }

    Ok(())
}

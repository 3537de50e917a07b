use clap::{Parser, Subcommand};
use dotenv::dotenv;
use picklogic_rs::logic::{EngineConfig, LogicContext, LogicLoader, PickableSpec, Picker};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine configuration file (YAML or JSON)
    #[arg(short, long, global = true, env = "PICKLOGIC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the readable criteria of every pickable
    Readout {
        /// Path to the pickables file
        #[arg(short, long)]
        pickables: PathBuf,
    },
    /// Pick the first matching pickable for a data bag
    Pick {
        /// Path to the pickables file
        #[arg(short, long)]
        pickables: PathBuf,

        /// Path to the data bag file
        #[arg(short, long)]
        data: PathBuf,

        /// Pickable ids to skip
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Key used by conditions without a dataKey
        #[arg(long)]
        default_key: Option<String>,
    },
    /// Fill {HELPERS.<name>} placeholders in a text
    Template {
        /// The text to fill
        #[arg(short, long)]
        text: String,

        /// Path to the data bag file
        #[arg(short, long)]
        data: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let loader = LogicLoader::new();

    let config = match &args.config {
        Some(path) => {
            log::info!("Using config: {}", path.display());
            loader.load_config(path)?
        }
        None => EngineConfig::default(),
    };
    let context = LogicContext::from_config(&config);

    match args.command {
        Commands::Readout { pickables } => {
            let set = loader.load_pickables(&pickables)?;
            let default_key = set.default_key.or_else(|| config.default_key.clone());
            let picker = Picker::new(set.pickables, default_key.as_deref()).with_context(context);

            let readouts = picker.readouts_with_localized(None)?;
            for (spec, readout) in picker.pickables().iter().zip(readouts) {
                println!("[{}]", readout.name.as_deref().unwrap_or(&readout.id));
                for line in &readout.readouts {
                    println!("  {} {}", line.conjunction, line.condition_string);
                }
                println!("  ----> {}", payload_summary(spec)?);
            }
        }
        Commands::Pick {
            pickables,
            data,
            exclude,
            default_key,
        } => {
            let set = loader.load_pickables(&pickables)?;
            let data = loader.load_data(&data)?;
            let default_key = default_key
                .or(set.default_key)
                .or_else(|| config.default_key.clone());
            log::info!(
                "Picking among {} pickables with {} datapoints",
                set.pickables.len(),
                data.len()
            );

            let picker = Picker::new(set.pickables, default_key.as_deref()).with_context(context);
            match picker.pick_for_data(&data, Some(exclude.as_slice()))? {
                Some(spec) => {
                    println!("Picked: {}", spec.id);
                    println!("{}", serde_json::to_string_pretty(&spec.payload)?);
                }
                None => println!("No pickable matched"),
            }
        }
        Commands::Template { text, data } => {
            let data = loader.load_data(&data)?;
            let filled = context.registry().fill_template(&text, &data)?;
            println!("{}", filled.unwrap_or_default());
        }
    }

    Ok(())
}

fn payload_summary(spec: &PickableSpec) -> Result<String, serde_json::Error> {
    match spec.message() {
        Some(message) => Ok(message.to_string()),
        None => serde_json::to_string(&spec.payload),
    }
}

//! ftl-convert - FTL model conversion tool
//!
//! Converts FTL engine models to OBJ/MTL and back, and imports glTF scenes.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ftl_convert::{
    convert_file, ftl_summary, load_ftl, run_batch, BatchManifest, ConvertOptions, ConvertOutcome,
    MissingTexturePolicy,
};

#[derive(Parser)]
#[command(name = "ftl-convert")]
#[command(about = "FTL model conversion tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single model file (.ftl, .obj, .gltf, .glb)
    Convert {
        /// Input model file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (.ftl or .obj); derived from the input when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Game data directory used to resolve texture names
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// What to write for textures that cannot be found
        #[arg(long, value_enum, default_value_t = MissingTexturePolicy::Placeholder)]
        missing_textures: MissingTexturePolicy,

        /// Do not copy textures
        #[arg(long)]
        no_textures: bool,
    },

    /// Run every job of a batch manifest
    Batch {
        /// Path to the batch manifest
        manifest: PathBuf,
    },

    /// Validate a batch manifest without converting
    Check {
        /// Path to the batch manifest
        manifest: PathBuf,
    },

    /// Print a summary of an FTL file
    Info {
        /// Input .ftl file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            data_dir,
            missing_textures,
            no_textures,
        } => {
            let options = ConvertOptions {
                data_dir,
                missing_textures,
                copy_textures: !no_textures,
            };
            match convert_file(&input, output.as_deref(), &options)? {
                ConvertOutcome::Converted(report) => {
                    tracing::info!("Wrote {:?}", report.output);
                }
                ConvertOutcome::Skipped { .. } => {}
            }
        }

        Commands::Batch { manifest } => {
            tracing::info!("Running batch {:?}", manifest);
            let batch = BatchManifest::load(&manifest)?;
            batch.validate()?;
            run_batch(&batch)?;
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let batch = BatchManifest::load(&manifest)?;
            batch.validate()?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Info { input } => {
            let model = load_ftl(&input)?;
            print!("{}", ftl_summary(&model));
        }
    }

    Ok(())
}

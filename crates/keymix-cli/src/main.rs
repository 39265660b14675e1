//! Keymix CLI - export and import engine animation clips from scene descriptions

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{export, import, inspect, path};

#[derive(Parser)]
#[command(name = "keymix")]
#[command(about = "Blend-shape and toggle animation clips for skinned models", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the engine path of an object
    Path {
        /// Path to scene description
        scene: String,

        /// Object name
        object: String,
    },

    /// Write a blend-shape clip for one mesh
    ExportShapes {
        /// Path to scene description
        scene: String,

        /// Mesh object name
        object: String,

        /// TOML file with a [weights] table (defaults to the object's shape keys)
        weights: Option<String>,

        /// Output clip path
        #[arg(short, long)]
        output: String,
    },

    /// Write an enable/disable pair of toggle clips
    ExportToggles {
        /// Path to scene description
        scene: String,

        /// Objects to toggle; the first one names the default files
        #[arg(required = true)]
        objects: Vec<String>,

        /// Output directory
        #[arg(long, default_value = ".")]
        dir: String,

        /// Enable clip file name
        #[arg(long)]
        enable: Option<String>,

        /// Disable clip file name
        #[arg(long)]
        disable: Option<String>,
    },

    /// Read the blend-shape weights a clip sets for a mesh
    ImportShapes {
        /// Clip file
        clip: String,

        /// Path to scene description
        scene: String,

        /// Mesh object name
        object: String,

        /// Output format (json or toml)
        #[arg(long, default_value = "toml")]
        format: String,
    },

    /// List the curves of a clip
    Inspect {
        /// Clip file
        clip: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Path { scene, object } => path::run(&scene, &object),
        Commands::ExportShapes {
            scene,
            object,
            weights,
            output,
        } => export::run_shapes(export::ShapeArgs {
            scene,
            object,
            weights,
            output,
        }),
        Commands::ExportToggles {
            scene,
            objects,
            dir,
            enable,
            disable,
        } => export::run_toggles(export::ToggleArgs {
            scene,
            objects,
            dir,
            enable,
            disable,
        }),
        Commands::ImportShapes {
            clip,
            scene,
            object,
            format,
        } => import::run(&clip, &scene, &object, &format),
        Commands::Inspect { clip } => inspect::run(&clip),
    }
}

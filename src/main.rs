use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use inkpea::annotations;
use inkpea::crop::{self, AspectRatio};
use inkpea::session::messages::parse_script;
use inkpea::{AnnotationEngine, EditorConfig, ExportedImage};

#[derive(Parser, Debug)]
#[command(name = "inkpea", version, about = "Annotate and crop images from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON script of editor commands over an image and export the result
    Annotate {
        /// Image to annotate
        input: PathBuf,
        /// JSON array of editor commands
        #[arg(long)]
        script: PathBuf,
        /// Output PNG path, or a directory to write edited-image.png into
        #[arg(long)]
        output: PathBuf,
        /// Config file to use instead of the user config
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Crop an image to the largest centered region with the given aspect ratio
    Crop {
        input: PathBuf,
        /// Ratio such as 16:9, 1.5 or free; defaults to the configured ratio
        #[arg(long)]
        aspect: Option<String>,
        /// Output file, or a directory to write cropped.<ext> into
        #[arg(long)]
        output: PathBuf,
    },
    /// Print the effective configuration as JSON
    Config {
        /// Write it back to the user config file, filling in missing keys
        #[arg(long)]
        write: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match Cli::parse().command {
        Command::Annotate {
            input,
            script,
            output,
            config,
        } => run_annotate(input, script, output, config),
        Command::Crop {
            input,
            aspect,
            output,
        } => run_crop(input, aspect, output),
        Command::Config { write } => run_config(write),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load_from(&path)
            .with_context(|| format!("reading config {}", path.display())),
        None => Ok(EditorConfig::load()),
    }
}

fn run_annotate(
    input: PathBuf,
    script: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let bytes = fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
    let json =
        fs::read_to_string(&script).with_context(|| format!("reading {}", script.display()))?;
    let commands = parse_script(&json).with_context(|| format!("parsing {}", script.display()))?;

    let mut engine = AnnotationEngine::new(config);
    let (w, h) = engine
        .load_image(&bytes)
        .with_context(|| format!("loading {}", input.display()))?;
    log::info!("Loaded {} ({}x{}), replaying {} commands", input.display(), w, h, commands.len());

    annotations::replay(&mut engine, commands);

    let exported: ExportedImage = engine.take_export()?;
    exported
        .save_to(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

fn run_crop(input: PathBuf, aspect: Option<String>, output: PathBuf) -> anyhow::Result<()> {
    let aspect = match aspect {
        Some(aspect) => aspect,
        None => EditorConfig::load().crop_aspect,
    };
    let aspect: AspectRatio = aspect.parse()?;
    let bytes = fs::read(&input).with_context(|| format!("reading {}", input.display()))?;

    let cropped = crop::crop_to_aspect(&bytes, aspect)
        .with_context(|| format!("cropping {}", input.display()))?;
    let output = if output.is_dir() {
        output.join(format!("cropped.{}", cropped.extension()))
    } else {
        output
    };
    fs::write(&output, &cropped.bytes).with_context(|| format!("writing {}", output.display()))?;
    log::info!(
        "Cropped {} to {}x{} ({})",
        input.display(),
        cropped.width,
        cropped.height,
        cropped.mime_type()
    );
    Ok(())
}

fn run_config(write: bool) -> anyhow::Result<()> {
    let config = EditorConfig::load();
    println!("{}", serde_json::to_string_pretty(&config)?);
    if write {
        config.save();
        if let Some(path) = EditorConfig::path() {
            log::info!("Saved config to {}", path.display());
        }
    }
    Ok(())
}

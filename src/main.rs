use anyhow::Context;
use clap::Parser;
use doodler::{Config, DoodleEngine, script, util};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "doodler")]
#[command(version, about = "Freehand drawing engine with undo/redo history")]
struct Cli {
    /// Replay script with one pointer, brush or history command per line
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Write the final canvas as a PNG image
    #[arg(long, short = 'o', value_name = "PNG")]
    output: Option<PathBuf>,

    /// Load settings from this file instead of ~/.config/doodler/config.toml
    #[arg(long, short = 'c', value_name = "TOML")]
    config: Option<PathBuf>,

    /// Override the surface width in pixels
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Override the surface height in pixels
    #[arg(long, value_name = "PX")]
    height: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|err| {
            log::warn!("Failed to load config: {err:#}; using defaults");
            Config::default()
        }),
    };
    if let Some(width) = cli.width {
        config.surface.width = width;
    }
    if let Some(height) = cli.height {
        config.surface.height = height;
    }
    config.validate_and_clamp();

    let text = fs::read_to_string(&cli.script)
        .with_context(|| format!("Failed to read script {}", cli.script.display()))?;
    let commands = script::parse_script(&text)
        .with_context(|| format!("Invalid script {}", cli.script.display()))?;
    log::info!(
        "Replaying {} command(s) from {}",
        commands.len(),
        cli.script.display()
    );

    let mut engine = DoodleEngine::from_config(&config)?;
    script::run_script(&mut engine, &commands);

    if engine.is_drawing() {
        log::warn!("Script ended mid-stroke; the unfinished stroke is discarded");
    }

    let paint = engine.paint();
    println!(
        "Canvas {}x{}: {} visible stroke(s)",
        engine.width(),
        engine.height(),
        engine.visible_strokes().count()
    );
    println!(
        "History: {} undo, {} redo",
        engine.history().undo_depth(),
        engine.history().redo_depth()
    );
    println!(
        "Brush: width {:.1}, alpha {}, color {} (#{:06X})",
        paint.width(),
        paint.alpha(),
        util::color_to_name(&paint.color()),
        paint.color().to_argb() & 0x00FF_FFFF
    );

    if let Some(path) = &cli.output {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        engine
            .write_png(&mut writer)
            .with_context(|| format!("Failed to write PNG to {}", path.display()))?;
        writer.flush()?;
        println!("Saved canvas to {}", path.display());
    }

    Ok(())
}

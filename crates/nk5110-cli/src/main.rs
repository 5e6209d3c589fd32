//! NK5110 Control Tool
//!
//! Renders display scenes offline: the scene is drawn through the real
//! driver into a recording transport, and the emulated panel RAM is shown
//! as text, written as a PNG, or dumped as a bus transcript.

mod config;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nk5110_hw::{BusEvent, DisplayMode, MemoryTransport, Nk5110};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Scene;

#[derive(Parser)]
#[command(name = "nk5110ctl")]
#[command(about = "Preview tool for PCD8544 (Nokia 5110) display scenes")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene as ASCII art, or to a PNG file
    Render {
        /// Scene file (TOML)
        scene: String,

        /// Write a PNG here instead of printing text
        #[arg(long)]
        png: Option<String>,

        /// PNG pixel scale factor
        #[arg(long, default_value = "4")]
        scale: u32,
    },
    /// Print the bus traffic a scene produces
    Transcript {
        /// Scene file (TOML)
        scene: String,
    },
    /// Print the built-in font
    Glyphs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Render { scene, png, scale } => handle_render(&scene, png.as_deref(), scale),
        Commands::Transcript { scene } => handle_transcript(&scene),
        Commands::Glyphs => {
            print!("{}", render::glyph_sheet(16));
            Ok(())
        }
    }
}

/// Runs a scene through the driver and returns the resulting bus recording.
fn run_scene(path: &str) -> Result<MemoryTransport> {
    let scene = Scene::load(path).with_context(|| format!("Failed to load scene {}", path))?;
    let config = scene.lcd.controller_config()?;
    debug!("Loaded scene {} with {} operations", path, scene.ops.len());

    let mut lcd = Nk5110::with_config(MemoryTransport::new(), config);
    lcd.init().context("Failed to initialize emulated panel")?;
    scene.draw(lcd.framebuffer_mut());
    lcd.flush()?;

    Ok(lcd.into_transport())
}

fn handle_render(scene: &str, png: Option<&str>, scale: u32) -> Result<()> {
    let transport = run_scene(scene)?;
    let ram = transport.display_ram();
    let mode = transport.display_mode().unwrap_or(DisplayMode::Blank);

    match png {
        Some(output) => {
            let png_data = render::to_png(&ram, mode, scale)?;
            std::fs::write(output, &png_data).context("Failed to write PNG file")?;
            info!("Wrote {} bytes", png_data.len());
            println!("Preview saved to: {}", output);
        }
        None => print!("{}", render::to_ascii(&ram, mode)),
    }

    Ok(())
}

fn handle_transcript(scene: &str) -> Result<()> {
    let transport = run_scene(scene)?;

    for event in transport.events() {
        match event {
            BusEvent::Reset => println!("RESET"),
            BusEvent::Command(c) => println!("CMD  0x{:02X}", c),
            BusEvent::Data(data) => {
                let preview: Vec<String> =
                    data.iter().take(16).map(|b| format!("{:02X}", b)).collect();
                let more = if data.len() > 16 { " ..." } else { "" };
                println!("DATA {:>3} bytes: {}{}", data.len(), preview.join(" "), more);
            }
        }
    }

    Ok(())
}

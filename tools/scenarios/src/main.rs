// Demonstration CLI: renders the draw2d scenarios to PNG files.
//
// Usage:
//   draw2d-scenarios [--output <folder>] [--only <name>...] [--clear-path]
//   draw2d-scenarios --list

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use draw2d_rust::RenderConfig;
use draw2d_scenarios::{render, save_png};

#[derive(Parser, Debug)]
#[command(name = "draw2d-scenarios", about = "Render the draw2d scenarios to PNG files")]
struct Args {
    /// Folder the PNG files are written to.
    #[arg(short, long, default_value = "test_results")]
    output: PathBuf,

    /// Render only these scenarios (repeatable).
    #[arg(long = "only")]
    only: Vec<String>,

    /// Clear the context's path after every stroke or fill.
    #[arg(long)]
    clear_path: bool,

    /// Flattening tolerance in pixels.
    #[arg(long, default_value_t = 0.25)]
    flatness: f64,

    /// List the scenario names and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        println!("Available scenarios:");
        for name in render::available_scenarios() {
            println!("  {}", name);
        }
        return Ok(());
    }

    let config = RenderConfig::new()
        .with_flatness(args.flatness)
        .with_clear_path_after_render(args.clear_path);
    config.validate()?;

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let names: Vec<String> = if args.only.is_empty() {
        render::available_scenarios()
            .into_iter()
            .map(String::from)
            .collect()
    } else {
        args.only.clone()
    };

    for name in &names {
        let start = Instant::now();
        let buf = render::render(name, &config)?;
        log::info!(
            "Test{} during: {:.3} ms",
            name,
            start.elapsed().as_secs_f64() * 1000.0
        );
        let path = args.output.join(format!("Test{}.png", name));
        save_png(&path, &buf)?;
        println!("Wrote {} OK.", path.display());
    }
    Ok(())
}

#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use mapforge::cli::args::CliArgs;
use mapforge::cli::driver;
use mapforge::cli::reporter::Reporter;

fn main() -> Result<()> {
    // Initialize tracing if MAPFORGE_LOG or RUST_LOG is set.
    // Supports MAPFORGE_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    mapforge::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let result = driver::generate(&args, &cwd)?;
    let output = if args.json {
        driver::render_json(&result)?
    } else {
        let color = args
            .pretty
            .unwrap_or_else(|| std::io::stdout().is_terminal());
        driver::render_text(&result, &Reporter::new(color))
    };
    print!("{output}");
    if args.json {
        println!();
    }

    let exit_code = result.exit_code();
    if exit_code != driver::EXIT_SUCCESS {
        std::process::exit(exit_code);
    }
    Ok(())
}

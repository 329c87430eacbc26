use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use nonosolve::prelude::*;

fn main() -> Result<()> {
    // Initialize program options and environment (reference crate's main.rs:
    // dotenvy -> clap parse -> flexi_logger setup -> dispatch).
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let level = cli.log_level.clone().unwrap_or_else(|| if cli.verbose { "debug".into() } else { "info".into() });
    let _logger = Logger::try_with_env_or_str(level.as_str())?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(match cfg!(debug_assertions) {
            true => AdaptiveFormat::WithThread,
            _ => AdaptiveFormat::Default,
        })
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    let result = match cli.command {
        Some(Command::Solve { puzzle_file }) => run_solve(&puzzle_file, cli.timeout_ms),
        Some(Command::Generate { puzzle_file }) => run_generate(&puzzle_file, cli.timeout_ms),
        None => run_batch(cli.threads, cli.timeout_ms),
    };

    if let Err(err) = &result {
        log::error!("fatal error: {err:#}");
    }
    result
}

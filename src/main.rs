mod cli;
mod converter;
mod error;
mod files;
mod image;
mod markdown;
mod metadata;
mod model;
mod prune;
mod reader;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::io::IsTerminal;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = cli.config();
    match cli.command {
        Command::Prune => {
            let removed = prune::keep_courses_from_books_only(&config.courses_dir, &config.books_dir);
            info!("{} course folders deleted", removed.len());
        }
        Command::Extract => {
            let books = reader::extract_books_data(&config.books_dir)
                .context("Failed to extract book data")?;
            reader::save_index(&books, &config.index).context("Failed to save book index")?;
            info!(
                "Book information for {} books saved to {}",
                books.len(),
                config.index.display()
            );
        }
        Command::Apply { .. } => {
            let stats = converter::apply_alt_text(&config)
                .context("Failed to apply alt text to courses")?;
            print!("{}", report::format_report(&stats));
        }
    }

    Ok(())
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(cli.verbose >= 2)
                .with_ansi(std::io::stdout().is_terminal()),
        )
        .init();
}

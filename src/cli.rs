use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Copy image alt text from book chapters into generated course chapters
#[derive(Parser, Debug)]
#[command(name = "alttext-sync", version, about)]
pub struct Cli {
    /// Root folder holding one sub-folder per book
    #[arg(long, global = true, env = "ALTTEXT_BOOKS_DIR", default_value = "./books")]
    pub books_dir: PathBuf,

    /// Root folder holding one sub-folder per course
    #[arg(long, global = true, env = "ALTTEXT_COURSES_DIR", default_value = "./courses")]
    pub courses_dir: PathBuf,

    /// Extracted book index, written by `extract` and read by `apply`
    #[arg(
        long,
        global = true,
        env = "ALTTEXT_INDEX",
        default_value = "./extracted_books_data.json"
    )]
    pub index: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, default_value_t = false)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delete course folders that have no book folder of the same name
    Prune,

    /// Read every book's `_lessons/*.md` chapters and write the index file
    Extract,

    /// Insert alt text from the index file into course `<image>` tags
    Apply {
        /// How double quotes inside alt text are written into the attribute
        #[arg(long, value_enum, default_value_t = Escape::None)]
        escape: Escape,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Escape {
    /// Insert alt text verbatim
    #[default]
    None,
    /// Escape `&` and `"` as HTML entities
    Html,
}

/// Settings shared by every phase.
#[derive(Debug, Clone)]
pub struct Config {
    pub books_dir: PathBuf,
    pub courses_dir: PathBuf,
    pub index: PathBuf,
    /// Only set by `apply`; the other phases never write alt attributes
    pub escape: Escape,
}

impl Cli {
    pub fn config(&self) -> Config {
        let escape = match self.command {
            Command::Apply { escape } => escape,
            _ => Escape::default(),
        };
        Config {
            books_dir: self.books_dir.clone(),
            courses_dir: self.courses_dir.clone(),
            index: self.index.clone(),
            escape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_picks_up_apply_escape() {
        let cli = Cli::try_parse_from(["alttext-sync", "apply", "--escape", "html"]).unwrap();
        let config = cli.config();
        assert_eq!(config.escape, Escape::Html);
        assert_eq!(config.index, PathBuf::from("./extracted_books_data.json"));
    }

    #[test]
    fn config_defaults_to_verbatim_alt() {
        let cli = Cli::try_parse_from(["alttext-sync", "--books-dir", "b", "prune"]).unwrap();
        let config = cli.config();
        assert_eq!(config.escape, Escape::None);
        assert_eq!(config.books_dir, PathBuf::from("b"));
    }
}

use clap::Parser;
use std::path::PathBuf;

/// Terminal front end for the typing game
#[derive(Parser, Debug, Clone)]
#[command(name = "typing-game", version, about)]
pub struct Config {
    /// File to write logs to; the terminal itself is taken by the UI
    #[arg(long, default_value = "typing-game.log")]
    pub log_file: PathBuf,

    /// Log filter, used when RUST_LOG is not set
    #[arg(long, default_value = "typing_game=info")]
    pub log_filter: String,

    /// Width of the word panel in columns
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(1..))]
    pub panel_width: u16,

    /// Height of the word panel in rows
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u16).range(1..))]
    pub panel_height: u16,

    /// Word shown inside the panel
    #[arg(long, default_value = "typing")]
    pub word: String,
}

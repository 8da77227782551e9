//! Command-line arguments

use crate::data::DelimiterChoice;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Drag-and-drop CSV table editor
#[derive(Parser, Debug)]
#[command(name = "csv-editor", version, about = "Drag-and-drop CSV table editor")]
pub struct CliArgs {
    /// CSV file to open at startup
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Field delimiter to read with (overrides the config file)
    #[arg(short, long, value_enum)]
    pub delimiter: Option<DelimiterArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterArg {
    Auto,
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl From<DelimiterArg> for DelimiterChoice {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Auto => DelimiterChoice::Auto,
            DelimiterArg::Comma => DelimiterChoice::Comma,
            DelimiterArg::Tab => DelimiterChoice::Tab,
            DelimiterArg::Semicolon => DelimiterChoice::Semicolon,
            DelimiterArg::Pipe => DelimiterChoice::Pipe,
        }
    }
}

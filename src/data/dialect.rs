//! CSV dialect settings shared by the loader, exporter and config.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported field delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl Delimiter {
    /// Every supported delimiter, comma first.
    pub const ALL: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Tab,
        Delimiter::Semicolon,
        Delimiter::Pipe,
    ];

    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Semicolon => b';',
            Delimiter::Pipe => b'|',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    /// File extension conventionally used for this delimiter.
    pub fn extension(self) -> &'static str {
        match self {
            Delimiter::Comma | Delimiter::Semicolon => "csv",
            Delimiter::Tab => "tsv",
            Delimiter::Pipe => "psv",
        }
    }

    /// Delimiter implied by a file extension, if the extension implies one.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "tsv" | "tab" => Some(Delimiter::Tab),
            "psv" => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Comma => "Comma",
            Delimiter::Tab => "Tab",
            Delimiter::Semicolon => "Semicolon",
            Delimiter::Pipe => "Pipe",
        };
        f.write_str(name)
    }
}

/// Delimiter selection for loading: sniff it or force one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelimiterChoice {
    #[default]
    Auto,
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

impl DelimiterChoice {
    pub fn fixed(self) -> Option<Delimiter> {
        match self {
            DelimiterChoice::Auto => None,
            DelimiterChoice::Comma => Some(Delimiter::Comma),
            DelimiterChoice::Tab => Some(Delimiter::Tab),
            DelimiterChoice::Semicolon => Some(Delimiter::Semicolon),
            DelimiterChoice::Pipe => Some(Delimiter::Pipe),
        }
    }
}

impl From<Delimiter> for DelimiterChoice {
    fn from(delimiter: Delimiter) -> Self {
        match delimiter {
            Delimiter::Comma => DelimiterChoice::Comma,
            Delimiter::Tab => DelimiterChoice::Tab,
            Delimiter::Semicolon => DelimiterChoice::Semicolon,
            Delimiter::Pipe => DelimiterChoice::Pipe,
        }
    }
}

/// Record terminator written on export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    #[default]
    CrLf,
}

impl LineEnding {
    pub fn terminator(self) -> csv::Terminator {
        match self {
            LineEnding::Lf => csv::Terminator::Any(b'\n'),
            LineEnding::CrLf => csv::Terminator::CRLF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_from_path() {
        assert_eq!(Delimiter::from_path(Path::new("a.TSV")), Some(Delimiter::Tab));
        assert_eq!(Delimiter::from_path(Path::new("a.psv")), Some(Delimiter::Pipe));
        assert_eq!(Delimiter::from_path(Path::new("a.csv")), None);
        assert_eq!(Delimiter::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_extension_matches_from_path() {
        for delimiter in Delimiter::ALL {
            let name = format!("data.{}", delimiter.extension());
            let implied = Delimiter::from_path(Path::new(&name)).unwrap_or(Delimiter::Comma);
            if delimiter != Delimiter::Semicolon {
                assert_eq!(implied, delimiter);
            }
        }
    }

    #[test]
    fn test_default_line_ending_is_crlf() {
        assert_eq!(LineEnding::default(), LineEnding::CrLf);
    }

    #[test]
    fn test_choice_round_trips_fixed_delimiters() {
        for delimiter in Delimiter::ALL {
            assert_eq!(DelimiterChoice::from(delimiter).fixed(), Some(delimiter));
        }
        assert_eq!(DelimiterChoice::Auto.fixed(), None);
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        let json = serde_json::to_string(&DelimiterChoice::Semicolon).unwrap();
        assert_eq!(json, "\"semicolon\"");
        let ending: LineEnding = serde_json::from_str("\"crlf\"").unwrap();
        assert_eq!(ending, LineEnding::CrLf);
    }
}

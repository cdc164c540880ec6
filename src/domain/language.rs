use crate::error::{CieloError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Language the acquirer answers in.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "PT")]
    Portuguese,
    #[serde(rename = "EN")]
    English,
    #[serde(rename = "ES")]
    Spanish,
}

impl Language {
    pub const PORTUGUESE: &'static str = "PT";
    pub const ENGLISH: &'static str = "EN";
    pub const SPANISH: &'static str = "ES";

    pub fn code(&self) -> &'static str {
        match self {
            Language::Portuguese => Self::PORTUGUESE,
            Language::English => Self::ENGLISH,
            Language::Spanish => Self::SPANISH,
        }
    }

    /// Label printed in front of a rejected request.
    pub fn error_label(&self) -> &'static str {
        match self {
            Language::Portuguese => "ERRO",
            Language::English | Language::Spanish => "ERROR",
        }
    }
}

impl FromStr for Language {
    type Err = CieloError;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_uppercase().as_str() {
            Self::PORTUGUESE => Ok(Language::Portuguese),
            Self::ENGLISH => Ok(Language::English),
            Self::SPANISH => Ok(Language::Spanish),
            _ => Err(CieloError::invalid(format!("Unsupported language '{value}'"))),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::Portuguese.code(), Language::PORTUGUESE);
        assert_eq!(Language::English.code(), Language::ENGLISH);
        assert_eq!(Language::Spanish.code(), Language::SPANISH);
        assert_eq!(Language::default(), Language::Portuguese);
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("es".parse::<Language>().unwrap(), Language::Spanish);
        assert_eq!("EN".parse::<Language>().unwrap(), Language::English);
        assert!("FR".parse::<Language>().is_err());
    }
}

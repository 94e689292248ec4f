use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The language code samples are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputLanguage {
    #[default]
    Js,
    Bash,
}

impl OutputLanguage {
    pub const ALL: [OutputLanguage; 2] = [OutputLanguage::Js, OutputLanguage::Bash];

    pub fn key(self) -> &'static str {
        match self {
            OutputLanguage::Js => "js",
            OutputLanguage::Bash => "bash",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OutputLanguage::Js => "JavaScript",
            OutputLanguage::Bash => "Bash",
        }
    }
}

impl fmt::Display for OutputLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for OutputLanguage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "js" | "javascript" => Ok(OutputLanguage::Js),
            "bash" | "curl" => Ok(OutputLanguage::Bash),
            _ => Err(Error::UnknownLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("JavaScript".parse::<OutputLanguage>().unwrap(), OutputLanguage::Js);
        assert_eq!("curl".parse::<OutputLanguage>().unwrap(), OutputLanguage::Bash);
        assert!("python".parse::<OutputLanguage>().is_err());
    }
}

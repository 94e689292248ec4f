use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown section: {0}")]
    UnknownSection(String),
    #[error("Unknown output language: {0}")]
    UnknownLanguage(String),
    #[error("Invalid navigation path: {0}")]
    InvalidPath(String),
    #[error("Fetch Error: {0}")]
    Fetch(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("Preference Error: {0}")]
    Preferences(String),
    #[cfg(feature = "client-native")]
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("SerdeJson Error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("UrlEncode Error: {0}")]
    UrlEncode(#[from] serde_urlencoded::ser::Error),
    #[error("Toml Error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

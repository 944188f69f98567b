// src/error.rs
use std::path::PathBuf;
use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Config(#[from] toml::de::Error),

    #[error("config file not found: {}", .0.display())]
    MissingConfig(PathBuf),

    /// Error object returned by the driver (`value.error` / `value.message`).
    #[error("webdriver `{error}`: {message}")]
    WebDriver { error: String, message: String },

    #[error("timed out after {timeout:?} waiting for {what}")]
    Timeout { timeout: Duration, what: String },

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("invalid URL `{url}`: {reason}")]
    Url { url: String, reason: String },

    #[error("chromedriver not ready at {0}")]
    DriverStartup(String),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

impl Error {
    pub(crate) fn webdriver(error: impl Into<String>, message: impl Into<String>) -> Self {
        Error::WebDriver { error: error.into(), message: message.into() }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Error::WebDriver { error, .. } if error == "no such element")
    }

    pub fn is_stale_element(&self) -> bool {
        matches!(self, Error::WebDriver { error, .. } if error == "stale element reference")
    }
}

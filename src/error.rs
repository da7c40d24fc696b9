//! Error types for listlab
//!
//! Failures surface at the config boundary and the metrics export; the
//! engines themselves clamp or reject input without erroring.

use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum Error {
    /// A control value or lab config field outside its allowed range
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// Reading or writing `listlab.toml`, or creating the config and data dirs
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// Metrics board JSON export
    #[snafu(display("Metrics export failed: {source}"))]
    MetricsExport { source: serde_json::Error },

    /// `listlab.toml` is not valid TOML for `LabConfig`
    #[snafu(display("Config parse error: {source}"))]
    ConfigParse { source: toml::de::Error },

    #[snafu(display("Config write error: {source}"))]
    ConfigWrite { source: toml::ser::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::MetricsExport { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::ConfigParse { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::ConfigWrite { source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_error_display() {
        let source = toml::from_str::<toml::Table>("page_size = [").expect_err("broken toml");
        let err = Error::from(source);
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().starts_with("Config parse error: "));
    }

    #[test]
    fn test_invalid_display() {
        let err = Error::Invalid {
            message: "page size 7".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid: page size 7");
    }
}

//! Run configuration.

use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use thiserror::Error;

use crate::serializer::SerializeOptions;

/// Default directory scanned for table pairs.
pub const DEFAULT_SOURCE_DIR: &str = "./data";
/// Default directory fixtures are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "./output";
/// Default Django app label.
pub const DEFAULT_NAMESPACE: &str = "sedbs";

/// Everything a conversion run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding `<table>.csv` / `<table>.xml` pairs.
    pub source_dir: Utf8PathBuf,
    /// Directory the fixtures are written to; created if missing.
    pub output_dir: Utf8PathBuf,
    /// Django app label prefixed to every model name.
    pub namespace: String,
    /// Pretty-print the generated XML.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: DEFAULT_SOURCE_DIR.into(),
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            namespace: DEFAULT_NAMESPACE.into(),
            pretty: false,
        }
    }
}

impl Config {
    /// Scan `dir` for table pairs.
    pub fn with_source_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Write fixtures into `dir`.
    pub fn with_output_dir(mut self, dir: impl Into<Utf8PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Use `namespace` as the app label in model names.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Toggle indented output.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Directory scanned for table pairs.
    pub fn source_dir(&self) -> &Utf8Path {
        &self.source_dir
    }

    /// Directory fixtures are written to.
    pub fn output_dir(&self) -> &Utf8Path {
        &self.output_dir
    }

    /// Serializer options implied by this config.
    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions {
            pretty: self.pretty,
            ..SerializeOptions::default()
        }
    }

    /// Reject settings that would produce unusable model labels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_namespace(&self.namespace)
    }
}

/// Check a Django app label before it is joined into `<namespace>.<entity>`.
pub fn validate_namespace(namespace: &str) -> Result<(), ConfigError> {
    if namespace.trim().is_empty() {
        return Err(ConfigError::EmptyNamespace);
    }
    if namespace.starts_with('.') || namespace.ends_with('.') {
        return Err(ConfigError::DottedNamespace {
            namespace: namespace.to_owned(),
        });
    }
    Ok(())
}

/// Invalid configuration.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The namespace is empty or only whitespace.
    #[error("namespace is empty")]
    #[diagnostic(
        code(fixturize::config::empty_namespace),
        help("pass the Django app label the fixtures belong to, e.g. `--namespace sedbs`")
    )]
    EmptyNamespace,

    /// The namespace would leave an empty segment in `<namespace>.<entity>`.
    #[error("namespace `{namespace}` starts or ends with `.`")]
    #[diagnostic(code(fixturize::config::dotted_namespace))]
    DottedNamespace {
        /// The rejected namespace.
        namespace: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_directory_conventions() {
        let config = Config::default();
        assert_eq!(config.source_dir().as_str(), "./data");
        assert_eq!(config.output_dir().as_str(), "./output");
        assert_eq!(config.namespace, "sedbs");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let config = Config::default()
            .with_source_dir("in")
            .with_output_dir("out")
            .with_namespace("qa")
            .with_pretty(true);

        assert_eq!(config.source_dir().as_str(), "in");
        assert_eq!(config.output_dir().as_str(), "out");
        assert!(config.serialize_options().pretty);
    }

    #[test]
    fn empty_namespace_is_rejected() {
        let config = Config::default().with_namespace("  ");
        assert_eq!(config.validate(), Err(ConfigError::EmptyNamespace));
    }

    #[test]
    fn dotted_namespace_is_rejected() {
        assert!(matches!(
            validate_namespace("sedbs."),
            Err(ConfigError::DottedNamespace { .. })
        ));
        assert!(validate_namespace("stack.sedbs").is_ok());
    }
}

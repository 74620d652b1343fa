use thiserror::Error;

/// Unified error type for nextver operations
#[derive(Error, Debug)]
pub enum NextverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Height convention error: {0}")]
    HeightTemplate(#[from] HeightTemplateError),

    #[error("Configuration file parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures raised while resolving a height convention against a version's
/// identifiers. These always indicate a broken rule table, never bad commit
/// history, so callers abort the whole calculation on any of them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeightTemplateError {
    #[error("no height rule covers {0} dots")]
    MissingRule(u32),

    #[error("invalid height template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("height template {template:?} grows {dots} dots by more than one identifier")]
    ExpansionOverflow { template: String, dots: u32 },

    #[error("height rules resolve back to {0} dots without reaching a height placeholder")]
    CyclicRule(u32),
}

/// Convenience type alias for Results in nextver
pub type Result<T> = std::result::Result<T, NextverError>;

impl NextverError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        NextverError::Configuration(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        NextverError::Version(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        NextverError::Repository(msg.into())
    }
}

impl HeightTemplateError {
    /// Create an invalid-template error for a specific rule template
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        HeightTemplateError::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }
}

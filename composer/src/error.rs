use std::io;
use std::path::PathBuf;

use catalog::Role;
use thiserror::Error;

/// Broad class of a failure, deciding who has to act on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad network, client or option; the operator fixes the input.
    Configuration,
    /// The client selection cannot work together.
    Compatibility,
    /// Built-in catalog and templates disagree; a packaging defect.
    TemplateIntegrity,
    /// Output could not be written; nothing was left behind.
    Filesystem,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported network '{network}'")]
    UnsupportedNetwork { network: String },

    #[error("{role} client '{client}' is not supported on {network}")]
    UnsupportedClient {
        role: Role,
        client: String,
        network: String,
    },

    #[error("consensus client '{consensus}' cannot serve validator client '{validator}' on {network}")]
    IncompatiblePair {
        consensus: String,
        validator: String,
        network: String,
    },

    #[error("network '{network}' has no client catalog entry")]
    MissingCatalogEntry { network: String },

    #[error("no template for {role} client '{client}' on {network}")]
    MissingTemplate {
        role: Role,
        client: String,
        network: String,
    },

    #[error("invalid fee recipient '{address}': {reason}")]
    InvalidFeeRecipient { address: String, reason: String },

    #[error("invalid {option}: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error("failed to create generation path {}: {source}", path.display())]
    PathCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render manifest: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("generated manifest is inconsistent: {0}")]
    ManifestInspection(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedNetwork { .. }
            | Error::UnsupportedClient { .. }
            | Error::InvalidFeeRecipient { .. }
            | Error::InvalidOption { .. } => ErrorKind::Configuration,
            Error::IncompatiblePair { .. } => ErrorKind::Compatibility,
            Error::MissingCatalogEntry { .. }
            | Error::MissingTemplate { .. }
            | Error::Render(_)
            | Error::ManifestInspection(_) => ErrorKind::TemplateIntegrity,
            Error::PathCreation { .. } | Error::Write { .. } => ErrorKind::Filesystem,
        }
    }

    pub(crate) fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            option,
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

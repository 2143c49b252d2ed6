//! Error taxonomy for registration, bootstrap and resolution

use crate::metadata::MetadataError;
use std::fmt;
use thiserror::Error;

/// Errors raised while defining or registering a component.
///
/// These indicate a defect in shipped component code and are fatal to bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("component '{name}' is already registered")]
    NameAlreadyRegistered { name: String },

    #[error("component '{name}' variant map does not match its metadata (missing: [{}], undeclared: [{}])", .missing.join(", "), .extra.join(", "))]
    VariantMapMismatch {
        name: String,
        missing: Vec<String>,
        extra: Vec<String>,
    },

    #[error("component '{name}' declares variants with no implementation: [{}]", .missing.join(", "))]
    IncompleteVariantMap { name: String, missing: Vec<String> },

    #[error("cannot register '{name}': metadata is named '{metadata_name}'")]
    NameMismatch { name: String, metadata_name: String },

    #[error("cannot register '{name}': the registry is sealed")]
    Sealed { name: String },

    #[error("component '{name}' changed in the registry while bootstrap was staging")]
    ChangedDuringBootstrap { name: String },
}

/// Errors returned by resolution. Recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("unknown component '{0}'")]
    UnknownComponent(String),

    #[error("component '{0}' has no variant '{1}'")]
    UnknownVariant(String, String),

    #[error("component '{0}' is not compatible with '{1}' pages")]
    IncompatibleContext(String, String),
}

impl ResolutionError {
    /// Name of the component the failed request referred to
    pub fn component(&self) -> &str {
        match self {
            ResolutionError::UnknownComponent(name)
            | ResolutionError::UnknownVariant(name, _)
            | ResolutionError::IncompatibleContext(name, _) => name,
        }
    }
}

/// One component module that failed to register during bootstrap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFailure {
    pub component: String,
    pub error: RegistryError,
}

/// Bootstrap aborted; nothing was published to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapError {
    pub failures: Vec<ModuleFailure>,
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "component bootstrap failed ({} module(s)):",
            self.failures.len()
        )?;
        for failure in &self.failures {
            write!(f, "\n  - {}: {}", failure.component, failure.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for BootstrapError {}

//! Error types for populating the simulation

use std::fmt;

use piefall_physics::{KindConfigError, ObjectKind, TemplateId};

/// Error type for [`Simulation::populate`](crate::Simulation::populate)
#[derive(Debug, Clone, PartialEq)]
pub enum PopulateError {
    /// The template handle was never registered with this simulation
    UnknownTemplate(TemplateId),
    /// The template's kind has no configuration (e.g. text in the base variant)
    KindNotConfigured(ObjectKind),
    /// The kind's configuration failed validation
    InvalidConfig {
        kind: ObjectKind,
        source: KindConfigError,
    },
}

impl fmt::Display for PopulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopulateError::UnknownTemplate(id) => write!(f, "Unknown template: {:?}", id),
            PopulateError::KindNotConfigured(kind) => {
                write!(f, "No configuration for object kind '{}'", kind)
            }
            PopulateError::InvalidConfig { kind, source } => {
                write!(f, "Invalid configuration for '{}': {}", kind, source)
            }
        }
    }
}

impl std::error::Error for PopulateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PopulateError::InvalidConfig { source, .. } => Some(source),
            PopulateError::UnknownTemplate(_) => None,
            PopulateError::KindNotConfigured(_) => None,
        }
    }
}

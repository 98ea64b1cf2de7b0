//! Error types for movement behaviour and configuration.
//!
//! Movement errors are recoverable: they are logged and degrade to a
//! "not found" or empty result rather than aborting a tick.

use std::path::PathBuf;

use thiserror::Error;

use crate::host::{Category, EntityId, FrameId};

/// Recoverable faults raised while an agent steers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MovementError {
    /// The expanding search passed its radius bound even though entities of
    /// the category exist.
    #[error(
        "entity {entity} found no `{category}` within radius {radius} despite {expected} registered"
    )]
    SpatialSearchExhausted {
        /// Agent that ran the search.
        entity: EntityId,
        /// Category being searched for.
        category: Category,
        /// Radius reached when the search gave up.
        radius: f32,
        /// Number of candidates the registry reported.
        expected: usize,
    },
    /// A frame had no Movement component to resolve its owning entity.
    #[error("entity {entity} touches frame {frame} which has no movement component")]
    MissingComponent {
        /// Agent performing the lookup.
        entity: EntityId,
        /// Frame that could not be resolved.
        frame: FrameId,
    },
}

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings from {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The settings were not valid JSON for the expected shape.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field held a value outside its allowed domain.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

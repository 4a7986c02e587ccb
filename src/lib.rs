use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("SerializationError: {0}")]
    SerializationError(#[source] serde_json::Error),

    #[error("Kube Error: {0}")]
    KubeError(#[source] kube::Error),

    #[error("Schema Error: {0}")]
    SchemaError(String),

    #[error("Unknown Type: {0}")]
    UnknownType(String),

    #[error("Malformed managedFields of manager `{manager}`: {reason}")]
    MalformedManagedFields { manager: String, reason: String },

    #[error("Field path {path}: {reason}")]
    FieldPath { path: String, reason: String },

    #[error("Apply configuration has no metadata.name")]
    MissingName,
}
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Typed live objects as returned by the API server
pub mod api {
    pub mod events {
        pub mod v1beta1;
    }
}
pub mod applyconfigurations;
pub mod client;
pub mod managedfields;

pub use crate::applyconfigurations::events::v1beta1::{
    event, extract_event, extract_event_status, EventApplyConfiguration,
};
pub use crate::applyconfigurations::meta::v1::ObjectApplyConfiguration;

/// Log and trace integrations
pub mod telemetry;

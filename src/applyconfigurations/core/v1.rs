use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Declarative configuration of the ObjectReference type for use with apply.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReferenceApplyConfiguration {
    pub kind: Option<String>,
    pub namespace: Option<String>,
    pub name: Option<String>,
    pub uid: Option<String>,
    pub api_version: Option<String>,
    pub resource_version: Option<String>,
    pub field_path: Option<String>,
}

pub fn object_reference() -> ObjectReferenceApplyConfiguration {
    ObjectReferenceApplyConfiguration::default()
}

impl ObjectReferenceApplyConfiguration {
    pub fn with_kind(mut self, value: impl Into<String>) -> Self {
        self.kind = Some(value.into());
        self
    }

    pub fn with_namespace(mut self, value: impl Into<String>) -> Self {
        self.namespace = Some(value.into());
        self
    }

    pub fn with_name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn with_uid(mut self, value: impl Into<String>) -> Self {
        self.uid = Some(value.into());
        self
    }

    pub fn with_api_version(mut self, value: impl Into<String>) -> Self {
        self.api_version = Some(value.into());
        self
    }

    pub fn with_resource_version(mut self, value: impl Into<String>) -> Self {
        self.resource_version = Some(value.into());
        self
    }

    pub fn with_field_path(mut self, value: impl Into<String>) -> Self {
        self.field_path = Some(value.into());
        self
    }
}

/// Declarative configuration of the EventSource type for use with apply.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSourceApplyConfiguration {
    pub component: Option<String>,
    pub host: Option<String>,
}

pub fn event_source() -> EventSourceApplyConfiguration {
    EventSourceApplyConfiguration::default()
}

impl EventSourceApplyConfiguration {
    pub fn with_component(mut self, value: impl Into<String>) -> Self {
        self.component = Some(value.into());
        self
    }

    pub fn with_host(mut self, value: impl Into<String>) -> Self {
        self.host = Some(value.into());
        self
    }
}

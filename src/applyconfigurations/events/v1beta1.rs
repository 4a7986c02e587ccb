use applyconfig_derive::ApplyConfiguration;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{MicroTime, Time};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use tracing::*;

use crate::{
    api::events::v1beta1::{Event, API_VERSION, KIND},
    applyconfigurations::{
        core::v1::{EventSourceApplyConfiguration, ObjectReferenceApplyConfiguration},
        meta::v1::{
            ObjectApplyConfiguration, ObjectMetaApplyConfiguration, TypeMetaApplyConfiguration,
        },
    },
    managedfields, Result,
};

/// Schema name of the live type the extractor walks.
pub static EVENT_TYPE_NAME: &str = "io.k8s.api.events.v1beta1.Event";

/// Declarative configuration of the Event type for use with apply.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, ApplyConfiguration)]
#[serde(rename_all = "camelCase")]
pub struct EventApplyConfiguration {
    #[serde(flatten)]
    pub type_meta: TypeMetaApplyConfiguration,
    #[serde(rename = "metadata")]
    pub object_meta: Option<ObjectMetaApplyConfiguration>,
    pub event_time: Option<MicroTime>,
    pub series: Option<EventSeriesApplyConfiguration>,
    pub reporting_controller: Option<String>,
    pub reporting_instance: Option<String>,
    pub action: Option<String>,
    pub reason: Option<String>,
    pub regarding: Option<ObjectReferenceApplyConfiguration>,
    pub related: Option<ObjectReferenceApplyConfiguration>,
    pub note: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub deprecated_source: Option<EventSourceApplyConfiguration>,
    pub deprecated_first_timestamp: Option<Time>,
    pub deprecated_last_timestamp: Option<Time>,
    pub deprecated_count: Option<i32>,
}

/// Declarative configuration of an Event with the given name and namespace.
pub fn event(name: impl Into<String>, namespace: impl Into<String>) -> EventApplyConfiguration {
    EventApplyConfiguration::default()
        .with_name(name)
        .with_namespace(namespace)
        .with_kind(KIND)
        .with_api_version(API_VERSION)
}

/// Extracts the apply configuration owned by `field_manager` from `event`.
///
/// If `field_manager` has no managed fields on `event`, the result only carries
/// name, namespace, kind and apiVersion. That happens when the manager never
/// applied the object, or when other managers have taken ownership of every field
/// it applied. For the same reason an extracted configuration may hold fewer
/// fields than the manager last applied.
///
/// `event` must be an unmodified object read from the API server; the managed
/// fields describe the stored object, not local edits.
pub fn extract_event(event: &Event, field_manager: &str) -> Result<EventApplyConfiguration> {
    extract(event, field_manager, "")
}

/// Same as [`extract_event`], for the fields applied through the status subresource.
pub fn extract_event_status(event: &Event, field_manager: &str) -> Result<EventApplyConfiguration> {
    extract(event, field_manager, "status")
}

fn extract(
    event: &Event,
    field_manager: &str,
    subresource: &str,
) -> Result<EventApplyConfiguration> {
    let object_type = managedfields::parser()?.type_(EVENT_TYPE_NAME)?;
    let b: EventApplyConfiguration =
        managedfields::extract_into(event, object_type, field_manager, subresource)?
            .unwrap_or_default();
    debug!(
        "Extracted event {:?} for manager {} (subresource {:?})",
        event.metadata.name, field_manager, subresource
    );
    Ok(b.with_name(event.metadata.name.clone().unwrap_or_default())
        .with_namespace(event.metadata.namespace.clone().unwrap_or_default())
        .with_kind(KIND)
        .with_api_version(API_VERSION))
}

impl EventApplyConfiguration {
    pub fn with_event_time(mut self, value: MicroTime) -> Self {
        self.event_time = Some(value);
        self
    }

    pub fn with_series(mut self, value: EventSeriesApplyConfiguration) -> Self {
        self.series = Some(value);
        self
    }

    pub fn with_reporting_controller(mut self, value: impl Into<String>) -> Self {
        self.reporting_controller = Some(value.into());
        self
    }

    pub fn with_reporting_instance(mut self, value: impl Into<String>) -> Self {
        self.reporting_instance = Some(value.into());
        self
    }

    pub fn with_action(mut self, value: impl Into<String>) -> Self {
        self.action = Some(value.into());
        self
    }

    pub fn with_reason(mut self, value: impl Into<String>) -> Self {
        self.reason = Some(value.into());
        self
    }

    pub fn with_regarding(mut self, value: ObjectReferenceApplyConfiguration) -> Self {
        self.regarding = Some(value);
        self
    }

    pub fn with_related(mut self, value: ObjectReferenceApplyConfiguration) -> Self {
        self.related = Some(value);
        self
    }

    pub fn with_note(mut self, value: impl Into<String>) -> Self {
        self.note = Some(value.into());
        self
    }

    pub fn with_type(mut self, value: impl Into<String>) -> Self {
        self.type_ = Some(value.into());
        self
    }

    pub fn with_deprecated_source(mut self, value: EventSourceApplyConfiguration) -> Self {
        self.deprecated_source = Some(value);
        self
    }

    pub fn with_deprecated_first_timestamp(mut self, value: Time) -> Self {
        self.deprecated_first_timestamp = Some(value);
        self
    }

    pub fn with_deprecated_last_timestamp(mut self, value: Time) -> Self {
        self.deprecated_last_timestamp = Some(value);
        self
    }

    pub fn with_deprecated_count(mut self, value: i32) -> Self {
        self.deprecated_count = Some(value);
        self
    }
}

/// Declarative configuration of the EventSeries type for use with apply.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSeriesApplyConfiguration {
    pub count: Option<i32>,
    pub last_observed_time: Option<MicroTime>,
}

pub fn event_series() -> EventSeriesApplyConfiguration {
    EventSeriesApplyConfiguration::default()
}

impl EventSeriesApplyConfiguration {
    pub fn with_count(mut self, value: i32) -> Self {
        self.count = Some(value);
        self
    }

    pub fn with_last_observed_time(mut self, value: MicroTime) -> Self {
        self.last_observed_time = Some(value);
        self
    }
}

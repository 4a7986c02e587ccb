use std::borrow::Cow;

use k8s_openapi::{
    api::core::v1::{EventSource, ObjectReference},
    apimachinery::pkg::apis::meta::v1::{MicroTime, ObjectMeta, Time},
    NamespaceResourceScope,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub static GROUP: &str = "events.k8s.io";
pub static VERSION: &str = "v1beta1";
pub static API_VERSION: &str = "events.k8s.io/v1beta1";
pub static KIND: &str = "Event";

/// Event as stored by the API server under `events.k8s.io/v1beta1`.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub event_time: Option<MicroTime>,
    pub series: Option<EventSeries>,
    pub reporting_controller: Option<String>,
    pub reporting_instance: Option<String>,
    pub action: Option<String>,
    pub reason: Option<String>,
    pub regarding: Option<ObjectReference>,
    pub related: Option<ObjectReference>,
    pub note: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
    pub deprecated_source: Option<EventSource>,
    pub deprecated_first_timestamp: Option<Time>,
    pub deprecated_last_timestamp: Option<Time>,
    pub deprecated_count: Option<i32>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSeries {
    pub count: i32,
    pub last_observed_time: MicroTime,
}

impl kube::Resource for Event {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &Self::DynamicType) -> Cow<'_, str> {
        KIND.into()
    }

    fn group(_: &Self::DynamicType) -> Cow<'_, str> {
        GROUP.into()
    }

    fn version(_: &Self::DynamicType) -> Cow<'_, str> {
        VERSION.into()
    }

    fn plural(_: &Self::DynamicType) -> Cow<'_, str> {
        "events".into()
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::{Resource, ResourceExt};
    use serde_json::json;

    #[test]
    fn resource_identity() {
        assert_eq!(Event::api_version(&()), API_VERSION);
        assert_eq!(
            Event::url_path(&(), Some("default")),
            "/apis/events.k8s.io/v1beta1/namespaces/default/events"
        );
    }

    #[test]
    fn decodes_api_server_document() {
        let ev: Event = serde_json::from_value(json!({
            "apiVersion": "events.k8s.io/v1beta1",
            "kind": "Event",
            "metadata": { "name": "web.17a", "namespace": "default" },
            "eventTime": "2024-05-01T10:00:00.000000Z",
            "reason": "Scheduled",
            "type": "Normal",
            "regarding": { "kind": "Pod", "name": "web-0" },
            "deprecatedCount": 3
        }))
        .unwrap();
        assert_eq!(ev.name_any(), "web.17a");
        assert_eq!(ev.namespace().as_deref(), Some("default"));
        assert_eq!(ev.type_.as_deref(), Some("Normal"));
        assert_eq!(ev.regarding.and_then(|r| r.name).as_deref(), Some("web-0"));
        assert_eq!(ev.deprecated_count, Some(3));
        assert!(ev.event_time.is_some());
    }
}

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Declarative configuration of the `kind`/`apiVersion` pair, inlined into every
/// top-level apply configuration.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeMetaApplyConfiguration {
    pub kind: Option<String>,
    pub api_version: Option<String>,
}

/// Declarative configuration of the ObjectMeta type for use with apply.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMetaApplyConfiguration {
    pub name: Option<String>,
    pub generate_name: Option<String>,
    pub namespace: Option<String>,
    pub uid: Option<String>,
    pub resource_version: Option<String>,
    pub generation: Option<i64>,
    pub creation_timestamp: Option<Time>,
    pub deletion_timestamp: Option<Time>,
    pub deletion_grace_period_seconds: Option<i64>,
    pub labels: Option<BTreeMap<String, String>>,
    pub annotations: Option<BTreeMap<String, String>>,
    pub owner_references: Option<Vec<OwnerReferenceApplyConfiguration>>,
    pub finalizers: Option<Vec<String>>,
}

/// Declarative configuration of the OwnerReference type for use with apply.
#[skip_serializing_none]
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReferenceApplyConfiguration {
    pub api_version: Option<String>,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub uid: Option<String>,
    pub controller: Option<bool>,
    pub block_owner_deletion: Option<bool>,
}

/// Empty OwnerReference configuration, to be filled by chaining `with_*` calls.
pub fn owner_reference() -> OwnerReferenceApplyConfiguration {
    OwnerReferenceApplyConfiguration::default()
}

impl OwnerReferenceApplyConfiguration {
    pub fn with_api_version(mut self, value: impl Into<String>) -> Self {
        self.api_version = Some(value.into());
        self
    }

    pub fn with_kind(mut self, value: impl Into<String>) -> Self {
        self.kind = Some(value.into());
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

    pub fn with_controller(mut self, value: bool) -> Self {
        self.controller = Some(value);
        self
    }

    pub fn with_block_owner_deletion(mut self, value: bool) -> Self {
        self.block_owner_deletion = Some(value);
        self
    }
}

/// A top-level apply configuration: identity fields plus object metadata.
///
/// Implementors only expose their `type_meta` and `object_meta` fields (see
/// `#[derive(ApplyConfiguration)]`); the `with_*` mutators come from the default
/// methods below. Scalar mutators replace the previous value, map mutators merge
/// their entries into the existing map and list mutators append.
pub trait ObjectApplyConfiguration: Sized {
    fn type_meta(&self) -> &TypeMetaApplyConfiguration;
    fn type_meta_mut(&mut self) -> &mut TypeMetaApplyConfiguration;
    fn object_meta(&self) -> Option<&ObjectMetaApplyConfiguration>;
    fn object_meta_mut(&mut self) -> &mut Option<ObjectMetaApplyConfiguration>;

    /// Returns the metadata sub-object, creating an empty one on first use.
    fn ensure_object_meta_exists(&mut self) -> &mut ObjectMetaApplyConfiguration {
        self.object_meta_mut().get_or_insert_with(Default::default)
    }

    fn with_kind(mut self, value: impl Into<String>) -> Self {
        self.type_meta_mut().kind = Some(value.into());
        self
    }

    fn with_api_version(mut self, value: impl Into<String>) -> Self {
        self.type_meta_mut().api_version = Some(value.into());
        self
    }

    fn with_name(mut self, value: impl Into<String>) -> Self {
        self.ensure_object_meta_exists().name = Some(value.into());
        self
    }

    fn with_generate_name(mut self, value: impl Into<String>) -> Self {
        self.ensure_object_meta_exists().generate_name = Some(value.into());
        self
    }

    fn with_namespace(mut self, value: impl Into<String>) -> Self {
        self.ensure_object_meta_exists().namespace = Some(value.into());
        self
    }

    fn with_uid(mut self, value: impl Into<String>) -> Self {
        self.ensure_object_meta_exists().uid = Some(value.into());
        self
    }

    fn with_resource_version(mut self, value: impl Into<String>) -> Self {
        self.ensure_object_meta_exists().resource_version = Some(value.into());
        self
    }

    fn with_generation(mut self, value: i64) -> Self {
        self.ensure_object_meta_exists().generation = Some(value);
        self
    }

    fn with_creation_timestamp(mut self, value: Time) -> Self {
        self.ensure_object_meta_exists().creation_timestamp = Some(value);
        self
    }

    fn with_deletion_timestamp(mut self, value: Time) -> Self {
        self.ensure_object_meta_exists().deletion_timestamp = Some(value);
        self
    }

    fn with_deletion_grace_period_seconds(mut self, value: i64) -> Self {
        self.ensure_object_meta_exists().deletion_grace_period_seconds = Some(value);
        self
    }

    /// Puts the entries into the labels, overwriting existing entries with the same key.
    fn with_labels<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        merge_entries(&mut self.ensure_object_meta_exists().labels, entries);
        self
    }

    /// Puts the entries into the annotations, overwriting existing entries with the same key.
    fn with_annotations<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        merge_entries(&mut self.ensure_object_meta_exists().annotations, entries);
        self
    }

    /// Appends the values to the owner references.
    ///
    /// # Panics
    ///
    /// Panics if any value is `None`; nothing from the batch is appended in that case.
    fn with_owner_references<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Option<OwnerReferenceApplyConfiguration>>,
    {
        let values: Vec<OwnerReferenceApplyConfiguration> = values
            .into_iter()
            .map(|value| match value.into() {
                Some(value) => value,
                None => panic!("None value passed to with_owner_references"),
            })
            .collect();
        let meta = self.ensure_object_meta_exists();
        if !values.is_empty() {
            meta.owner_references.get_or_insert_with(Vec::new).extend(values);
        }
        self
    }

    /// Appends the values to the finalizers.
    fn with_finalizers<I>(mut self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let meta = self.ensure_object_meta_exists();
        if !values.is_empty() {
            meta.finalizers.get_or_insert_with(Vec::new).extend(values);
        }
        self
    }

    fn get_kind(&self) -> Option<&str> {
        self.type_meta().kind.as_deref()
    }

    fn get_api_version(&self) -> Option<&str> {
        self.type_meta().api_version.as_deref()
    }

    /// Creates the metadata sub-object if it does not exist yet.
    fn get_name(&mut self) -> Option<&str> {
        self.ensure_object_meta_exists().name.as_deref()
    }

    /// Creates the metadata sub-object if it does not exist yet.
    fn get_namespace(&mut self) -> Option<&str> {
        self.ensure_object_meta_exists().namespace.as_deref()
    }
}

fn merge_entries<I, K, V>(target: &mut Option<BTreeMap<String, String>>, entries: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    for (k, v) in entries {
        target
            .get_or_insert_with(BTreeMap::new)
            .insert(k.into(), v.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use applyconfig_derive::ApplyConfiguration;
    use serde_json::json;

    #[skip_serializing_none]
    #[derive(Serialize, Default, Debug, ApplyConfiguration)]
    struct WidgetApplyConfiguration {
        #[serde(flatten)]
        type_meta: TypeMetaApplyConfiguration,
        #[serde(rename = "metadata")]
        object_meta: Option<ObjectMetaApplyConfiguration>,
        color: Option<String>,
    }

    fn owner(uid: &str) -> OwnerReferenceApplyConfiguration {
        owner_reference()
            .with_api_version("apps/v1")
            .with_kind("Deployment")
            .with_name("web")
            .with_uid(uid)
    }

    #[test]
    fn scalar_mutators_keep_last_value() {
        let w = WidgetApplyConfiguration::default()
            .with_name("first")
            .with_generation(1)
            .with_name("second")
            .with_generation(7);
        let meta = w.object_meta().expect("metadata");
        assert_eq!(meta.name.as_deref(), Some("second"));
        assert_eq!(meta.generation, Some(7));
    }

    #[test]
    fn labels_merge_across_calls() {
        let w = WidgetApplyConfiguration::default()
            .with_labels([("app", "web"), ("tier", "frontend")])
            .with_labels([("tier", "backend"), ("team", "core")]);
        let labels = w.object_meta().and_then(|m| m.labels.clone()).expect("labels");
        assert_eq!(
            labels,
            BTreeMap::from([
                ("app".to_string(), "web".to_string()),
                ("team".to_string(), "core".to_string()),
                ("tier".to_string(), "backend".to_string()),
            ])
        );
    }

    #[test]
    fn empty_label_batch_leaves_map_unset() {
        let w = WidgetApplyConfiguration::default()
            .with_annotations(Vec::<(String, String)>::new());
        let meta = w.object_meta().expect("metadata is created");
        assert!(meta.annotations.is_none());
    }

    #[test]
    fn finalizers_append_without_dedup() {
        let w = WidgetApplyConfiguration::default()
            .with_finalizers(["a", "b"])
            .with_finalizers(["a"]);
        assert_eq!(
            w.object_meta().and_then(|m| m.finalizers.clone()),
            Some(vec!["a".to_string(), "b".to_string(), "a".to_string()])
        );
    }

    #[test]
    fn owner_references_append_in_call_order() {
        let w = WidgetApplyConfiguration::default()
            .with_owner_references([owner("1")])
            .with_owner_references([Some(owner("2")), Some(owner("3"))]);
        let uids: Vec<String> = w
            .object_meta()
            .and_then(|m| m.owner_references.clone())
            .unwrap_or_default()
            .into_iter()
            .filter_map(|o| o.uid)
            .collect();
        assert_eq!(uids, vec!["1", "2", "3"]);
    }

    #[test]
    #[should_panic(expected = "None value passed to with_owner_references")]
    fn none_owner_reference_panics() {
        let _ = WidgetApplyConfiguration::default()
            .with_owner_references([Some(owner("1")), None]);
    }

    #[test]
    fn metadata_is_absent_until_touched() {
        let w = WidgetApplyConfiguration::default().with_kind("Widget");
        assert!(w.object_meta().is_none());
        assert_eq!(
            serde_json::to_value(&w).unwrap(),
            json!({ "kind": "Widget" })
        );
    }

    #[test]
    fn metadata_getter_creates_empty_metadata() {
        let mut w = WidgetApplyConfiguration::default();
        assert_eq!(w.get_name(), None);
        assert_eq!(
            serde_json::to_value(&w).unwrap(),
            json!({ "metadata": {} })
        );
    }

    #[test]
    fn explicit_empty_value_is_serialized() {
        let mut w = WidgetApplyConfiguration::default().with_namespace("");
        w.color = Some(String::new());
        assert_eq!(
            serde_json::to_value(&w).unwrap(),
            json!({ "metadata": { "namespace": "" }, "color": "" })
        );
    }
}

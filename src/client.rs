use kube::{
    api::{Api, Patch, PatchParams},
    Client,
};
use tracing::*;

use crate::{
    api::events::v1beta1::Event,
    applyconfigurations::events::v1beta1::{
        extract_event, extract_event_status, EventApplyConfiguration,
    },
    Error, Result,
};

/// Fetch/extract/apply round trips for events in one namespace.
#[derive(Clone)]
pub struct EventClient {
    api: Api<Event>,
}

impl EventClient {
    pub fn namespaced(client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
        }
    }

    pub async fn get(&self, name: &str) -> Result<Event> {
        self.api.get(name).await.map_err(Error::KubeError)
    }

    /// Reads the event and extracts what `field_manager` owns on it.
    pub async fn extract(
        &self,
        name: &str,
        field_manager: &str,
    ) -> Result<EventApplyConfiguration> {
        let ev = self.get(name).await?;
        extract_event(&ev, field_manager)
    }

    pub async fn extract_status(
        &self,
        name: &str,
        field_manager: &str,
    ) -> Result<EventApplyConfiguration> {
        let ev = self.get(name).await?;
        extract_event_status(&ev, field_manager)
    }

    /// Submits `config` as a server-side apply patch owned by `field_manager`.
    pub async fn apply(
        &self,
        config: &EventApplyConfiguration,
        field_manager: &str,
        force: bool,
    ) -> Result<Event> {
        let name = config
            .object_meta
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .ok_or(Error::MissingName)?;
        let params = apply_params(field_manager, force);
        info!("Applying event {} as {}", name, field_manager);
        self.api
            .patch(name, &params, &Patch::Apply(config))
            .await
            .map_err(Error::KubeError)
    }
}

pub fn apply_params(field_manager: &str, force: bool) -> PatchParams {
    let params = PatchParams::apply(field_manager);
    if force { params.force() } else { params }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_params_carry_manager_and_force() {
        let params = apply_params("scheduler", true);
        assert_eq!(params.field_manager.as_deref(), Some("scheduler"));
        assert!(params.force);
        assert!(!apply_params("scheduler", false).force);
    }
}

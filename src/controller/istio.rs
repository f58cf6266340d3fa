use std::fmt::Debug;

use async_trait::async_trait;
use kube::{api::PostParams, Api, Client, Resource, ResourceExt};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

#[cfg(test)]
use mockall::automock;

use crate::{Gateway, VirtualService};

/// Create operations against Istio's networking API.
///
/// Resources are created in the namespace of their metadata.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IstioApi: Send + Sync {
    async fn create_gateway(&self, gateway: &Gateway) -> Result<(), kube::Error>;

    async fn create_virtual_service(
        &self,
        virtual_service: &VirtualService,
    ) -> Result<(), kube::Error>;
}

/// [`IstioApi`] backed by the cluster.
pub struct KubeIstioApi {
    client: Client,
}

impl KubeIstioApi {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IstioApi for KubeIstioApi {
    async fn create_gateway(&self, gateway: &Gateway) -> Result<(), kube::Error> {
        create(self.client.clone(), gateway).await
    }

    async fn create_virtual_service(
        &self,
        virtual_service: &VirtualService,
    ) -> Result<(), kube::Error> {
        create(self.client.clone(), virtual_service).await
    }
}

#[tracing::instrument(skip(client, obj), fields(name = ?obj.meta().name), level = "debug")]
async fn create<K>(client: Client, obj: &K) -> Result<(), kube::Error>
where
    K: Resource<DynamicType = ()> + Clone + Debug + DeserializeOwned + Serialize,
{
    let api: Api<K> = match obj.namespace() {
        Some(ns) => Api::namespaced(client, &ns),
        None => Api::default_namespaced(client),
    };
    let created = api.create(&PostParams::default(), obj).await?;
    info!(
        "Created {} {}/{}",
        K::kind(&()),
        created.namespace().unwrap_or_default(),
        created.name()
    );
    Ok(())
}

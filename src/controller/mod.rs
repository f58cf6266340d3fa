use std::sync::Arc;

use futures::StreamExt;
use k8s_openapi::{
    api::networking::v1::Ingress, apimachinery::pkg::apis::meta::v1::OwnerReference, Resource,
};
use kube::{
    api::ListParams,
    error::ErrorResponse,
    runtime::controller::{Action, Context, Controller},
    Api, Client,
};
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};

use crate::Config;

mod eligibility;
#[cfg(test)]
mod fixtures;
mod gateway;
mod istio;
mod route;
mod virtual_service;

pub use istio::{IstioApi, KubeIstioApi};
pub use route::ExtractionError;
use route::Parent;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to create gateway: {0}")]
    CreateGateway(#[source] kube::Error),

    #[error("failed to create virtual service, gateway {gateway} was left in place: {source}")]
    CreateVirtualService {
        gateway: String,
        #[source]
        source: kube::Error,
    },
}
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Result of handling an Ingress that did not fail.
#[derive(Debug, PartialEq, Clone)]
pub enum Outcome {
    /// Not a solver Ingress of the configured class.
    Ignored,
    /// A solver Ingress without usable routing.
    Skipped(ExtractionError),
    /// Both resources exist.
    Applied {
        gateway: Creation,
        virtual_service: Creation,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Creation {
    Created,
    AlreadyExists,
}

/// Watch Ingresses and expose HTTP-01 solvers through Istio.
pub async fn run(client: Client, config: Config) {
    let ingresses: Api<Ingress> = match config.namespace.as_deref() {
        Some(ns) => Api::namespaced(client.clone(), ns),
        None => Api::all(client.clone()),
    };
    let context = Context::new(ContextData {
        istio: Arc::new(KubeIstioApi::new(client)),
        config,
    });

    Controller::new(ingresses, ListParams::default())
        .run(reconciler, error_policy, context)
        .filter_map(|x| async move { x.ok() })
        .for_each(|(obj, action)| async move {
            trace!("Reconciled {}: {:?}", obj, action);
        })
        .await;
}

// Data to store in context
struct ContextData {
    istio: Arc<dyn IstioApi>,
    config: Config,
}

#[tracing::instrument(skip(ingress, ctx), level = "debug")]
async fn reconciler(ingress: Arc<Ingress>, ctx: Context<ContextData>) -> Result<Action> {
    let data = ctx.get_ref();
    let outcome = handle_ingress(&ingress, data.istio.as_ref(), &data.config).await?;
    trace!("outcome: {:?}", outcome);
    Ok(Action::await_change())
}

/// An error handler called when the reconciler fails.
#[allow(clippy::needless_pass_by_value)]
fn error_policy(error: &Error, ctx: Context<ContextData>) -> Action {
    warn!("reconciler failed: {}", error);
    Action::requeue(ctx.get_ref().config.retry_after())
}

/// Translate a solver `Ingress` into a `Gateway` and a `VirtualService`.
///
/// The `Gateway` is created first. Resources that already exist are left
/// untouched, so handling the same `Ingress` again is a no-op.
///
/// # Errors
///
/// Fails if either create call fails for a reason other than a conflict.
/// [`Error::CreateVirtualService`] means the `Gateway` was left behind.
#[tracing::instrument(
    skip_all,
    fields(namespace = ?ingress.metadata.namespace, name = ?ingress.metadata.name)
)]
pub async fn handle_ingress(
    ingress: &Ingress,
    istio: &dyn IstioApi,
    config: &Config,
) -> Result<Outcome> {
    if ingress.metadata.deletion_timestamp.is_some() {
        debug!("Ingress is being deleted");
        return Ok(Outcome::Ignored);
    }
    if !eligibility::is_eligible(ingress, config) {
        debug!("Unknown ingress");
        return Ok(Outcome::Ignored);
    }

    let (parent, route) = match route::parent_of(ingress)
        .and_then(|parent| route::extract_route(ingress).map(|route| (parent, route)))
    {
        Ok(found) => found,
        Err(err) => {
            warn!("No rules in spec: {}", err);
            return Ok(Outcome::Skipped(err));
        }
    };
    info!(
        "Got Ingress with host '{}', service '{}:{}' on path '{}'",
        route.host, route.service_name, route.service_port, route.path
    );

    let gateway = gateway::build_gateway(&parent, &route.host, &config.gateway_selector);
    let virtual_service =
        virtual_service::build_virtual_service(&parent, &route, &config.service_domain);
    log_body("gateway", &gateway);
    log_body("virtual service", &virtual_service);

    let gateway_created =
        absorb_conflict(istio.create_gateway(&gateway).await).map_err(Error::CreateGateway)?;
    if gateway_created == Creation::AlreadyExists {
        debug!("Gateway already exists");
    }

    let gateway_name = gateway::gateway_name(&parent.name);
    let virtual_service_created =
        match absorb_conflict(istio.create_virtual_service(&virtual_service).await) {
            Ok(created) => created,
            Err(source) => {
                error!(
                    "Gateway {}/{} has no virtual service; it is removed with the ingress",
                    parent.namespace, gateway_name
                );
                return Err(Error::CreateVirtualService {
                    gateway: gateway_name,
                    source,
                });
            }
        };
    if virtual_service_created == Creation::AlreadyExists {
        debug!("VirtualService already exists");
    }

    Ok(Outcome::Applied {
        gateway: gateway_created,
        virtual_service: virtual_service_created,
    })
}

fn log_body<T: serde::Serialize>(kind: &str, body: &T) {
    match serde_json::to_string(body) {
        Ok(json) => debug!("Built {}: {}", kind, json),
        Err(err) => warn!("Failed to serialize {}: {}", kind, err),
    }
}

fn absorb_conflict(
    result: std::result::Result<(), kube::Error>,
) -> std::result::Result<Creation, kube::Error> {
    match result {
        Ok(()) => Ok(Creation::Created),
        Err(kube::Error::Api(ErrorResponse { code: 409, .. })) => Ok(Creation::AlreadyExists),
        Err(err) => Err(err),
    }
}

fn to_owner_reference(parent: &Parent) -> OwnerReference {
    OwnerReference {
        api_version: <Ingress as Resource>::API_VERSION.to_string(),
        kind: <Ingress as Resource>::KIND.to_string(),
        name: parent.name.clone(),
        uid: parent.uid.clone(),
        controller: Some(true),
        block_owner_deletion: Some(true),
    }
}

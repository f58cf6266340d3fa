use std::collections::BTreeMap;

use crate::{Gateway, GatewaySpec, Server, ServerPort};

use super::route::Parent;

pub(super) fn gateway_name(ingress_name: &str) -> String {
    format!("temp-{}-istio-ingress-gateway", ingress_name)
}

/// Plain HTTP listener on port 80 for `host`, served by pods matching `selector`.
pub(super) fn build_gateway(
    parent: &Parent,
    host: &str,
    selector: &BTreeMap<String, String>,
) -> Gateway {
    let mut gateway = Gateway::new(
        &gateway_name(&parent.name),
        GatewaySpec {
            selector: selector.clone(),
            servers: vec![Server {
                port: ServerPort {
                    number: 80,
                    name: "http".into(),
                    protocol: "HTTP".into(),
                },
                hosts: vec![host.to_owned()],
            }],
        },
    );
    gateway.metadata.namespace = Some(parent.namespace.clone());
    gateway.metadata.owner_references = Some(vec![super::to_owner_reference(parent)]);
    gateway
}

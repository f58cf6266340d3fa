use crate::{
    Destination, HttpMatchRequest, HttpRoute, HttpRouteDestination, PortSelector, StringMatch,
    VirtualService, VirtualServiceSpec,
};

use super::{
    gateway::gateway_name,
    route::{Parent, Route},
};

pub(super) fn virtual_service_name(ingress_name: &str) -> String {
    format!("temp-{}-virtual-service", ingress_name)
}

/// Routes requests for `route.host` under `route.path` to the solver service,
/// bound to the Gateway built for the same Ingress.
pub(super) fn build_virtual_service(
    parent: &Parent,
    route: &Route,
    service_domain: &str,
) -> VirtualService {
    let mut virtual_service = VirtualService::new(
        &virtual_service_name(&parent.name),
        VirtualServiceSpec {
            hosts: vec![route.host.clone()],
            gateways: vec![gateway_name(&parent.name)],
            http: vec![HttpRoute {
                match_: vec![HttpMatchRequest {
                    uri: StringMatch::Prefix(route.path.clone()),
                }],
                route: vec![HttpRouteDestination {
                    destination: Destination {
                        host: format!("{}.{}", route.service_name, service_domain),
                        port: PortSelector {
                            number: route.service_port,
                        },
                    },
                }],
            }],
        },
    );
    virtual_service.metadata.namespace = Some(parent.namespace.clone());
    virtual_service.metadata.owner_references = Some(vec![super::to_owner_reference(parent)]);
    virtual_service
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::Config;

    fn parent(name: &str) -> Parent {
        Parent {
            name: name.into(),
            namespace: "ns1".into(),
            uid: "abc-123".into(),
        }
    }

    fn route() -> Route {
        Route {
            host: "example.com".into(),
            service_name: "cm-acme-http-solver".into(),
            service_port: 8089,
            path: "/.well-known/acme-challenge/".into(),
        }
    }

    #[test]
    fn serializes_virtual_service() {
        let vs = build_virtual_service(&parent("foo"), &route(), &Config::default().service_domain);
        assert_eq!(
            serde_json::to_value(&vs).unwrap(),
            json!({
                "apiVersion": "networking.istio.io/v1beta1",
                "kind": "VirtualService",
                "metadata": {
                    "name": "temp-foo-virtual-service",
                    "namespace": "ns1",
                    "ownerReferences": [{
                        "apiVersion": "networking.k8s.io/v1",
                        "kind": "Ingress",
                        "name": "foo",
                        "uid": "abc-123",
                        "controller": true,
                        "blockOwnerDeletion": true
                    }]
                },
                "spec": {
                    "hosts": ["example.com"],
                    "gateways": ["temp-foo-istio-ingress-gateway"],
                    "http": [{
                        "match": [{ "uri": { "prefix": "/.well-known/acme-challenge/" } }],
                        "route": [{
                            "destination": {
                                "host": "cm-acme-http-solver.istio-system.svc.cluster.local",
                                "port": { "number": 8089 }
                            }
                        }]
                    }]
                }
            })
        );
    }

    #[test]
    fn gateway_reference_matches_gateway_name() {
        for name in ["foo", "cm-acme-http-solver-7fz2b", "a1-2-3"] {
            let vs = build_virtual_service(&parent(name), &route(), "svc.cluster.local");
            assert_eq!(vs.spec.gateways, vec![gateway_name(name)]);
            assert_eq!(
                vs.metadata.name.as_deref(),
                Some(format!("temp-{}-virtual-service", name).as_str())
            );
        }
    }

    #[test]
    fn uses_service_domain() {
        let vs = build_virtual_service(&parent("foo"), &route(), "solvers.svc.cluster.local");
        assert_eq!(
            vs.spec.http[0].route[0].destination.host,
            "cm-acme-http-solver.solvers.svc.cluster.local"
        );
    }
}

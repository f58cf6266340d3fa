use k8s_openapi::api::networking::v1::Ingress;
use kube::error::ErrorResponse;
use serde_json::json;

/// A solver Ingress as created by cert-manager for `example.com`.
pub(crate) fn solver_ingress() -> Ingress {
    solver_ingress_named("foo")
}

pub(crate) fn solver_ingress_named(name: &str) -> Ingress {
    serde_json::from_value(json!({
        "apiVersion": "networking.k8s.io/v1",
        "kind": "Ingress",
        "metadata": {
            "name": name,
            "namespace": "ns1",
            "uid": "abc-123",
            "labels": {
                "acme.cert-manager.io/http01-solver": "true"
            }
        },
        "spec": {
            "ingressClassName": "istio",
            "rules": [{
                "host": "example.com",
                "http": {
                    "paths": [{
                        "path": "/.well-known/acme-challenge/",
                        "pathType": "ImplementationSpecific",
                        "backend": {
                            "service": {
                                "name": "cm-acme-http-solver",
                                "port": { "number": 8089 }
                            }
                        }
                    }]
                }
            }]
        }
    }))
    .unwrap()
}

pub(crate) fn api_error(code: u16, reason: &str) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".into(),
        message: format!("request failed: {}", reason),
        reason: reason.into(),
        code,
    })
}

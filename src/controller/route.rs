use k8s_openapi::api::networking::v1::Ingress;
use thiserror::Error;

/// Why an eligible Ingress could not be translated.
#[derive(Debug, Error, PartialEq, Clone)]
pub enum ExtractionError {
    #[error("no rules in spec")]
    NoRules,

    #[error("first rule has no HTTP paths")]
    NoPaths,

    #[error("missing {0}")]
    MissingField(&'static str),

    #[error("service port {0} is out of range")]
    InvalidPort(i32),
}

/// The Ingress that owns the generated resources.
#[derive(Debug, PartialEq, Clone)]
pub(super) struct Parent {
    pub name: String,
    pub namespace: String,
    pub uid: String,
}

/// Routing taken from the first path of the first rule.
#[derive(Debug, PartialEq, Clone)]
pub(super) struct Route {
    pub host: String,
    pub service_name: String,
    pub service_port: u16,
    pub path: String,
}

pub(super) fn parent_of(ingress: &Ingress) -> Result<Parent, ExtractionError> {
    let meta = &ingress.metadata;
    Ok(Parent {
        name: non_empty(meta.name.as_ref(), ".metadata.name")?,
        namespace: non_empty(meta.namespace.as_ref(), ".metadata.namespace")?,
        uid: non_empty(meta.uid.as_ref(), ".metadata.uid")?,
    })
}

/// Extract the route. Rules and paths after the first are ignored.
pub(super) fn extract_route(ingress: &Ingress) -> Result<Route, ExtractionError> {
    let rule = ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.rules.as_ref())
        .and_then(|rules| rules.first())
        .ok_or(ExtractionError::NoRules)?;
    let path = rule
        .http
        .as_ref()
        .and_then(|http| http.paths.first())
        .ok_or(ExtractionError::NoPaths)?;
    let service = path
        .backend
        .service
        .as_ref()
        .ok_or(ExtractionError::MissingField(".backend.service"))?;
    let port = service
        .port
        .as_ref()
        .and_then(|port| port.number)
        .ok_or(ExtractionError::MissingField(".backend.service.port.number"))?;

    Ok(Route {
        host: non_empty(rule.host.as_ref(), ".host")?,
        service_name: non_empty(Some(&service.name), ".backend.service.name")?,
        service_port: u16::try_from(port)
            .ok()
            .filter(|&p| p > 0)
            .ok_or(ExtractionError::InvalidPort(port))?,
        path: non_empty(path.path.as_ref(), ".path")?,
    })
}

fn non_empty(value: Option<&String>, field: &'static str) -> Result<String, ExtractionError> {
    value
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or(ExtractionError::MissingField(field))
}

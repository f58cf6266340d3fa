use std::{collections::BTreeMap, path::Path, time::Duration};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable pointing to an optional YAML config file.
pub const CONFIG_ENV: &str = "ACME_ISTIO_BRIDGE_CONFIG";

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read config: {0}")]
    ReadConfig(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    ParseConfig(#[source] serde_yaml::Error),

    #[error("retryAfterSeconds must be at least 1")]
    ZeroRetryAfter,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Only Ingresses of this class are translated.
    pub ingress_class_name: String,
    /// Label cert-manager puts on solver Ingresses. Must be `"true"`.
    pub solver_label: String,
    /// Labels selecting the Istio ingress gateway pods.
    pub gateway_selector: BTreeMap<String, String>,
    /// Suffix appended to the backend service name to form the destination host.
    pub service_domain: String,
    /// Namespace to watch. All namespaces when unset.
    pub namespace: Option<String>,
    /// Delay before retrying an Ingress whose resources failed to be created.
    pub retry_after_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ingress_class_name: "istio".to_owned(),
            solver_label: "acme.cert-manager.io/http01-solver".to_owned(),
            gateway_selector: BTreeMap::from([("app".to_owned(), "istio-ingress".to_owned())]),
            service_domain: "istio-system.svc.cluster.local".to_owned(),
            namespace: None,
            retry_after_seconds: 60,
        }
    }
}

impl Config {
    /// Load from the file named by [`CONFIG_ENV`], or use defaults if it's not set.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(Error::ReadConfig)?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let config: Self = serde_yaml::from_slice(bytes).map_err(Error::ParseConfig)?;
        if config.retry_after_seconds == 0 {
            return Err(Error::ZeroRetryAfter);
        }
        Ok(config)
    }

    #[must_use]
    pub fn retry_after(&self) -> Duration {
        Duration::from_secs(self.retry_after_seconds)
    }
}

use k8s_openapi::api::networking::v1::Ingress;

use crate::Config;

/// Whether `ingress` is an HTTP-01 solver Ingress served by the Istio ingress class.
///
/// Missing `spec`, class, or labels make the Ingress ineligible.
pub(super) fn is_eligible(ingress: &Ingress, config: &Config) -> bool {
    let class_matches = ingress
        .spec
        .as_ref()
        .and_then(|spec| spec.ingress_class_name.as_deref())
        .map_or(false, |class| class == config.ingress_class_name);
    let is_solver = ingress
        .metadata
        .labels
        .as_ref()
        .and_then(|labels| labels.get(&config.solver_label))
        .map_or(false, |value| value == "true");
    class_matches && is_solver
}

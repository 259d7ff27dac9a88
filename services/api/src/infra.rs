use credit_approval::credit::ArtifactGateway;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) gateway: Arc<ArtifactGateway>,
}

impl AppState {
    pub(crate) fn model_status(&self) -> &'static str {
        if self.gateway.is_loaded() {
            "loaded"
        } else {
            "unavailable"
        }
    }
}

//! Server health check
//!
//! Fetches the server configuration and reports what the service exposes.

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::http::{HttpClient, HttpRequest};
use crate::models::{CheckKind, CheckResult, ServerConfig, SERVER_CONFIG_PATH};
use crate::utils::Timer;

/// `GET /api/v1/server-config` must answer 200
#[derive(Clone, Debug)]
pub struct HealthCheck {
    pub timeout_secs: u64,
}

impl HealthCheck {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<CheckResult> {
        info!("Running server health check");
        let timer = Timer::start("health check");

        let request = HttpRequest::get(SERVER_CONFIG_PATH).timeout(self.timeout_secs);

        let result = match client.send(request).await {
            Ok(resp) if resp.is_ok() => {
                let config = ServerConfig::from_body(&resp.body);
                debug!("Server config after {}ms: {:?}", resp.duration_ms, config);

                CheckResult::pass(CheckKind::Health, timer.stop(), "Server connection OK")
                    .with_detail(format!("Available models: {}", config.model_count))
                    .with_detail(format!(
                        "File manager enabled: {}",
                        config.enable_file_manager
                    ))
                    .with_detail(format!("Auto-saving enabled: {}", config.enable_auto_saving))
            }
            Ok(resp) => CheckResult::fail(
                CheckKind::Health,
                timer.stop(),
                format!("Server responded with error: {}", resp.status_code),
            ),
            Err(e) => {
                warn!("Health check request failed: {e}");
                CheckResult::error(
                    CheckKind::Health,
                    timer.stop(),
                    format!("Cannot connect to server: {e}"),
                )
            }
        };

        Ok(result)
    }
}

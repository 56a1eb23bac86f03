//! Model info check

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::http::{HttpClient, HttpRequest};
use crate::models::{CheckKind, CheckResult, ModelInfo, MODEL_PATH};
use crate::utils::Timer;

/// `GET /api/v1/model` must answer 200; reports the active model
#[derive(Clone, Debug)]
pub struct ModelCheck {
    pub timeout_secs: u64,
}

impl ModelCheck {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    pub async fn run(&self, client: &HttpClient) -> Result<CheckResult> {
        info!("Running model info check");
        let timer = Timer::start("model check");

        let request = HttpRequest::get(MODEL_PATH).timeout(self.timeout_secs);

        let result = match client.send(request).await {
            Ok(resp) if resp.is_ok() => {
                let model = ModelInfo::from_body(&resp.body);
                debug!("Model {} reported after {}ms", model.name, resp.duration_ms);
                CheckResult::pass(CheckKind::Model, timer.stop(), "Model info retrieved")
                    .with_detail(format!("Current model: {}", model.name))
            }
            Ok(resp) => CheckResult::fail(
                CheckKind::Model,
                timer.stop(),
                format!("Failed to get current model: {}", resp.status_code),
            ),
            Err(e) => {
                warn!("Model request failed: {e}");
                CheckResult::error(
                    CheckKind::Model,
                    timer.stop(),
                    format!("Request failed: {e}"),
                )
            }
        };

        Ok(result)
    }
}

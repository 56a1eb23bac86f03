//! Inpaint round-trip check
//!
//! Sends a synthetic image and mask to the inpaint endpoint and stores the
//! image the service returns.

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::http::{HttpClient, HttpRequest, HttpResponse};
use crate::imaging::{
    create_test_image, create_test_mask, decode_image, save_image, to_base64_png, TEST_IMAGE_SIZE,
};
use crate::models::{
    CheckKind, CheckResult, InpaintParams, InpaintRequest, INPAINT_PATH, SEED_HEADER,
};
use crate::utils::Timer;

/// `POST /api/v1/inpaint` must answer 200 with an image
#[derive(Clone, Debug)]
pub struct InpaintCheck {
    pub params: InpaintParams,
    pub timeout_secs: u64,
    pub output_path: PathBuf,
    pub image_size: u32,
}

impl InpaintCheck {
    pub fn new(params: InpaintParams, timeout_secs: u64, output_path: impl Into<PathBuf>) -> Self {
        Self {
            params,
            timeout_secs,
            output_path: output_path.into(),
            image_size: TEST_IMAGE_SIZE,
        }
    }

    /// Build the request payload from freshly drawn image and mask
    pub fn build_request(&self) -> Result<InpaintRequest> {
        let size = self.image_size;
        let image = DynamicImage::ImageRgb8(create_test_image(size, size));
        let mask = DynamicImage::ImageLuma8(create_test_mask(size, size));

        Ok(InpaintRequest::new(
            to_base64_png(&image).context("Failed to encode test image")?,
            to_base64_png(&mask).context("Failed to encode test mask")?,
            self.params.clone(),
        ))
    }

    pub async fn run(&self, client: &HttpClient) -> Result<CheckResult> {
        info!("Running inpaint check");
        let timer = Timer::start("inpaint check");

        let payload = serde_json::to_string(&self.build_request()?)
            .context("Failed to serialize inpaint request")?;
        debug!("Inpaint payload is {} bytes", payload.len());

        let request = HttpRequest::post(INPAINT_PATH)
            .json(payload)
            .timeout(self.timeout_secs);

        let result = match client.send(request).await {
            Ok(resp) if resp.is_ok() => self.store_result(&resp, timer),
            Ok(resp) => {
                let result = CheckResult::fail(
                    CheckKind::Inpaint,
                    timer.stop(),
                    format!("Inpaint failed: {}", resp.status_code),
                );
                let text = resp.text();
                if text.trim().is_empty() {
                    result
                } else {
                    result.with_detail(format!("Error message: {}", text.trim()))
                }
            }
            Err(e) => {
                warn!("Inpaint request failed: {e}");
                CheckResult::error(
                    CheckKind::Inpaint,
                    timer.stop(),
                    format!("Request failed: {e}"),
                )
            }
        };

        Ok(result)
    }

    fn store_result(&self, resp: &HttpResponse, timer: Timer) -> CheckResult {
        debug!(
            "Inpaint returned {} bytes after {}ms",
            resp.body.len(),
            resp.duration_ms
        );

        let image = match decode_image(&resp.body) {
            Ok(image) => image,
            Err(e) => {
                return CheckResult::fail(
                    CheckKind::Inpaint,
                    timer.stop(),
                    format!("Inpaint returned an unreadable image: {e:#}"),
                )
            }
        };

        if let Err(e) = save_image(&image, &self.output_path) {
            return CheckResult::error(CheckKind::Inpaint, timer.stop(), format!("{e:#}"));
        }

        let mut result = CheckResult::pass(CheckKind::Inpaint, timer.stop(), "Inpainting succeeded")
            .with_detail(format!("Result saved to {}", self.output_path.display()));

        if let Some(seed) = resp.get_header(SEED_HEADER) {
            result = result.with_detail(format!("Seed used: {seed}"));
        }

        result
    }
}

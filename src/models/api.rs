//! IOPaint API payloads
//!
//! Response bodies are read leniently: a missing field, a field of the
//! wrong type, or a body that is not JSON at all falls back to a default
//! instead of failing the check.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SERVER_CONFIG_PATH: &str = "/api/v1/server-config";
pub const INPAINT_PATH: &str = "/api/v1/inpaint";
pub const MODEL_PATH: &str = "/api/v1/model";

/// Response header carrying the seed the service actually used
pub const SEED_HEADER: &str = "X-Seed";

/// Parse a body as JSON, or `Value::Null` if it is not JSON
fn parse_lenient(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// Fields of `GET /api/v1/server-config` the health check reports
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub model_count: usize,
    pub enable_file_manager: bool,
    pub enable_auto_saving: bool,
}

impl ServerConfig {
    pub fn from_body(body: &[u8]) -> Self {
        let value = parse_lenient(body);
        Self {
            model_count: value
                .get("modelInfos")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            enable_file_manager: value
                .get("enableFileManager")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            enable_auto_saving: value
                .get("enableAutoSaving")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        }
    }
}

/// `GET /api/v1/model` response
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub name: String,
}

impl ModelInfo {
    pub fn from_body(body: &[u8]) -> Self {
        let name = parse_lenient(body)
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        Self { name }
    }
}

/// Tunable inpainting parameters sent with every request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InpaintParams {
    pub ldm_steps: u32,
    pub ldm_sampler: String,
    pub hd_strategy: String,
    pub prompt: String,
    pub negative_prompt: String,
    pub sd_seed: i64,
}

impl Default for InpaintParams {
    fn default() -> Self {
        Self {
            // few steps keep the round-trip fast
            ldm_steps: 10,
            ldm_sampler: "plms".to_string(),
            hd_strategy: "CROP".to_string(),
            prompt: String::new(),
            negative_prompt: String::new(),
            sd_seed: 42,
        }
    }
}

/// `POST /api/v1/inpaint` request body
#[derive(Clone, Debug, Serialize)]
pub struct InpaintRequest {
    /// Base64 PNG
    pub image: String,
    /// Base64 PNG, white marks the region to reconstruct
    pub mask: String,
    #[serde(flatten)]
    pub params: InpaintParams,
}

impl InpaintRequest {
    pub fn new(image: String, mask: String, params: InpaintParams) -> Self {
        Self {
            image,
            mask,
            params,
        }
    }
}

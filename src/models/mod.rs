//! Data models for IOPaint checks
//!
//! Check results and the API payloads exchanged with the service.

mod api;
mod check;

pub use api::{
    InpaintParams, InpaintRequest, ModelInfo, ServerConfig, INPAINT_PATH, MODEL_PATH, SEED_HEADER,
    SERVER_CONFIG_PATH,
};
pub use check::{CheckKind, CheckResult, CheckSelection, CheckStatus, RunSummary};

//! IOPaint service checks
//!
//! - Health: `GET /api/v1/server-config`
//! - Inpaint: `POST /api/v1/inpaint` with a synthetic image and mask
//! - Model: `GET /api/v1/model`
//!
//! A check never returns `Err` for anything the service does; transport
//! failures and bad statuses become failed results. `Err` is reserved for
//! local problems such as payload encoding.

mod health;
mod inpaint;
mod model;

pub use health::HealthCheck;
pub use inpaint::InpaintCheck;
pub use model::ModelCheck;

//! HTTP client module
//!
//! Provides the HTTP client used to reach the IOPaint service.

mod client;

pub use client::{HttpClient, HttpRequest, HttpResponse};

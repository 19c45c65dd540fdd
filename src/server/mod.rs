//! Local HTTP surface over the report handlers
//!
//! Only `tiny_http` is wired up; requests are served one at a time from a
//! dataset loaded at startup.

#[cfg(feature = "ui")]
pub mod tiny_http;

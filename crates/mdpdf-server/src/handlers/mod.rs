//! HTTP request handlers.

pub(crate) mod health;
pub(crate) mod pdf;

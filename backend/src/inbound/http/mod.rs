//! HTTP inbound adapter exposing the portal's REST endpoints.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod drivers;
pub mod error;
pub mod feedback;
pub mod health;
pub mod i18n;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

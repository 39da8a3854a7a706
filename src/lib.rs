//! Outbound webhooks for EchoDay.
//!
//! Configurations live in a [`store::ConfigStore`] persisted through a
//! [`store::KeyValueStore`]; [`service::WebhookService`] formats events per
//! integration target and hands them to [`dispatch::Dispatcher`], which
//! retries with linear backoff. [`routes`] exposes the service over HTTP.

pub mod dispatch;
pub mod error;
pub mod format;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod templates;

pub use error::{Result, WebhookError};

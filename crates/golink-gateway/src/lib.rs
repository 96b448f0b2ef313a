//! HTTP surface of the go-link service.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::{AppState, RenderConfig};

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod generation;
pub mod interface;
pub mod model;
pub mod notice;
pub mod render;

pub use app::{App, RenderOutcome};
pub use config::ClientConfig;
pub use error::{Error, ErrorKind, Result};

//! Client module - HTTP access to the activities backend
//!
//! Both implementations speak the same [`RequestApi`](crate::interface::RequestApi):
//! gloo_net over the browser fetch API for WASM, reqwest for everything else.

#[cfg(feature = "no-wasm")]
pub mod request;
#[cfg(feature = "no-wasm")]
pub use request::NoWasmClient;

#[cfg(feature = "wasm")]
pub mod gloo;
#[cfg(feature = "wasm")]
pub use gloo::WasmClient;

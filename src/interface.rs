#![allow(async_fn_in_trait)] // single-threaded UI code, futures need not be Send

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::model::{ActivityCatalog, ApiReply, EnrollmentParams};
use crate::notice::Notice;
use crate::render::CatalogView;

/// Common trait for HTTP client construction
pub trait HttpClient {
    /// Create a new HTTP client talking to `config.base_url`
    async fn new(config: &ClientConfig) -> Result<Self>
    where
        Self: Sized;
}

/// Backend operations used by the activity board
pub trait RequestApi {
    /// Fetch the full catalog. Non-2xx and non-JSON responses are errors.
    async fn fetch_activities(&self) -> Result<ActivityCatalog>;

    /// Register `email` for `activity`. `Err` only when no response arrived.
    async fn signup(&self, params: EnrollmentParams<'_>) -> Result<ApiReply>;

    /// Remove `email` from `activity`. `Err` only when no response arrived.
    async fn unregister(&self, params: EnrollmentParams<'_>) -> Result<ApiReply>;
}

/// Where the board draws itself: the page DOM, a terminal, or a test recorder.
pub trait ActivitySurface {
    /// Replace the activity list and the select options with `view`.
    fn render_catalog(&self, view: &CatalogView);

    /// Replace the activity list with a failure message; options untouched.
    fn render_load_failure(&self, message: &str);

    fn show_notice(&self, notice: &Notice);

    fn hide_notice(&self);

    /// Clear the signup form inputs.
    fn reset_form(&self);
}

/// Delay source for notice dismissal.
pub trait Timer {
    async fn sleep(&self, duration: Duration);
}

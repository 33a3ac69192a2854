//! Application module - the activity board controller
//!
//! [`App`] owns the render fence and the notice board and drives the three
//! user-facing operations against any [`RequestApi`] / [`ActivitySurface`]
//! pair. Platform wiring lives in the feature-gated submodules.

use futures::future::join;

use crate::config::ClientConfig;
use crate::generation::RenderFence;
use crate::interface::{ActivitySurface, RequestApi, Timer};
use crate::model::EnrollmentParams;
use crate::notice::{Notice, NoticeBoard, NoticeKind, NoticeToken};
use crate::render::{CatalogView, LOAD_FAILURE};

// Platform-specific modules
#[cfg(feature = "no-wasm")]
pub mod request;
#[cfg(feature = "no-wasm")]
pub use request::*;

#[cfg(feature = "wasm")]
pub mod gloo;
#[cfg(feature = "wasm")]
pub use gloo::*;

pub const SIGNUP_FALLBACK: &str = "An error occurred";
pub const SIGNUP_FAILURE: &str = "Failed to sign up. Please try again.";

/// What a call to [`App::load_and_render`] did to the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Catalog rendered with this many activities.
    Rendered(usize),
    /// Load failed and the failure message was rendered.
    Failed,
    /// A newer load was issued meanwhile; this result was dropped.
    Stale,
}

pub struct App<C, S, T> {
    client: C,
    surface: S,
    timer: T,
    config: ClientConfig,
    fence: RenderFence,
    notices: NoticeBoard,
}

impl<C, S, T> App<C, S, T>
where
    C: RequestApi,
    S: ActivitySurface,
    T: Timer,
{
    pub fn new(client: C, surface: S, timer: T, config: ClientConfig) -> Self {
        Self {
            client,
            surface,
            timer,
            config,
            fence: RenderFence::new(),
            notices: NoticeBoard::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the catalog and rebuild the whole view from it.
    pub async fn load_and_render(&self) -> RenderOutcome {
        let generation = self.fence.begin();
        let fetched = self.client.fetch_activities().await;

        if !self.fence.is_current(generation) {
            log::debug!("Dropping catalog from superseded render {generation:?}");
            return RenderOutcome::Stale;
        }

        match fetched {
            Ok(catalog) => {
                let view = CatalogView::build(&catalog);
                self.surface.render_catalog(&view);
                log::debug!("Rendered {} activities", view.cards.len());
                RenderOutcome::Rendered(view.cards.len())
            }
            Err(e) => {
                log::error!("Error fetching activities: {e}");
                self.surface.render_load_failure(LOAD_FAILURE);
                RenderOutcome::Failed
            }
        }
    }

    /// Register `email` for `activity`, show the result, and refresh on
    /// success. Resolves once the notice has timed out.
    pub async fn signup(&self, activity: &str, email: &str) -> Notice {
        let params = EnrollmentParams { activity, email };

        let (kind, text) = match self.client.signup(params).await {
            Ok(reply) if reply.is_success() => match reply.body {
                Some(_) => (NoticeKind::Success, reply.message().unwrap_or_default()),
                None => {
                    log::error!("Error signing up: response body is not JSON");
                    (NoticeKind::Error, SIGNUP_FAILURE.to_string())
                }
            },
            Ok(reply) => {
                log::warn!("Signup for {activity} rejected with status {}", reply.status);
                let detail = reply.detail().unwrap_or_else(|| SIGNUP_FALLBACK.to_string());
                (NoticeKind::Error, detail)
            }
            Err(e) => {
                log::error!("Error signing up: {e}");
                (NoticeKind::Error, SIGNUP_FAILURE.to_string())
            }
        };

        let notice = self.notices.post(kind, text);
        self.surface.show_notice(&notice);

        if kind == NoticeKind::Success {
            self.surface.reset_form();
            join(self.load_and_render(), self.dismiss_later(notice.token)).await;
        } else {
            self.dismiss_later(notice.token).await;
        }

        notice
    }

    /// Remove a participant and refresh. Failures are logged, never shown.
    pub async fn unregister(&self, activity: &str, identity: &str) -> bool {
        let params = EnrollmentParams {
            activity,
            email: identity,
        };

        match self.client.unregister(params).await {
            Ok(reply) if reply.is_success() => {
                self.load_and_render().await;
                true
            }
            Ok(reply) => {
                log::error!(
                    "Failed to unregister participant {identity} from {activity}: status {}",
                    reply.status
                );
                false
            }
            Err(e) => {
                log::error!("Error unregistering participant: {e}");
                false
            }
        }
    }

    async fn dismiss_later(&self, token: NoticeToken) {
        self.timer.sleep(self.config.notice_timeout).await;
        if self.notices.expire(token) {
            self.surface.hide_notice();
        } else {
            log::debug!("Notice {token:?} already superseded");
        }
    }
}

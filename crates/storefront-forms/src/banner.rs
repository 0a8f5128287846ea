//! Self-dismissing submission banners
//!
//! A banner stays visible for a while, fades, and is removed once the fade
//! has played. Each dismissal runs as a task on the [`Runtime`] under a
//! child of the queue's cancellation token, so a host that takes the form off
//! the page can cancel every pending dismissal at once.

use crate::runtime::Runtime;
use std::rc::Rc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// Where the banner goes relative to the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    BeforeForm,
    AfterForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub severity: Severity,
    pub placement: Placement,
}

impl Banner {
    /// Success banners follow the form
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
            placement: Placement::AfterForm,
        }
    }

    /// Error banners precede the form
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
            placement: Placement::BeforeForm,
        }
    }

    /// CSS class hosts render the banner with
    pub fn class_name(&self) -> &'static str {
        match self.severity {
            Severity::Success => "form-success",
            Severity::Error => "form-error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerId(pub u64);

/// Host side of banner display
///
/// `fade` and `remove` return `false` when the banner is no longer on the
/// page; the dismissal task then stops quietly.
pub trait BannerSurface {
    fn show_banner(&self, banner: &Banner) -> BannerId;

    fn fade_banner(&self, id: BannerId) -> bool;

    fn remove_banner(&self, id: BannerId) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTiming {
    pub visible: Duration,
    pub fade: Duration,
}

impl Default for BannerTiming {
    fn default() -> Self {
        Self {
            visible: Duration::from_millis(5000),
            fade: Duration::from_millis(300),
        }
    }
}

/// Shows banners and schedules their dismissal
pub struct BannerQueue<R> {
    runtime: R,
    timing: BannerTiming,
    token: CancellationToken,
}

impl<R: Runtime> BannerQueue<R> {
    pub fn new(runtime: R, timing: BannerTiming) -> Self {
        Self {
            runtime,
            timing,
            token: CancellationToken::new(),
        }
    }

    pub fn timing(&self) -> BannerTiming {
        self.timing
    }

    /// Display `banner` on `surface` and schedule its fade and removal
    pub fn show<S>(&self, surface: Rc<S>, banner: Banner) -> BannerId
    where
        S: BannerSurface + ?Sized + 'static,
    {
        let id = surface.show_banner(&banner);
        debug!(banner = id.0, severity = ?banner.severity, "banner shown");

        let runtime = self.runtime.clone();
        let timing = self.timing;
        let token = self.token.child_token();

        self.runtime.spawn(Box::pin(async move {
            let dismissal = async {
                runtime.sleep(timing.visible).await;
                if !surface.fade_banner(id) {
                    debug!(banner = id.0, "banner already gone before fade");
                    return;
                }
                runtime.sleep(timing.fade).await;
                if !surface.remove_banner(id) {
                    debug!(banner = id.0, "banner already gone before removal");
                }
            };

            if token.run_until_cancelled(dismissal).await.is_none() {
                debug!(banner = id.0, "banner dismissal cancelled");
            }
        }));

        id
    }

    /// Cancel every scheduled dismissal, including ones not yet started.
    ///
    /// Banners shown afterwards are never dismissed automatically.
    pub fn cancel_pending(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

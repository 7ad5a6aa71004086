//! Capability seams between the routing logic and the page it runs in.

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::LocalBoxFuture;

pub type Callback = Rc<dyn Fn()>;

/// UI primitives of the embedding host, or of the in-page demo chrome that
/// stands in for it.
///
/// Every method must tolerate a missing underlying widget: a no-op for the
/// controls, a native dialog for `alert` and `confirm`. None of them may
/// panic.
#[async_trait(?Send)]
pub trait HostBridge {
    fn is_host_present(&self) -> bool;

    /// Sets the label, shows the control and binds `on_trigger` as its only
    /// click handler.
    fn show_primary_control(&self, label: &str, on_trigger: Callback);

    fn set_primary_label(&self, label: &str);

    fn hide_primary_control(&self);

    fn show_back_control(&self, on_trigger: Callback);

    fn hide_back_control(&self);

    fn set_progress(&self, active: bool);

    fn alert(&self, message: &str);

    async fn confirm(&self, message: &str) -> bool;

    fn close(&self);
}

/// Browser navigation primitives.
pub trait Navigator {
    /// Full href of the current location.
    fn location(&self) -> String;

    fn navigate(&self, href: &str);

    fn history_back(&self);

    fn navigate_after(&self, href: &str, delay: Duration);
}

/// Runs a future on the page's single execution context.
pub trait TaskSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

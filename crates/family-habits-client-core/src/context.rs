use std::rc::Rc;

use crate::config::WebAppConfig;
use crate::forms::FormCollector;
use crate::host::{HostBridge, Navigator, TaskSpawner};
use crate::page::{PageContext, current_page};
use crate::session::{Session, UrlParams};
use crate::submission::SubmissionClient;
use crate::theme::{StyleScope, ThemeApplier};

/// Everything the page needs, built once at startup and shared by reference.
pub struct AppContext {
    pub session: Session,
    pub config: WebAppConfig,
    pub host: Rc<dyn HostBridge>,
    pub forms: Rc<dyn FormCollector>,
    pub submissions: SubmissionClient,
    pub navigator: Rc<dyn Navigator>,
    pub spawner: Rc<dyn TaskSpawner>,
    pub theme: ThemeApplier,
}

impl AppContext {
    #[must_use]
    pub fn current_page(&self) -> PageContext {
        current_page(&self.navigator.location())
    }

    #[must_use]
    pub fn url_params(&self) -> UrlParams {
        let location = self.navigator.location();
        let query = location
            .split_once('?')
            .map(|(_, query)| query.split('#').next().unwrap_or_default())
            .unwrap_or_default();
        UrlParams::from_query(query)
    }

    pub fn apply_theme(&self, scope: &dyn StyleScope) {
        self.theme
            .apply(scope, self.session.color_scheme, &self.session.theme);
    }
}

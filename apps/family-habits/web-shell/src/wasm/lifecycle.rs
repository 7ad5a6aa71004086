use super::*;

    pub(super) fn set_boot_phase(phase: &str, detail: &str) {
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.phase = phase.to_string();
            state.detail = detail.to_string();
            if phase != "error" {
                state.last_error = None;
            }
        });
        tracing::debug!(phase, detail, "boot phase");
    }

    pub(super) fn set_boot_error(message: &str) {
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.phase = "error".to_string();
            state.detail = "startup failed".to_string();
            state.last_error = Some(message.to_string());
        });
        tracing::error!(error = message, "web app startup failed");
    }

    /// Reads a configuration global off `window`. Numbers and booleans are
    /// rendered to their string form so the core can parse them uniformly.
    pub(super) fn read_page_global(key: &str) -> Option<String> {
        let window = web_sys::window()?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(key)).ok()?;
        if let Some(text) = value.as_string() {
            return Some(text);
        }
        if let Some(number) = value.as_f64() {
            return Some(number.to_string());
        }
        value.as_bool().map(|flag| flag.to_string())
    }

    pub(super) fn native_alert(message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }

    pub(super) fn native_confirm(message: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }

    pub(super) struct BrowserNavigator;

    impl Navigator for BrowserNavigator {
        fn location(&self) -> String {
            web_sys::window()
                .and_then(|window| window.location().href().ok())
                .unwrap_or_default()
        }

        fn navigate(&self, href: &str) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Err(error) = window.location().set_href(href) {
                tracing::warn!(href, ?error, "navigation failed");
            }
        }

        fn history_back(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            match window.history() {
                Ok(history) => {
                    let _ = history.back();
                }
                Err(error) => tracing::warn!(?error, "history unavailable"),
            }
        }

        fn navigate_after(&self, href: &str, delay: Duration) {
            let href = href.to_string();
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            gloo_timers::callback::Timeout::new(millis, move || BrowserNavigator.navigate(&href))
                .forget();
        }
    }

    pub(super) struct LocalSpawner;

    impl TaskSpawner for LocalSpawner {
        fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
            spawn_local(task);
        }
    }

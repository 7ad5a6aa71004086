#[cfg(target_arch = "wasm32")]
mod wasm_constants;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use async_trait::async_trait;
    use family_habits_client_core::{
        ActionRouter, AppContext, Callback, ColorScheme, FormCollector, HostBridge,
        HostThemeParams, HostUser, HttpResponse, HttpTransport, Navigator, RawChildCard,
        RouterSnapshot, Session, StyleScope, SubmissionClient, TaskSpawner, ThemeApplier,
        TransportError, WebAppConfig,
    };
    use futures::future::LocalBoxFuture;
    use gloo_net::http::Request;
    use serde::Serialize;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::{HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement};

    use crate::wasm_constants::*;

    mod demo;
    mod dom;
    mod host;
    mod lifecycle;
    mod logging;
    mod network;

    use demo::DemoChrome;
    use dom::{DomFormCollector, DomStyleScope};
    use host::TelegramHostBridge;
    use lifecycle::*;
    use network::GlooTransport;

    thread_local! {
        static APP: RefCell<Option<WebApp>> = const { RefCell::new(None) };
        static DIAGNOSTICS: RefCell<BootDiagnostics> = RefCell::new(BootDiagnostics::default());
    }

    struct WebApp {
        ctx: Rc<AppContext>,
        router: Rc<ActionRouter>,
    }

    #[derive(Debug, Clone, Serialize)]
    struct BootDiagnostics {
        phase: String,
        detail: String,
        host_mode: Option<String>,
        api_base_url: Option<String>,
        router: Option<RouterSnapshot>,
        last_error: Option<String>,
    }

    impl Default for BootDiagnostics {
        fn default() -> Self {
            Self {
                phase: "idle".to_string(),
                detail: "web app not started".to_string(),
                host_mode: None,
                api_base_url: None,
                router: None,
                last_error: None,
            }
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        logging::install_console_tracing();
        set_boot_phase("booting", "initializing Family Habits web app");
        if let Err(error) = boot() {
            set_boot_error(&error);
        }
    }

    fn boot() -> Result<(), String> {
        let config = WebAppConfig::resolve(read_page_global);
        let (session, host) = select_host_bridge(&config)?;
        let host_mode = if session.host_present {
            HOST_MODE_TELEGRAM
        } else {
            HOST_MODE_DEMO
        };
        tracing::info!(
            host_mode,
            user = %session.display_name,
            platform = %session.platform,
            "session resolved"
        );

        let navigator: Rc<dyn Navigator> = Rc::new(BrowserNavigator);
        let ctx = Rc::new(AppContext {
            submissions: SubmissionClient::new(Rc::new(GlooTransport), &config),
            config,
            session,
            host,
            forms: Rc::new(DomFormCollector),
            navigator,
            spawner: Rc::new(LocalSpawner),
            theme: ThemeApplier::new(),
        });

        if let Some(scope) = DomStyleScope::for_document() {
            ctx.apply_theme(&scope);
        }

        let router = ActionRouter::new(Rc::clone(&ctx));
        router.install();

        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.host_mode = Some(host_mode.to_string());
            state.api_base_url = ctx.config.api_base_url.clone();
        });
        let page = router.page();
        APP.with(|cell| {
            *cell.borrow_mut() = Some(WebApp { ctx, router });
        });
        set_boot_phase("ready", &format!("controls installed for {page}"));
        Ok(())
    }

    /// Real host when the page runs inside Telegram, otherwise the in-page demo
    /// chrome with a synthetic session.
    fn select_host_bridge(config: &WebAppConfig) -> Result<(Session, Rc<dyn HostBridge>), String> {
        if config.demo_mode_forced {
            tracing::info!("demo mode forced by page configuration");
        } else if let Some(bridge) = TelegramHostBridge::detect() {
            let session = bridge.session();
            return Ok((session, Rc::new(bridge)));
        }
        let chrome = DemoChrome::mount()?;
        Ok((Session::demo(), Rc::new(chrome)))
    }

    fn with_app<T>(f: impl FnOnce(&WebApp) -> T) -> Option<T> {
        APP.with(|cell| cell.borrow().as_ref().map(f))
    }

    #[wasm_bindgen]
    pub fn boot_diagnostics_json() -> String {
        let router = with_app(|app| app.router.snapshot());
        DIAGNOSTICS.with(|state| {
            let mut state = state.borrow_mut();
            state.router = router;
            serde_json::to_string(&*state).unwrap_or_else(|_| {
                "{\"phase\":\"error\",\"detail\":\"diagnostics serialization failed\"}".to_string()
            })
        })
    }

    #[wasm_bindgen]
    pub fn current_page() -> String {
        with_app(|app| app.router.page().to_string()).unwrap_or_else(|| {
            let href = BrowserNavigator.location();
            family_habits_client_core::current_page(&href).to_string()
        })
    }

    #[wasm_bindgen]
    pub fn url_params_json() -> String {
        let params = with_app(|app| app.ctx.url_params()).unwrap_or_default();
        serde_json::to_string(&params).unwrap_or_else(|_| "{}".to_string())
    }

    #[wasm_bindgen]
    pub fn session_json() -> String {
        with_app(|app| serde_json::to_string(&app.ctx.session).ok())
            .flatten()
            .unwrap_or_else(|| "null".to_string())
    }

    #[wasm_bindgen]
    pub fn trigger_primary_action() {
        let Some(router) = with_app(|app| Rc::clone(&app.router)) else {
            return;
        };
        spawn_local(async move {
            let outcome = router.trigger().await;
            tracing::debug!(?outcome, "primary action triggered from page script");
        });
    }

    #[wasm_bindgen]
    pub fn go_back() {
        if let Some(router) = with_app(|app| Rc::clone(&app.router)) {
            router.go_back();
        }
    }

    #[wasm_bindgen]
    pub fn close_webapp() {
        if let Some(host) = with_app(|app| Rc::clone(&app.ctx.host)) {
            host.close();
        }
    }

    #[wasm_bindgen]
    pub fn show_alert(message: String) {
        match with_app(|app| Rc::clone(&app.ctx.host)) {
            Some(host) => host.alert(&message),
            None => native_alert(&message),
        }
    }

    /// Resolves to the user's answer; `false` when the app has not booted.
    #[wasm_bindgen]
    pub fn show_confirm(message: String) -> js_sys::Promise {
        let host = with_app(|app| Rc::clone(&app.ctx.host));
        wasm_bindgen_futures::future_to_promise(async move {
            let confirmed = match host {
                Some(host) => host.confirm(&message).await,
                None => false,
            };
            Ok(JsValue::from_bool(confirmed))
        })
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::boot_diagnostics_json;

#[cfg(not(target_arch = "wasm32"))]
pub fn boot_diagnostics_json() -> String {
    "{\"phase\":\"native\",\"detail\":\"web app diagnostics only available on wasm\"}".to_string()
}

use super::*;

    #[wasm_bindgen]
    extern "C" {
        /// `window.Telegram.WebApp`.
        pub(super) type TelegramWebApp;

        #[wasm_bindgen(method, getter, js_name = initData)]
        fn init_data(this: &TelegramWebApp) -> Option<String>;

        #[wasm_bindgen(method, getter, js_name = initDataUnsafe)]
        fn init_data_unsafe(this: &TelegramWebApp) -> JsValue;

        #[wasm_bindgen(method, getter, js_name = colorScheme)]
        fn color_scheme(this: &TelegramWebApp) -> Option<String>;

        #[wasm_bindgen(method, getter)]
        fn platform(this: &TelegramWebApp) -> Option<String>;

        #[wasm_bindgen(method, getter, js_name = themeParams)]
        fn theme_params(this: &TelegramWebApp) -> JsValue;

        #[wasm_bindgen(method, getter, js_name = MainButton)]
        fn main_button(this: &TelegramWebApp) -> JsValue;

        #[wasm_bindgen(method, getter, js_name = BackButton)]
        fn back_button(this: &TelegramWebApp) -> JsValue;

        #[wasm_bindgen(method, catch)]
        fn ready(this: &TelegramWebApp) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch)]
        fn expand(this: &TelegramWebApp) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch)]
        fn close(this: &TelegramWebApp) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = showAlert)]
        fn show_alert(this: &TelegramWebApp, message: &str) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = showConfirm)]
        fn show_confirm(
            this: &TelegramWebApp,
            message: &str,
            callback: &js_sys::Function,
        ) -> Result<(), JsValue>;

        /// Shared shape of `MainButton` and `BackButton`.
        type HostButton;

        #[wasm_bindgen(method, setter, js_name = text)]
        fn set_text(this: &HostButton, text: &str);

        #[wasm_bindgen(method, catch)]
        fn show(this: &HostButton) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch)]
        fn hide(this: &HostButton) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = showProgress)]
        fn show_progress(this: &HostButton) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = hideProgress)]
        fn hide_progress(this: &HostButton) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = onClick)]
        fn on_click(this: &HostButton, callback: &js_sys::Function) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = offClick)]
        fn off_click(this: &HostButton, callback: &js_sys::Function) -> Result<(), JsValue>;
    }

    const THEME_FIELDS: [(&str, &str); 5] = [
        ("bg_color", "backgroundColor"),
        ("text_color", "textColor"),
        ("hint_color", "hintColor"),
        ("button_color", "buttonColor"),
        ("button_text_color", "buttonTextColor"),
    ];

    /// A host widget plus the click closure currently registered on it.
    struct BoundButton {
        widget: Option<HostButton>,
        handler: RefCell<Option<Closure<dyn FnMut()>>>,
    }

    impl BoundButton {
        fn new(raw: JsValue) -> Self {
            let widget = (!raw.is_undefined() && !raw.is_null()).then(|| raw.unchecked_into());
            Self {
                widget,
                handler: RefCell::new(None),
            }
        }

        fn bind(&self, on_trigger: Callback) {
            let Some(widget) = &self.widget else {
                return;
            };
            self.unbind();
            let closure = Closure::<dyn FnMut()>::wrap(Box::new(move || on_trigger()));
            if widget.on_click(closure.as_ref().unchecked_ref()).is_err() {
                tracing::warn!("host control rejected click handler");
                return;
            }
            *self.handler.borrow_mut() = Some(closure);
        }

        fn unbind(&self) {
            let Some(widget) = &self.widget else {
                return;
            };
            if let Some(previous) = self.handler.borrow_mut().take() {
                let _ = widget.off_click(previous.as_ref().unchecked_ref());
            }
        }

        fn set_visible(&self, visible: bool) {
            if let Some(widget) = &self.widget {
                let result = if visible { widget.show() } else { widget.hide() };
                if result.is_err() {
                    tracing::warn!(visible, "host control visibility call failed");
                }
            }
        }
    }

    /// Adapter over the Telegram Mini App runtime object.
    pub(super) struct TelegramHostBridge {
        web_app: TelegramWebApp,
        main_button: BoundButton,
        back_button: BoundButton,
    }

    impl TelegramHostBridge {
        /// `None` when the page is not running inside Telegram. Signals
        /// readiness and expands the viewport on success.
        pub(super) fn detect() -> Option<Self> {
            let window = web_sys::window()?;
            let telegram =
                present(js_sys::Reflect::get(&window, &JsValue::from_str(TELEGRAM_GLOBAL)).ok()?)?;
            let web_app = present(
                js_sys::Reflect::get(&telegram, &JsValue::from_str(TELEGRAM_WEB_APP_KEY)).ok()?,
            )?;
            let web_app: TelegramWebApp = web_app.unchecked_into();

            if web_app.ready().is_err() {
                tracing::warn!("host ready() call failed");
            }
            if web_app.expand().is_err() {
                tracing::warn!("host expand() call failed");
            }

            Some(Self {
                main_button: BoundButton::new(web_app.main_button()),
                back_button: BoundButton::new(web_app.back_button()),
                web_app,
            })
        }

        pub(super) fn session(&self) -> Session {
            let raw_user = self.read_raw_user();
            let user = raw_user.clone().and_then(|raw| {
                match serde_json::from_value::<HostUser>(raw) {
                    Ok(user) => Some(user),
                    Err(error) => {
                        tracing::warn!(%error, "host user kept raw, typed decode failed");
                        None
                    }
                }
            });
            let color_scheme = ColorScheme::from_host(self.web_app.color_scheme().as_deref());
            let platform = self
                .web_app
                .platform()
                .unwrap_or_else(|| "unknown".to_string());
            let session = Session::from_host(
                user,
                color_scheme,
                self.web_app.init_data().unwrap_or_default(),
                platform,
                self.read_theme(),
            )
            .with_raw_user(raw_user.unwrap_or(serde_json::Value::Null));
            tracing::info!(
                user = ?session.user,
                scheme = session.color_scheme.as_str(),
                platform = %session.platform,
                "host web app initialized"
            );
            session
        }

        /// `initDataUnsafe.user` as plain JSON, untouched.
        fn read_raw_user(&self) -> Option<serde_json::Value> {
            let unsafe_data = present(self.web_app.init_data_unsafe())?;
            let user =
                present(js_sys::Reflect::get(&unsafe_data, &JsValue::from_str("user")).ok()?)?;
            let encoded = js_sys::JSON::stringify(&user).ok()?.as_string()?;
            serde_json::from_str(&encoded)
                .map_err(|error| tracing::warn!(%error, "host user object is not valid JSON"))
                .ok()
        }

        /// `themeParams` first, then the flat colour fields older clients
        /// expose on the web app object itself.
        fn read_theme(&self) -> HostThemeParams {
            let params = present(self.web_app.theme_params());
            let read = |snake: &str, camel: &str| {
                params
                    .as_ref()
                    .and_then(|params| string_field(params, snake))
                    .or_else(|| string_field(&self.web_app, camel))
            };
            let [bg, text, hint, button, button_text] =
                THEME_FIELDS.map(|(snake, camel)| read(snake, camel));
            HostThemeParams {
                bg_color: bg,
                text_color: text,
                hint_color: hint,
                button_color: button,
                button_text_color: button_text,
            }
        }

        fn main_widget(&self) -> Option<&HostButton> {
            self.main_button.widget.as_ref()
        }
    }

    fn present(value: JsValue) -> Option<JsValue> {
        (!value.is_undefined() && !value.is_null()).then_some(value)
    }

    fn string_field(target: &JsValue, key: &str) -> Option<String> {
        js_sys::Reflect::get(target, &JsValue::from_str(key))
            .ok()?
            .as_string()
            .filter(|value| !value.trim().is_empty())
    }

    #[async_trait(?Send)]
    impl HostBridge for TelegramHostBridge {
        fn is_host_present(&self) -> bool {
            true
        }

        fn show_primary_control(&self, label: &str, on_trigger: Callback) {
            if let Some(widget) = self.main_widget() {
                widget.set_text(label);
            }
            self.main_button.set_visible(true);
            self.main_button.bind(on_trigger);
        }

        fn set_primary_label(&self, label: &str) {
            if let Some(widget) = self.main_widget() {
                widget.set_text(label);
            }
        }

        fn hide_primary_control(&self) {
            self.main_button.unbind();
            self.main_button.set_visible(false);
        }

        fn show_back_control(&self, on_trigger: Callback) {
            self.back_button.set_visible(true);
            self.back_button.bind(on_trigger);
        }

        fn hide_back_control(&self) {
            self.back_button.unbind();
            self.back_button.set_visible(false);
        }

        fn set_progress(&self, active: bool) {
            let Some(widget) = self.main_widget() else {
                return;
            };
            let result = if active {
                widget.show_progress()
            } else {
                widget.hide_progress()
            };
            if result.is_err() {
                tracing::warn!(active, "host progress call failed");
            }
        }

        fn alert(&self, message: &str) {
            if self.web_app.show_alert(message).is_err() {
                native_alert(message);
            }
        }

        async fn confirm(&self, message: &str) -> bool {
            let (sender, receiver) = futures::channel::oneshot::channel::<bool>();
            let callback = Closure::once(move |confirmed: JsValue| {
                let _ = sender.send(confirmed.as_bool().unwrap_or(false));
            });
            if self
                .web_app
                .show_confirm(message, callback.as_ref().unchecked_ref())
                .is_err()
            {
                return native_confirm(message);
            }
            let confirmed = receiver.await.unwrap_or(false);
            drop(callback);
            confirmed
        }

        fn close(&self) {
            if self.web_app.close().is_err() {
                if let Some(window) = web_sys::window() {
                    let _ = window.close();
                }
            }
        }
    }

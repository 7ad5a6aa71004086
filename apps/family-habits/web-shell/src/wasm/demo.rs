use super::*;

    const PANEL_STYLE: &str = "position: fixed; bottom: 0; left: 0; right: 0; \
        background: #2ea6ff; color: white; padding: 10px; display: flex; gap: 10px; \
        justify-content: center; z-index: 10000;";
    const BACK_BUTTON_STYLE: &str = "padding: 8px 16px; border: none; border-radius: 4px; \
        background: rgba(255,255,255,0.2); color: white; cursor: pointer;";

    /// Fixed bottom bar that stands in for the host controls outside Telegram.
    ///
    /// The DOM click handlers are bound once at mount and forward to whichever
    /// callback is currently installed, so rebinding never stacks handlers.
    pub(super) struct DemoChrome {
        main_button: HtmlButtonElement,
        back_button: HtmlButtonElement,
        primary: Rc<RefCell<Option<Callback>>>,
        back: Rc<RefCell<Option<Callback>>>,
        _main_click: Closure<dyn FnMut(web_sys::Event)>,
        _back_click: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl DemoChrome {
        pub(super) fn mount() -> Result<Self, String> {
            let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
            let document = window
                .document()
                .ok_or_else(|| "document is unavailable".to_string())?;
            let body = document
                .body()
                .ok_or_else(|| "document body is unavailable".to_string())?;

            if let Some(stale) = document.get_element_by_id(DEMO_PANEL_ID) {
                stale.remove();
            }

            let panel = document
                .create_element("div")
                .map_err(|_| "failed to create demo panel".to_string())?;
            panel.set_id(DEMO_PANEL_ID);
            panel
                .set_attribute("style", PANEL_STYLE)
                .map_err(|_| "failed to style demo panel".to_string())?;

            let back_button = create_button(&document, DEMO_BACK_BUTTON_ID, DEMO_BACK_LABEL)?;
            back_button
                .set_attribute("style", BACK_BUTTON_STYLE)
                .map_err(|_| "failed to style demo back button".to_string())?;
            let main_button = create_button(&document, DEMO_MAIN_BUTTON_ID, DEMO_MAIN_LABEL)?;
            main_button
                .set_attribute("style", &main_button_style())
                .map_err(|_| "failed to style demo main button".to_string())?;

            panel
                .append_child(&back_button)
                .map_err(|_| "failed to append demo back button".to_string())?;
            panel
                .append_child(&main_button)
                .map_err(|_| "failed to append demo main button".to_string())?;
            body.append_child(&panel)
                .map_err(|_| "failed to append demo panel".to_string())?;

            let primary: Rc<RefCell<Option<Callback>>> = Rc::new(RefCell::new(None));
            let back: Rc<RefCell<Option<Callback>>> = Rc::new(RefCell::new(None));
            let main_click = forwarding_click(&main_button, Rc::clone(&primary));
            let back_click = forwarding_click(&back_button, Rc::clone(&back));

            tracing::info!("demo chrome mounted");
            Ok(Self {
                main_button,
                back_button,
                primary,
                back,
                _main_click: main_click,
                _back_click: back_click,
            })
        }
    }

    fn create_button(
        document: &web_sys::Document,
        id: &str,
        label: &str,
    ) -> Result<HtmlButtonElement, String> {
        let button = document
            .create_element("button")
            .map_err(|_| format!("failed to create {id}"))?
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| format!("{id} is not HtmlButtonElement"))?;
        button.set_id(id);
        button.set_type("button");
        button.set_inner_text(label);
        Ok(button)
    }

    fn main_button_style() -> String {
        format!(
            "padding: 8px 16px; border: none; border-radius: 4px; background: white; \
             color: {DEMO_ACCENT_COLOR}; cursor: pointer;"
        )
    }

    fn forwarding_click(
        button: &HtmlButtonElement,
        slot: Rc<RefCell<Option<Callback>>>,
    ) -> Closure<dyn FnMut(web_sys::Event)> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |event| {
            event.prevent_default();
            let callback = slot.borrow().clone();
            if let Some(callback) = callback {
                callback();
            }
        }));
        button.set_onclick(Some(closure.as_ref().unchecked_ref()));
        closure
    }

    fn set_display(element: &HtmlElement, visible: bool) {
        let value = if visible { "" } else { "none" };
        let _ = element.style().set_property("display", value);
    }

    #[async_trait(?Send)]
    impl HostBridge for DemoChrome {
        fn is_host_present(&self) -> bool {
            false
        }

        fn show_primary_control(&self, label: &str, on_trigger: Callback) {
            *self.primary.borrow_mut() = Some(on_trigger);
            self.main_button.set_inner_text(label);
            set_display(&self.main_button, true);
        }

        fn set_primary_label(&self, label: &str) {
            self.main_button.set_inner_text(label);
        }

        fn hide_primary_control(&self) {
            *self.primary.borrow_mut() = None;
            set_display(&self.main_button, false);
        }

        fn show_back_control(&self, on_trigger: Callback) {
            *self.back.borrow_mut() = Some(on_trigger);
            set_display(&self.back_button, true);
        }

        fn hide_back_control(&self) {
            *self.back.borrow_mut() = None;
            set_display(&self.back_button, false);
        }

        fn set_progress(&self, active: bool) {
            self.main_button.set_disabled(active);
            let opacity = if active { "0.6" } else { "1" };
            let _ = self.main_button.style().set_property("opacity", opacity);
        }

        fn alert(&self, message: &str) {
            native_alert(message);
        }

        async fn confirm(&self, message: &str) -> bool {
            native_confirm(message)
        }

        fn close(&self) {
            if let Some(window) = web_sys::window() {
                let _ = window.close();
            }
        }
    }

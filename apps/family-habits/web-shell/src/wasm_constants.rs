pub(crate) const HOST_MODE_TELEGRAM: &str = "telegram";
pub(crate) const HOST_MODE_DEMO: &str = "demo";
pub(crate) const TELEGRAM_GLOBAL: &str = "Telegram";
pub(crate) const TELEGRAM_WEB_APP_KEY: &str = "WebApp";
pub(crate) const DEMO_PANEL_ID: &str = "demo-panel";
pub(crate) const DEMO_BACK_BUTTON_ID: &str = "demo-back-btn";
pub(crate) const DEMO_MAIN_BUTTON_ID: &str = "demo-main-btn";
pub(crate) const DEMO_BACK_LABEL: &str = "← Back";
pub(crate) const DEMO_MAIN_LABEL: &str = "Main Button";
pub(crate) const DEMO_ACCENT_COLOR: &str = "#2ea6ff";

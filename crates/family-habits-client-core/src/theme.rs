use std::cell::Cell;

use serde::Serialize;

use crate::session::{ColorScheme, HostThemeParams};

pub const BG_COLOR_VAR: &str = "--tg-bg-color";
pub const TEXT_COLOR_VAR: &str = "--tg-text-color";
pub const HINT_COLOR_VAR: &str = "--tg-hint-color";
pub const BUTTON_COLOR_VAR: &str = "--tg-button-color";
pub const BUTTON_TEXT_COLOR_VAR: &str = "--tg-button-text-color";

/// Named colour tokens written to the page's style scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    pub bg: String,
    pub text: String,
    pub hint: String,
    pub button_bg: String,
    pub button_text: String,
}

impl ThemePalette {
    #[must_use]
    pub fn default_for(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self {
                bg: "#ffffff".to_string(),
                text: "#000000".to_string(),
                hint: "#707579".to_string(),
                button_bg: "#2ea6ff".to_string(),
                button_text: "#ffffff".to_string(),
            },
            ColorScheme::Dark => Self {
                bg: "#212121".to_string(),
                text: "#ffffff".to_string(),
                hint: "#aaaaaa".to_string(),
                button_bg: "#2ea6ff".to_string(),
                button_text: "#ffffff".to_string(),
            },
        }
    }

    /// Host values win over the default palette; blank host values are ignored.
    #[must_use]
    pub fn resolve(scheme: ColorScheme, host: &HostThemeParams) -> Self {
        let defaults = Self::default_for(scheme);
        Self {
            bg: pick(host.bg_color.as_deref(), defaults.bg),
            text: pick(host.text_color.as_deref(), defaults.text),
            hint: pick(host.hint_color.as_deref(), defaults.hint),
            button_bg: pick(host.button_color.as_deref(), defaults.button_bg),
            button_text: pick(host.button_text_color.as_deref(), defaults.button_text),
        }
    }

    #[must_use]
    pub fn variables(&self) -> [(&'static str, &str); 5] {
        [
            (BG_COLOR_VAR, self.bg.as_str()),
            (TEXT_COLOR_VAR, self.text.as_str()),
            (HINT_COLOR_VAR, self.hint.as_str()),
            (BUTTON_COLOR_VAR, self.button_bg.as_str()),
            (BUTTON_TEXT_COLOR_VAR, self.button_text.as_str()),
        ]
    }
}

fn pick(host: Option<&str>, fallback: String) -> String {
    host.map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or(fallback, ToString::to_string)
}

#[must_use]
pub fn scheme_class(scheme: ColorScheme) -> &'static str {
    match scheme {
        ColorScheme::Light => "tg-theme-light",
        ColorScheme::Dark => "tg-theme-dark",
    }
}

/// Where theme tokens land: CSS custom properties and classes on the
/// document root.
pub trait StyleScope {
    fn set_variable(&self, name: &str, value: &str);
    fn add_root_class(&self, class: &str);
    fn remove_root_class(&self, class: &str);
}

/// Applies a colour scheme to a [`StyleScope`].
///
/// Remembers the last scheme it applied: a repeat call with the same scheme
/// and host colours is a no-op, and switching schemes removes the previous
/// scheme class so the root never carries more than one.
#[derive(Debug, Default)]
pub struct ThemeApplier {
    last_applied: Cell<Option<ColorScheme>>,
}

impl ThemeApplier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, scope: &dyn StyleScope, scheme: ColorScheme, host: &HostThemeParams) {
        let palette = ThemePalette::resolve(scheme, host);
        for (name, value) in palette.variables() {
            scope.set_variable(name, value);
        }

        if self.last_applied.get() == Some(scheme) {
            return;
        }
        for other in [ColorScheme::Light, ColorScheme::Dark] {
            if other != scheme {
                scope.remove_root_class(scheme_class(other));
            }
        }
        scope.add_root_class(scheme_class(scheme));
        self.last_applied.set(Some(scheme));
        tracing::debug!(scheme = scheme.as_str(), "applied color scheme");
    }

    #[must_use]
    pub fn last_applied(&self) -> Option<ColorScheme> {
        self.last_applied.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    /// Records writes without de-duplicating classes, like a naive
    /// `className += ...` would.
    #[derive(Default)]
    struct RecordingScope {
        variables: RefCell<BTreeMap<String, String>>,
        classes: RefCell<Vec<String>>,
    }

    impl StyleScope for RecordingScope {
        fn set_variable(&self, name: &str, value: &str) {
            self.variables
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }

        fn add_root_class(&self, class: &str) {
            self.classes.borrow_mut().push(class.to_string());
        }

        fn remove_root_class(&self, class: &str) {
            self.classes.borrow_mut().retain(|existing| existing != class);
        }
    }

    #[test]
    fn applying_dark_twice_keeps_a_single_class() {
        let scope = RecordingScope::default();
        let applier = ThemeApplier::new();
        let host = HostThemeParams::default();

        applier.apply(&scope, ColorScheme::Dark, &host);
        let first_tokens = scope.variables.borrow().clone();
        applier.apply(&scope, ColorScheme::Dark, &host);

        assert_eq!(*scope.variables.borrow(), first_tokens);
        assert_eq!(*scope.classes.borrow(), vec!["tg-theme-dark".to_string()]);
        assert_eq!(first_tokens.get(BG_COLOR_VAR).map(String::as_str), Some("#212121"));
    }

    #[test]
    fn switching_schemes_replaces_the_class() {
        let scope = RecordingScope::default();
        let applier = ThemeApplier::new();
        let host = HostThemeParams::default();

        applier.apply(&scope, ColorScheme::Light, &host);
        applier.apply(&scope, ColorScheme::Dark, &host);

        assert_eq!(*scope.classes.borrow(), vec!["tg-theme-dark".to_string()]);
        assert_eq!(applier.last_applied(), Some(ColorScheme::Dark));
    }

    #[test]
    fn host_colours_override_defaults() {
        let host = HostThemeParams {
            bg_color: Some("#17212b".to_string()),
            text_color: Some("  ".to_string()),
            hint_color: None,
            button_color: Some("#5288c1".to_string()),
            button_text_color: None,
        };
        let palette = ThemePalette::resolve(ColorScheme::Dark, &host);
        assert_eq!(palette.bg, "#17212b");
        assert_eq!(palette.text, "#ffffff");
        assert_eq!(palette.hint, "#aaaaaa");
        assert_eq!(palette.button_bg, "#5288c1");
    }

    #[test]
    fn light_palette_uses_light_defaults() {
        let palette = ThemePalette::default_for(ColorScheme::Light);
        assert_eq!(palette.bg, "#ffffff");
        assert_eq!(palette.text, "#000000");
        assert_eq!(palette.hint, "#707579");
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

pub const DEMO_USER_ID: i64 = 123_456_789;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Host schemes other than `dark` are treated as light.
    #[must_use]
    pub fn from_host(raw: Option<&str>) -> Self {
        match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// User object the host exposes through its unsafe init data. Fields not
/// named here (`is_premium`, `photo_url`, ...) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostUser {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl HostUser {
    #[must_use]
    pub fn demo() -> Self {
        Self {
            id: DEMO_USER_ID,
            first_name: "Demo".to_string(),
            last_name: Some("User".to_string()),
            username: Some("demo_user".to_string()),
            language_code: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        let full_name = match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {last}", self.first_name.trim()),
            _ => self.first_name.trim().to_string(),
        };
        let full_name = full_name.trim().to_string();
        if !full_name.is_empty() {
            return full_name;
        }
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|username| !username.is_empty())
            .map_or_else(|| "Guest".to_string(), ToString::to_string)
    }
}

/// Colours the host supplies for its current theme. Missing values fall back
/// to the built-in palette.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostThemeParams {
    pub bg_color: Option<String>,
    pub text_color: Option<String>,
    pub hint_color: Option<String>,
    pub button_color: Option<String>,
    pub button_text_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub host_present: bool,
    pub user: Option<HostUser>,
    pub display_name: String,
    pub color_scheme: ColorScheme,
    pub raw_init_data: String,
    pub platform: String,
    pub theme: HostThemeParams,
    /// The host's user object exactly as received, forwarded as-is.
    #[serde(skip)]
    pub raw_user: Option<Value>,
}

impl Session {
    #[must_use]
    pub fn from_host(
        user: Option<HostUser>,
        color_scheme: ColorScheme,
        raw_init_data: String,
        platform: String,
        theme: HostThemeParams,
    ) -> Self {
        let display_name = user
            .as_ref()
            .map_or_else(|| "Guest".to_string(), HostUser::display_name);
        Self {
            host_present: true,
            user,
            display_name,
            color_scheme,
            raw_init_data,
            platform,
            theme,
            raw_user: None,
        }
    }

    /// Attaches the host's undecoded user object. It takes precedence over
    /// `user` in payloads, and still identifies the user when decoding failed.
    #[must_use]
    pub fn with_raw_user(mut self, raw_user: Value) -> Self {
        self.raw_user = Some(raw_user).filter(|value| !value.is_null());
        self
    }

    /// Fixed identity used when the page runs outside the host.
    #[must_use]
    pub fn demo() -> Self {
        let user = HostUser::demo();
        Self {
            host_present: false,
            display_name: user.display_name(),
            user: Some(user),
            color_scheme: ColorScheme::Light,
            raw_init_data: String::new(),
            platform: "demo".to_string(),
            theme: HostThemeParams::default(),
            raw_user: None,
        }
    }

    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|user| user.id)
    }

    /// Value injected into payloads as `telegram_user`; `null` when the host
    /// did not expose a user.
    #[must_use]
    pub fn user_json(&self) -> Value {
        if let Some(raw_user) = &self.raw_user {
            return raw_user.clone();
        }
        self.user
            .as_ref()
            .and_then(|user| serde_json::to_value(user).ok())
            .unwrap_or(Value::Null)
    }
}

/// Informational query parameters. Nothing here is authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlParams {
    pub user_id: Option<String>,
    pub family_id: Option<String>,
    pub first_name: Option<String>,
    pub stars: Option<String>,
    pub tab: Option<String>,
}

impl UrlParams {
    /// Parses a query string with or without its leading `?`. The first
    /// occurrence of a key wins.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "user_id" => &mut params.user_id,
                "family_id" => &mut params.family_id,
                "first_name" => &mut params.first_name,
                "stars" => &mut params.stars,
                "tab" => &mut params.tab,
                _ => continue,
            };
            if slot.is_none() && !value.trim().is_empty() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    #[must_use]
    pub fn stars_count(&self) -> Option<u32> {
        self.stars.as_deref()?.trim().parse().ok()
    }
}

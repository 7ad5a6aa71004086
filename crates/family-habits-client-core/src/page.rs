use serde::{Deserialize, Serialize};
use url::Url;

pub const INDEX_PAGE: &str = "index.html";
pub const REGISTRATION_PAGE: &str = "registration.html";
pub const REGISTRATION_CHILDREN_PAGE: &str = "registration-children.html";
pub const WELCOME_PAGE: &str = "welcome.html";

/// Page the web app is currently showing, derived from the location path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageContext {
    Index,
    Registration,
    RegistrationChildren,
    CreateTask,
    Shop,
    Profile,
    Statistics,
    Welcome,
}

// Most specific marker first: `registration-children` also contains `registration`.
const PAGE_MARKERS: [(&str, PageContext); 7] = [
    ("registration-children", PageContext::RegistrationChildren),
    ("registration", PageContext::Registration),
    ("create-task", PageContext::CreateTask),
    ("shop", PageContext::Shop),
    ("profile", PageContext::Profile),
    ("statistics", PageContext::Statistics),
    ("welcome", PageContext::Welcome),
];

impl PageContext {
    pub const ALL: [PageContext; 8] = [
        PageContext::Index,
        PageContext::Registration,
        PageContext::RegistrationChildren,
        PageContext::CreateTask,
        PageContext::Shop,
        PageContext::Profile,
        PageContext::Statistics,
        PageContext::Welcome,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Registration => "registration",
            Self::RegistrationChildren => "registration-children",
            Self::CreateTask => "create-task",
            Self::Shop => "shop",
            Self::Profile => "profile",
            Self::Statistics => "statistics",
            Self::Welcome => "welcome",
        }
    }
}

impl std::fmt::Display for PageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a location path. Unrecognised paths fall through to `Index`.
#[must_use]
pub fn classify(path: &str) -> PageContext {
    PAGE_MARKERS
        .iter()
        .find(|(marker, _)| path.contains(marker))
        .map_or(PageContext::Index, |(_, page)| *page)
}

/// Classifies a full location href using only its path component.
///
/// Relative or otherwise unparsable hrefs are cut at the first `?` or `#`
/// and classified as a bare path.
#[must_use]
pub fn current_page(href: &str) -> PageContext {
    match Url::parse(href) {
        Ok(url) => classify(url.path()),
        Err(_) => classify(path_component(href)),
    }
}

fn path_component(raw: &str) -> &str {
    let before_query = raw.split('?').next().unwrap_or_default();
    before_query.split('#').next().unwrap_or(before_query)
}

//! Platform-neutral core of the Family Habits web app.
//!
//! Classifies the current page, decides what the host's primary and back
//! controls do there, collects form data and forwards it to the API. All
//! browser and host access goes through the traits in [`host`], [`forms`],
//! [`theme`] and [`submission`], so the routing logic runs unchanged under
//! native tests.

pub mod action;
pub mod config;
pub mod context;
pub mod forms;
pub mod host;
pub mod page;
pub mod router;
pub mod session;
pub mod submission;
pub mod theme;

pub use action::{ActionSpec, BackTarget, PrimaryAction, back_target, compute_action_spec};
pub use config::{ConfigError, WebAppConfig};
pub use context::AppContext;
pub use forms::{ChildRecord, FormCollector, RawChildCard};
pub use host::{Callback, HostBridge, Navigator, TaskSpawner};
pub use page::{PageContext, classify, current_page};
pub use router::{ActionRouter, RouterSnapshot, TransitionState, TriggerOutcome};
pub use session::{ColorScheme, HostThemeParams, HostUser, Session, UrlParams};
pub use submission::{
    HttpResponse, HttpTransport, SubmissionClient, SubmissionRequest, TransportError,
};
pub use theme::{StyleScope, ThemeApplier, ThemePalette};

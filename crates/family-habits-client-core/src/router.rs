use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Serialize;
use serde_json::{Value, json};

use crate::action::{ActionSpec, BackTarget, PrimaryAction, back_target, compute_action_spec};
use crate::context::AppContext;
use crate::forms::{CHILD_CARD_SELECTOR, REGISTRATION_FORM_ID, TASK_FORM_ID};
use crate::host::Callback;
use crate::page::PageContext;
use crate::submission::{SubmissionRequest, TransportError};

pub const TASK_CREATED_MESSAGE: &str = "✅ Задача успешно создана!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum TransitionState {
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
    /// No primary action on this page, or a submission is already running.
    Ignored,
    /// The form the action reads from is missing from the document.
    Aborted,
    Succeeded { response: Value, destination: String },
    Failed(TransportError),
}

#[derive(Debug, Clone, Serialize)]
pub struct RouterSnapshot {
    pub page: PageContext,
    pub spec: ActionSpec,
    pub state: TransitionState,
    pub host_present: bool,
    pub last_error: Option<String>,
}

/// Drives the primary and back controls for one page load.
///
/// The router owns the page's [`TransitionState`]. At most one submission is
/// in flight: a trigger that arrives while one is running, or after one has
/// succeeded, is ignored.
pub struct ActionRouter {
    ctx: Rc<AppContext>,
    page: PageContext,
    spec: ActionSpec,
    state: RefCell<TransitionState>,
    last_error: RefCell<Option<String>>,
    last_request: RefCell<Option<SubmissionRequest>>,
}

impl ActionRouter {
    /// Router for the page at the navigator's current location.
    pub fn new(ctx: Rc<AppContext>) -> Rc<Self> {
        let page = ctx.current_page();
        Self::for_page(ctx, page)
    }

    pub fn for_page(ctx: Rc<AppContext>, page: PageContext) -> Rc<Self> {
        let spec = compute_action_spec(page);
        tracing::debug!(
            %page,
            primary = ?spec.on_trigger,
            back = spec.back_visible,
            "computed action spec"
        );
        Rc::new(Self {
            ctx,
            page,
            spec,
            state: RefCell::new(TransitionState::Idle),
            last_error: RefCell::new(None),
            last_request: RefCell::new(None),
        })
    }

    #[must_use]
    pub fn page(&self) -> PageContext {
        self.page
    }

    #[must_use]
    pub fn spec(&self) -> &ActionSpec {
        &self.spec
    }

    #[must_use]
    pub fn state(&self) -> TransitionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn last_request(&self) -> Option<SubmissionRequest> {
        self.last_request.borrow().clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> RouterSnapshot {
        RouterSnapshot {
            page: self.page,
            spec: self.spec.clone(),
            state: self.state(),
            host_present: self.ctx.host.is_host_present(),
            last_error: self.last_error.borrow().clone(),
        }
    }

    /// Pushes the active spec to the host controls.
    pub fn install(self: &Rc<Self>) {
        let host = &self.ctx.host;
        match self.spec.on_trigger {
            Some(_) if self.spec.primary_visible => {
                host.show_primary_control(&self.spec.label, self.primary_callback());
            }
            _ => host.hide_primary_control(),
        }
        if self.spec.back_visible {
            host.show_back_control(self.back_callback());
        } else {
            host.hide_back_control();
        }
    }

    /// Click handler for the primary control. Holds the router weakly so the
    /// host widget does not keep the page alive.
    pub fn primary_callback(self: &Rc<Self>) -> Callback {
        let router = Rc::downgrade(self);
        let spawner = Rc::clone(&self.ctx.spawner);
        Rc::new(move || {
            let Some(router) = Weak::upgrade(&router) else {
                return;
            };
            spawner.spawn(Box::pin(async move {
                let _ = router.trigger().await;
            }));
        })
    }

    pub fn back_callback(self: &Rc<Self>) -> Callback {
        let router = Rc::downgrade(self);
        Rc::new(move || {
            if let Some(router) = Weak::upgrade(&router) {
                router.go_back();
            }
        })
    }

    pub fn go_back(&self) {
        match back_target(self.page) {
            BackTarget::Page(href) => self.ctx.navigator.navigate(href),
            BackTarget::History => self.ctx.navigator.history_back(),
        }
    }

    /// Runs the page's primary action: collect, submit, then navigate or
    /// report the failure.
    pub async fn trigger(&self) -> TriggerOutcome {
        let Some(action) = self.spec.on_trigger else {
            return TriggerOutcome::Ignored;
        };
        let current = self.state();
        if current != TransitionState::Idle {
            tracing::warn!(page = %self.page, state = ?current, "ignoring trigger while not idle");
            return TriggerOutcome::Ignored;
        }
        let Some(request) = self.build_request(action) else {
            tracing::debug!(
                page = %self.page,
                action = action.as_str(),
                "form missing, aborting action"
            );
            return TriggerOutcome::Aborted;
        };

        self.set_state(TransitionState::Submitting);
        *self.last_request.borrow_mut() = Some(request.clone());
        let host = Rc::clone(&self.ctx.host);
        host.set_progress(true);
        host.set_primary_label(action.progress_message());
        tracing::info!(endpoint = %request.endpoint_path, action = action.as_str(), "submitting");

        match self.ctx.submissions.post(&request).await {
            Ok(response) => {
                self.set_state(TransitionState::Succeeded);
                *self.last_error.borrow_mut() = None;
                let destination = action.success_destination().to_string();
                tracing::info!(
                    endpoint = %request.endpoint_path,
                    %destination,
                    "submission succeeded"
                );
                self.navigate_after_success(action, &destination);
                TriggerOutcome::Succeeded {
                    response,
                    destination,
                }
            }
            Err(error) => {
                let message = format!("{}{error}", action.error_prefix());
                tracing::warn!(endpoint = %request.endpoint_path, %error, "submission failed");
                self.set_state(TransitionState::Failed(error.to_string()));
                *self.last_error.borrow_mut() = Some(error.to_string());
                host.set_progress(false);
                host.set_primary_label(&self.spec.label);
                host.alert(&message);
                self.set_state(TransitionState::Idle);
                TriggerOutcome::Failed(error)
            }
        }
    }

    fn navigate_after_success(&self, action: PrimaryAction, destination: &str) {
        let navigator = &self.ctx.navigator;
        match action {
            PrimaryAction::SubmitTask => {
                self.ctx.host.alert(TASK_CREATED_MESSAGE);
                navigator.navigate_after(destination, self.ctx.config.task_redirect_delay);
            }
            PrimaryAction::SubmitRegistration | PrimaryAction::SubmitChildren => {
                navigator.navigate(destination);
            }
        }
    }

    fn build_request(&self, action: PrimaryAction) -> Option<SubmissionRequest> {
        let session = &self.ctx.session;
        let forms = &self.ctx.forms;
        let payload = match action {
            PrimaryAction::SubmitRegistration => {
                let mut fields = forms.collect_flat_form(REGISTRATION_FORM_ID)?;
                fields.insert("telegram_user".to_string(), session.user_json());
                fields.insert(
                    "telegram_init_data".to_string(),
                    Value::String(session.raw_init_data.clone()),
                );
                Value::Object(fields)
            }
            PrimaryAction::SubmitChildren => {
                let children = forms.collect_children(CHILD_CARD_SELECTOR);
                json!({
                    "children": children,
                    "telegram_user": session.user_json(),
                })
            }
            PrimaryAction::SubmitTask => {
                let mut fields = forms.collect_flat_form(TASK_FORM_ID)?;
                fields.insert("telegram_user".to_string(), session.user_json());
                Value::Object(fields)
            }
        };
        Some(SubmissionRequest {
            endpoint_path: action.endpoint().to_string(),
            payload,
        })
    }

    fn set_state(&self, next: TransitionState) {
        *self.state.borrow_mut() = next;
    }
}

#![expect(dead_code, reason = "each test binary uses a different subset of the fakes")]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use family_habits_client_core::{
    ActionRouter, AppContext, Callback, FormCollector, HostBridge, HttpResponse, HttpTransport,
    Navigator, RawChildCard, Session, SubmissionClient, TaskSpawner, ThemeApplier,
    TransportError, WebAppConfig,
};
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    ShowPrimary(String),
    SetPrimaryLabel(String),
    HidePrimary,
    ShowBack,
    HideBack,
    Progress(bool),
    Alert(String),
    Confirm(String),
    Close,
}

#[derive(Default)]
pub struct RecordingHost {
    pub present: bool,
    pub confirm_answer: bool,
    pub events: RefCell<Vec<HostEvent>>,
    pub primary: RefCell<Option<Callback>>,
    pub back: RefCell<Option<Callback>>,
    /// Runs while an alert is being shown, before `alert` returns.
    pub on_alert: RefCell<Option<Box<dyn Fn()>>>,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                HostEvent::Alert(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn click_primary(&self) {
        let callback = self.primary.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    pub fn click_back(&self) {
        let callback = self.back.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }

    fn record(&self, event: HostEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[async_trait(?Send)]
impl HostBridge for RecordingHost {
    fn is_host_present(&self) -> bool {
        self.present
    }

    fn show_primary_control(&self, label: &str, on_trigger: Callback) {
        *self.primary.borrow_mut() = Some(on_trigger);
        self.record(HostEvent::ShowPrimary(label.to_string()));
    }

    fn set_primary_label(&self, label: &str) {
        self.record(HostEvent::SetPrimaryLabel(label.to_string()));
    }

    fn hide_primary_control(&self) {
        *self.primary.borrow_mut() = None;
        self.record(HostEvent::HidePrimary);
    }

    fn show_back_control(&self, on_trigger: Callback) {
        *self.back.borrow_mut() = Some(on_trigger);
        self.record(HostEvent::ShowBack);
    }

    fn hide_back_control(&self) {
        *self.back.borrow_mut() = None;
        self.record(HostEvent::HideBack);
    }

    fn set_progress(&self, active: bool) {
        self.record(HostEvent::Progress(active));
    }

    fn alert(&self, message: &str) {
        self.record(HostEvent::Alert(message.to_string()));
        if let Some(hook) = self.on_alert.borrow().as_ref() {
            hook();
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        self.record(HostEvent::Confirm(message.to_string()));
        self.confirm_answer
    }

    fn close(&self) {
        self.record(HostEvent::Close);
    }
}

/// Replies from a queue; an empty queue answers 200 `{}`. When a gate is
/// armed the next request waits for it to be released.
#[derive(Default)]
pub struct MockTransport {
    pub responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    pub requests: RefCell<Vec<(String, Value)>>,
    gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl MockTransport {
    pub fn reply(&self, status: u16, body: &str) {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn arm_gate(&self) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        *self.gate.borrow_mut() = Some(receiver);
        sender
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        let payload = serde_json::from_str(&body)
            .map_err(|error| TransportError::Encode(error.to_string()))?;
        self.requests.borrow_mut().push((url.to_string(), payload));

        let gate = self.gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(HttpResponse {
                status: 200,
                body: "{}".to_string(),
            })
        })
    }
}

#[derive(Default)]
pub struct StaticForms {
    pub forms: HashMap<String, Vec<(String, String)>>,
    pub cards: Vec<RawChildCard>,
}

impl StaticForms {
    pub fn with_form(mut self, form_id: &str, entries: &[(&str, &str)]) -> Self {
        self.forms.insert(
            form_id.to_string(),
            entries
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
        );
        self
    }

    pub fn with_card(mut self, name: &str, age: Option<&str>, avatar: Option<&str>) -> Self {
        self.cards.push(RawChildCard {
            name: Some(name.to_string()),
            age: age.map(ToString::to_string),
            avatar: avatar.map(ToString::to_string),
        });
        self
    }
}

impl FormCollector for StaticForms {
    fn form_entries(&self, form_id: &str) -> Option<Vec<(String, String)>> {
        self.forms.get(form_id).cloned()
    }

    fn child_cards(&self, _card_selector: &str) -> Vec<RawChildCard> {
        self.cards.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Navigate(String),
    Back,
    NavigateAfter(String, Duration),
}

pub struct RecordingNavigator {
    pub location: String,
    pub events: RefCell<Vec<NavEvent>>,
}

impl RecordingNavigator {
    pub fn at(location: &str) -> Self {
        Self {
            location: location.to_string(),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<NavEvent> {
        self.events.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn location(&self) -> String {
        self.location.clone()
    }

    fn navigate(&self, href: &str) {
        self.events
            .borrow_mut()
            .push(NavEvent::Navigate(href.to_string()));
    }

    fn history_back(&self) {
        self.events.borrow_mut().push(NavEvent::Back);
    }

    fn navigate_after(&self, href: &str, delay: Duration) {
        self.events
            .borrow_mut()
            .push(NavEvent::NavigateAfter(href.to_string(), delay));
    }
}

#[derive(Default)]
pub struct QueueSpawner {
    pub tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl QueueSpawner {
    pub async fn run_all(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        for task in tasks {
            task.await;
        }
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }
}

impl TaskSpawner for QueueSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }
}

pub struct Harness {
    pub ctx: Rc<AppContext>,
    pub host: Rc<RecordingHost>,
    pub transport: Rc<MockTransport>,
    pub navigator: Rc<RecordingNavigator>,
    pub spawner: Rc<QueueSpawner>,
}

impl Harness {
    pub fn new(location: &str, forms: StaticForms) -> Self {
        Self::with_session(location, forms, Session::demo())
    }

    pub fn with_session(location: &str, forms: StaticForms, session: Session) -> Self {
        let host = Rc::new(RecordingHost {
            present: session.host_present,
            ..RecordingHost::default()
        });
        let transport = Rc::new(MockTransport::default());
        let navigator = Rc::new(RecordingNavigator::at(location));
        let spawner = Rc::new(QueueSpawner::default());
        let config = WebAppConfig::default();
        let ctx = Rc::new(AppContext {
            session,
            submissions: SubmissionClient::new(transport.clone(), &config),
            config,
            host: host.clone(),
            forms: Rc::new(forms),
            navigator: navigator.clone(),
            spawner: spawner.clone(),
            theme: ThemeApplier::new(),
        });
        Self {
            ctx,
            host,
            transport,
            navigator,
            spawner,
        }
    }

    pub fn router(&self) -> Rc<ActionRouter> {
        ActionRouter::new(Rc::clone(&self.ctx))
    }
}

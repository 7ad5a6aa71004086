use serde::Serialize;

use crate::page::{
    INDEX_PAGE, PageContext, REGISTRATION_CHILDREN_PAGE, REGISTRATION_PAGE, WELCOME_PAGE,
};

pub const REGISTRATION_LABEL: &str = "🌱 Создать семью";
pub const CHILDREN_LABEL: &str = "👶 Добавить детей";
pub const TASK_LABEL: &str = "✅ Создать задачу";

/// Handler bound to the primary action control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    SubmitRegistration,
    SubmitChildren,
    SubmitTask,
}

impl PrimaryAction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SubmitRegistration => "submit_registration",
            Self::SubmitChildren => "submit_children",
            Self::SubmitTask => "submit_task",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SubmitRegistration => REGISTRATION_LABEL,
            Self::SubmitChildren => CHILDREN_LABEL,
            Self::SubmitTask => TASK_LABEL,
        }
    }

    #[must_use]
    pub fn progress_message(self) -> &'static str {
        match self {
            Self::SubmitRegistration => "Создание семейного профиля...",
            Self::SubmitChildren => "Добавление детей в семью...",
            Self::SubmitTask => "Создание задачи...",
        }
    }

    #[must_use]
    pub fn error_prefix(self) -> &'static str {
        match self {
            Self::SubmitRegistration => "Ошибка создания семьи: ",
            Self::SubmitChildren => "Ошибка добавления детей: ",
            Self::SubmitTask => "Ошибка создания задачи: ",
        }
    }

    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::SubmitRegistration => "/api/registration",
            Self::SubmitChildren => "/api/children",
            Self::SubmitTask => "/api/tasks/create",
        }
    }

    /// Page to open once the submission succeeded.
    #[must_use]
    pub fn success_destination(self) -> &'static str {
        match self {
            Self::SubmitRegistration => REGISTRATION_CHILDREN_PAGE,
            Self::SubmitChildren => WELCOME_PAGE,
            Self::SubmitTask => INDEX_PAGE,
        }
    }
}

/// UI state of the two host controls for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSpec {
    pub label: String,
    pub on_trigger: Option<PrimaryAction>,
    pub primary_visible: bool,
    pub back_visible: bool,
}

impl ActionSpec {
    fn hidden(back_visible: bool) -> Self {
        Self {
            label: String::new(),
            on_trigger: None,
            primary_visible: false,
            back_visible,
        }
    }

    fn primary(action: PrimaryAction, back_visible: bool) -> Self {
        Self {
            label: action.label().to_string(),
            on_trigger: Some(action),
            primary_visible: true,
            back_visible,
        }
    }
}

#[must_use]
pub fn compute_action_spec(page: PageContext) -> ActionSpec {
    let back_visible = !matches!(page, PageContext::Index | PageContext::Registration);
    match page {
        PageContext::Registration => {
            ActionSpec::primary(PrimaryAction::SubmitRegistration, back_visible)
        }
        PageContext::RegistrationChildren => {
            ActionSpec::primary(PrimaryAction::SubmitChildren, back_visible)
        }
        PageContext::CreateTask => ActionSpec::primary(PrimaryAction::SubmitTask, back_visible),
        PageContext::Shop => ActionSpec::hidden(back_visible),
        PageContext::Index
        | PageContext::Profile
        | PageContext::Statistics
        | PageContext::Welcome => ActionSpec::hidden(back_visible),
    }
}

/// Where the back control leads from a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "href", rename_all = "snake_case")]
pub enum BackTarget {
    Page(&'static str),
    History,
}

#[must_use]
pub fn back_target(page: PageContext) -> BackTarget {
    match page {
        PageContext::RegistrationChildren => BackTarget::Page(REGISTRATION_PAGE),
        PageContext::Welcome
        | PageContext::Profile
        | PageContext::Shop
        | PageContext::Statistics
        | PageContext::CreateTask => BackTarget::Page(INDEX_PAGE),
        PageContext::Index | PageContext::Registration => BackTarget::History,
    }
}

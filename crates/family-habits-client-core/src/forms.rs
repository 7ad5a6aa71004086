use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const REGISTRATION_FORM_ID: &str = "registrationForm";
pub const TASK_FORM_ID: &str = "taskForm";
pub const CHILD_CARD_SELECTOR: &str = ".child-card";
/// Used when the age input is missing, has no leading digits, or reads 0.
pub const DEFAULT_CHILD_AGE: i64 = 6;
pub const DEFAULT_CHILD_AVATAR: &str = "👶";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRecord {
    pub name: String,
    pub age: i64,
    pub avatar: String,
}

/// Raw sub-field values read from one child card. `None` means the input was
/// not present (or, for the avatar, no option was checked).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawChildCard {
    pub name: Option<String>,
    pub age: Option<String>,
    pub avatar: Option<String>,
}

/// Name of the indexed input inside child card `index`, e.g. `child_age_2`.
#[must_use]
pub fn child_field_name(field: &str, index: usize) -> String {
    format!("child_{field}_{index}")
}

/// Read-only access to the page's forms.
///
/// Implementations only read raw values; defaults and filtering live in the
/// provided methods so they behave the same for every document backend.
pub trait FormCollector {
    /// Named entries of the form with this id in document order, or `None`
    /// when the form does not exist.
    fn form_entries(&self, form_id: &str) -> Option<Vec<(String, String)>>;

    /// One entry per card matching `card_selector`, in document order.
    fn child_cards(&self, card_selector: &str) -> Vec<RawChildCard>;

    fn collect_flat_form(&self, form_id: &str) -> Option<Map<String, Value>> {
        self.form_entries(form_id).map(flatten_entries)
    }

    fn collect_children(&self, card_selector: &str) -> Vec<ChildRecord> {
        self.child_cards(card_selector)
            .into_iter()
            .filter_map(normalize_child_card)
            .collect()
    }
}

/// Later entries with the same name overwrite earlier ones.
#[must_use]
pub fn flatten_entries(entries: Vec<(String, String)>) -> Map<String, Value> {
    let mut fields = Map::new();
    for (name, value) in entries {
        fields.insert(name, Value::String(value));
    }
    fields
}

/// Cards with a blank name are dropped.
#[must_use]
pub fn normalize_child_card(card: RawChildCard) -> Option<ChildRecord> {
    let name = card.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    let age = card
        .age
        .as_deref()
        .and_then(parse_leading_integer)
        .filter(|age| *age != 0)
        .unwrap_or(DEFAULT_CHILD_AGE);
    let avatar = card
        .avatar
        .filter(|avatar| !avatar.is_empty())
        .unwrap_or_else(|| DEFAULT_CHILD_AVATAR.to_string());
    Some(ChildRecord {
        name: name.to_string(),
        age,
        avatar,
    })
}

/// Leading decimal digits after optional whitespace and one sign, so
/// `"7 лет"` parses as 7 and `"-3"` as -3. Values outside `i64` yield `None`.
#[must_use]
pub fn parse_leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits_len = unsigned
        .char_indices()
        .find(|(_, ch)| !ch.is_ascii_digit())
        .map_or(unsigned.len(), |(index, _)| index);
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = unsigned[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

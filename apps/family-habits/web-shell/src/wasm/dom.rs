use super::*;

    use family_habits_client_core::forms::child_field_name;

    /// Reads forms and child cards straight from the live document.
    pub(super) struct DomFormCollector;

    impl FormCollector for DomFormCollector {
        fn form_entries(&self, form_id: &str) -> Option<Vec<(String, String)>> {
            let document = web_sys::window()?.document()?;
            let form = document
                .get_element_by_id(form_id)?
                .dyn_into::<HtmlFormElement>()
                .ok()?;
            let data = web_sys::FormData::new_with_form(&form).ok()?;
            let iterator = js_sys::try_iter(&data).ok()??;

            let mut entries = Vec::new();
            for entry in iterator {
                let Ok(entry) = entry else {
                    continue;
                };
                let pair = js_sys::Array::from(&entry);
                // File inputs yield Blob values; only text fields are forwarded.
                let (name, value) = (pair.get(0).as_string(), pair.get(1).as_string());
                if let (Some(name), Some(value)) = (name, value) {
                    entries.push((name, value));
                }
            }
            Some(entries)
        }

        fn child_cards(&self, card_selector: &str) -> Vec<RawChildCard> {
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return Vec::new();
            };
            let Ok(cards) = document.query_selector_all(card_selector) else {
                return Vec::new();
            };

            (0..cards.length())
                .filter_map(|index| cards.item(index))
                .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
                .enumerate()
                .map(|(index, card)| RawChildCard {
                    name: input_value(&card, &child_field_name("name", index), false),
                    age: input_value(&card, &child_field_name("age", index), false),
                    avatar: input_value(&card, &child_field_name("avatar", index), true),
                })
                .collect()
        }
    }

    fn input_value(card: &web_sys::Element, name: &str, checked_only: bool) -> Option<String> {
        let state = if checked_only { ":checked" } else { "" };
        let selector = format!("input[name=\"{name}\"]{state}");
        let input = card
            .query_selector(&selector)
            .ok()??
            .dyn_into::<HtmlInputElement>()
            .ok()?;
        Some(input.value())
    }

    /// Style access on the document root element.
    pub(super) struct DomStyleScope {
        root: HtmlElement,
    }

    impl DomStyleScope {
        pub(super) fn for_document() -> Option<Self> {
            let root = web_sys::window()?
                .document()?
                .document_element()?
                .dyn_into::<HtmlElement>()
                .ok()?;
            Some(Self { root })
        }
    }

    impl StyleScope for DomStyleScope {
        fn set_variable(&self, name: &str, value: &str) {
            if self.root.style().set_property(name, value).is_err() {
                tracing::warn!(name, "failed to set theme variable");
            }
        }

        fn add_root_class(&self, class: &str) {
            let _ = self.root.class_list().add_1(class);
        }

        fn remove_root_class(&self, class: &str) {
            let _ = self.root.class_list().remove_1(class);
        }
    }

//! # Page Context
//!
//! The form handler and the polling loop touch the page they run on: they
//! read form fields, update progress text, navigate, reload, and show
//! blocking alerts. [`Page`] abstracts those effects so the same routines
//! run against a terminal front end or an in-memory [`RecordingPage`].
//!
//! ## Element Contract
//!
//! | Id | Used by | Required |
//! |----|---------|----------|
//! | `auditForm` | form submission | yes, for the form to be wired |
//! | `company_name`, `sector`, `location`, `email`, `plan`, `language` | form submission | no, absent fields read as empty |
//! | `progress` | polling loop | no |
//! | `currentStep` | polling loop | no |

use std::collections::BTreeMap;

pub const AUDIT_FORM: &str = "auditForm";
pub const PROGRESS: &str = "progress";
pub const CURRENT_STEP: &str = "currentStep";

/// Names of the audit form fields, in submission order.
pub const FORM_FIELDS: [&str; 6] = ["company_name", "sector", "location", "email", "plan", "language"];

/// Effects a page-bound routine may have on its page.
pub trait Page {
    /// Whether an element with this id exists.
    fn has_element(&self, id: &str) -> bool;

    /// Current value of a form field, `None` if the field is absent.
    fn field_value(&self, name: &str) -> Option<String>;

    /// Replace the text of an element. Returns `false`, doing nothing,
    /// when the element is absent.
    fn set_text(&mut self, id: &str, text: &str) -> bool;

    /// Enable or disable the form's submit control and set its label.
    fn set_submit_state(&mut self, enabled: bool, label: &str);

    /// Navigate to an origin-relative path.
    fn navigate(&mut self, path: &str);

    /// Reload the current page.
    fn reload(&mut self);

    /// Show a message the user must acknowledge.
    fn alert(&mut self, message: &str);
}

/// One observable effect on a [`RecordingPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEffect {
    TextSet { id: String, text: String },
    SubmitState { enabled: bool, label: String },
    Navigated(String),
    Reloaded,
    Alerted(String),
}

/// In-memory page that records every effect applied to it.
#[derive(Debug, Clone, Default)]
pub struct RecordingPage {
    elements: BTreeMap<String, String>,
    fields: BTreeMap<String, String>,
    submit_enabled: bool,
    submit_label: String,
    effects: Vec<PageEffect>,
}

impl RecordingPage {
    pub fn new() -> Self {
        Self {
            submit_enabled: true,
            ..Self::default()
        }
    }

    /// A page carrying the audit form with the given field values.
    pub fn with_form<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>, submit_label: &str) -> Self {
        let mut page = Self::new().with_element(AUDIT_FORM);
        for (name, value) in fields {
            page = page.with_field(name, value);
        }
        page.submit_label = submit_label.to_string();
        page
    }

    /// A page carrying the progress and current-step elements.
    pub fn results_page() -> Self {
        Self::new().with_element(PROGRESS).with_element(CURRENT_STEP)
    }

    pub fn with_element(mut self, id: &str) -> Self {
        self.elements.entry(id.to_string()).or_default();
        self
    }

    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    /// Current text of an element.
    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(String::as_str)
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    /// Every effect, in the order applied.
    pub fn effects(&self) -> &[PageEffect] {
        &self.effects
    }

    /// Paths navigated to, in order.
    pub fn navigations(&self) -> Vec<&str> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                PageEffect::Navigated(path) => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Alert messages shown, in order.
    pub fn alerts(&self) -> Vec<&str> {
        self.effects
            .iter()
            .filter_map(|e| match e {
                PageEffect::Alerted(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn reloads(&self) -> usize {
        self.effects
            .iter()
            .filter(|e| matches!(e, PageEffect::Reloaded))
            .count()
    }
}

impl Page for RecordingPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn field_value(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        match self.elements.get_mut(id) {
            Some(slot) => {
                *slot = text.to_string();
                self.effects.push(PageEffect::TextSet {
                    id: id.to_string(),
                    text: text.to_string(),
                });
                true
            }
            None => false,
        }
    }

    fn set_submit_state(&mut self, enabled: bool, label: &str) {
        self.submit_enabled = enabled;
        self.submit_label = label.to_string();
        self.effects.push(PageEffect::SubmitState {
            enabled,
            label: label.to_string(),
        });
    }

    fn navigate(&mut self, path: &str) {
        self.effects.push(PageEffect::Navigated(path.to_string()));
    }

    fn reload(&mut self) {
        self.effects.push(PageEffect::Reloaded);
    }

    fn alert(&mut self, message: &str) {
        self.effects.push(PageEffect::Alerted(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_elements_are_untouched() {
        let mut page = RecordingPage::new().with_element(PROGRESS);
        assert!(page.set_text(PROGRESS, "40%"));
        assert!(!page.set_text(CURRENT_STEP, "Analyzing"));
        assert_eq!(page.text(PROGRESS), Some("40%"));
        assert_eq!(page.text(CURRENT_STEP), None);
        assert_eq!(page.effects().len(), 1);
    }

    #[test]
    fn records_effects_in_order() {
        let mut page = RecordingPage::with_form([("company_name", "Acme")], "Go");
        assert!(page.has_element(AUDIT_FORM));
        assert_eq!(page.field_value("company_name").as_deref(), Some("Acme"));
        assert_eq!(page.field_value("sector"), None);

        page.set_submit_state(false, "Wait");
        page.alert("nope");
        page.navigate("/results/x");
        page.reload();

        assert!(!page.submit_enabled());
        assert_eq!(page.submit_label(), "Wait");
        assert_eq!(page.alerts(), vec!["nope"]);
        assert_eq!(page.navigations(), vec!["/results/x"]);
        assert_eq!(page.reloads(), 1);
        assert_eq!(page.effects().len(), 4);
    }
}

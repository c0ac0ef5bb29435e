//! # Terminal Page
//!
//! A [`Page`] for the command line. Form fields come from command-line
//! flags, progress text is printed as it changes, and navigation, reloads,
//! and alerts are reported as lines on the output stream.

use std::collections::BTreeMap;
use std::io::Write;

use seo_audit_client::page::{Page, AUDIT_FORM, CURRENT_STEP, PROGRESS};

/// Page backed by a line-oriented output stream.
pub struct TerminalPage<W: Write> {
    origin: String,
    fields: BTreeMap<String, String>,
    has_form: bool,
    progress: String,
    step: String,
    out: W,
}

impl<W: Write> TerminalPage<W> {
    /// A results page: shows progress and current step.
    pub fn results(origin: &str, out: W) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            fields: BTreeMap::new(),
            has_form: false,
            progress: String::new(),
            step: String::new(),
            out,
        }
    }

    /// A landing page carrying the audit form with the given field values.
    pub fn with_form<I, K, V>(origin: &str, fields: I, out: W) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut page = Self::results(origin, out);
        page.has_form = true;
        page.fields = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        page
    }

    /// Switch to the results page after a navigation.
    pub fn into_results(self) -> Self {
        Self::results(&self.origin, self.out)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}") {
            tracing::warn!(error = %e, line = text, "failed to write to terminal");
        }
    }
}

impl<W: Write> Page for TerminalPage<W> {
    fn has_element(&self, id: &str) -> bool {
        match id {
            AUDIT_FORM => self.has_form,
            PROGRESS | CURRENT_STEP => !self.has_form,
            _ => false,
        }
    }

    fn field_value(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        if !self.has_element(id) {
            return false;
        }
        match id {
            PROGRESS => self.progress = text.to_string(),
            CURRENT_STEP => self.step = text.to_string(),
            _ => return false,
        }
        // Both elements are set on every tick; print once the step arrives.
        if id == CURRENT_STEP {
            let line = format!("[{:>4}] {}", self.progress, self.step);
            self.line(&line);
        }
        true
    }

    fn set_submit_state(&mut self, enabled: bool, label: &str) {
        tracing::debug!(enabled, label, "submit control updated");
        if !enabled {
            self.line(label);
        }
    }

    fn navigate(&mut self, path: &str) {
        let line = format!("-> {}{path}", self.origin);
        self.line(&line);
    }

    fn reload(&mut self) {
        self.line("Audit terminé.");
    }

    fn alert(&mut self, message: &str) {
        let line = format!("!! {message}");
        self.line(&line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(page: TerminalPage<Vec<u8>>) -> String {
        String::from_utf8(page.into_inner()).unwrap()
    }

    #[test]
    fn form_page_exposes_fields_only() {
        let page = TerminalPage::with_form(
            "http://localhost:8000/",
            [("company_name", "Acme"), ("language", "")],
            Vec::new(),
        );
        assert!(page.has_element(AUDIT_FORM));
        assert!(!page.has_element(PROGRESS));
        assert_eq!(page.field_value("company_name").as_deref(), Some("Acme"));
        assert_eq!(page.field_value("sector"), None);
    }

    #[test]
    fn navigation_prints_absolute_url() {
        let mut page = TerminalPage::with_form("http://localhost:8000/", [("a", "b")], Vec::new());
        page.navigate("/results/abc123");
        assert_eq!(output(page), "-> http://localhost:8000/results/abc123\n");
    }

    #[test]
    fn progress_lines_are_printed_per_tick() {
        let mut page = TerminalPage::results("http://localhost:8000", Vec::new());
        assert!(page.set_text(PROGRESS, "50%"));
        assert!(page.set_text(CURRENT_STEP, "Analyzing visibility..."));
        assert!(!page.set_text("score", "42"));
        page.alert("boom");
        assert_eq!(
            output(page),
            "[ 50%] Analyzing visibility...\n!! boom\n"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failures_do_not_interrupt_the_flow() {
        let mut page = TerminalPage::results("http://localhost:8000", ClosedPipe);
        assert!(page.set_text(PROGRESS, "10%"));
        assert!(page.set_text(CURRENT_STEP, "Starting audit..."));
        page.alert("boom");
        page.reload();
    }

    #[test]
    fn into_results_drops_the_form() {
        let page = TerminalPage::with_form("http://x", [("plan", "pro")], Vec::new()).into_results();
        assert!(!page.has_element(AUDIT_FORM));
        assert!(page.has_element(PROGRESS));
        assert_eq!(page.field_value("plan"), None);
    }
}

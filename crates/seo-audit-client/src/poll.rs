//! # Audit Completion Polling
//!
//! Used on the results page while an audit is still processing. A repeating
//! timer polls the audit status, mirrors progress into the page, and stops
//! on the first terminal condition:
//!
//! 1. status `completed`: reload the page so the server renders the results;
//! 2. status `failed`, or the attempt cap reached: alert the user.
//!
//! Poll errors are logged and never shown to the user; the loop keeps going.
//!
//! ## Tick Ordering
//!
//! Ticks are serialized. Within a tick the status fetch resolves first, then
//! the page is updated, then terminal conditions are evaluated. The next
//! tick is not awaited until the current one finishes; ticks missed during a
//! slow poll are delayed rather than fired in a burst.
//!
//! ## Error Accounting
//!
//! Whether a failed poll uses up an attempt is selected by
//! [`PollErrorPolicy`]. With [`PollErrorPolicy::Counted`] the loop makes at
//! most `max_attempts` status calls. With [`PollErrorPolicy::Uncounted`] only
//! successful polls count, so an unreachable server keeps the loop running.

use std::future::Future;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::AuditApiError;
use crate::page::{Page, CURRENT_STEP, PROGRESS};
use crate::types::{AuditState, AuditStatus};
use crate::AuditClient;

/// Alert shown when the audit fails or polling gives up.
pub const FAILED_OR_TIMED_OUT: &str =
    "L'audit a échoué ou a pris trop de temps. Veuillez réessayer.";

/// Whether a failed poll consumes one of the allowed attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollErrorPolicy {
    /// Every tick is an attempt, successful or not.
    #[default]
    Counted,
    /// Only ticks whose status fetch succeeded are attempts.
    Uncounted,
}

/// Cadence and cap of the polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSettings {
    /// Delay before the first poll and between polls.
    pub interval: Duration,
    /// Attempts after which the loop gives up.
    pub max_attempts: u32,
    pub error_policy: PollErrorPolicy,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(2000),
            max_attempts: 60,
            error_policy: PollErrorPolicy::Counted,
        }
    }
}

/// Source of audit status snapshots.
pub trait StatusSource {
    fn poll_status(
        &self,
        audit_id: &str,
    ) -> impl Future<Output = Result<AuditStatus, AuditApiError>> + Send;
}

impl StatusSource for AuditClient {
    fn poll_status(
        &self,
        audit_id: &str,
    ) -> impl Future<Output = Result<AuditStatus, AuditApiError>> + Send {
        self.poll_audit_status(audit_id)
    }
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEnd {
    /// The audit completed; the page was reloaded.
    Completed,
    /// The server reported the audit as failed; the user was alerted.
    Failed,
    /// The attempt cap was reached; the user was alerted.
    TimedOut,
}

/// Summary of a finished polling loop.
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    pub end: PollEnd,
    /// Attempts counted against the cap.
    pub attempts: u32,
    /// Status requests issued, including failed ones.
    pub calls: u32,
    /// The last status successfully fetched.
    pub last_status: Option<AuditStatus>,
}

/// Poll `audit_id` until it completes, fails, or `settings.max_attempts`
/// is reached, mirroring progress into `page`.
pub async fn wait_for_audit_completion<S, P>(
    source: &S,
    audit_id: &str,
    page: &mut P,
    settings: &PollSettings,
) -> PollOutcome
where
    S: StatusSource,
    P: Page,
{
    let mut ticker = interval_at(Instant::now() + settings.interval, settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempts: u32 = 0;
    let mut calls: u32 = 0;
    let mut last_status = None;

    loop {
        ticker.tick().await;
        calls += 1;
        if settings.error_policy == PollErrorPolicy::Counted {
            attempts += 1;
        }

        let end = match source.poll_status(audit_id).await {
            Ok(status) => {
                if settings.error_policy == PollErrorPolicy::Uncounted {
                    attempts += 1;
                }

                page.set_text(PROGRESS, &status.progress_text());
                page.set_text(CURRENT_STEP, status.step_text());

                tracing::debug!(
                    audit_id,
                    attempt = attempts,
                    status = %status.status,
                    progress = status.progress,
                    "audit status polled"
                );

                let end = match status.status {
                    AuditState::Completed => Some(PollEnd::Completed),
                    AuditState::Failed => Some(PollEnd::Failed),
                    _ if attempts >= settings.max_attempts => Some(PollEnd::TimedOut),
                    _ => None,
                };
                last_status = Some(status);
                end
            }
            Err(e) => {
                tracing::warn!(audit_id, attempt = attempts, "polling error: {e}");
                match settings.error_policy {
                    PollErrorPolicy::Counted if attempts >= settings.max_attempts => {
                        Some(PollEnd::TimedOut)
                    }
                    _ => None,
                }
            }
        };

        let Some(end) = end else { continue };

        match end {
            PollEnd::Completed => page.reload(),
            PollEnd::Failed | PollEnd::TimedOut => page.alert(FAILED_OR_TIMED_OUT),
        }
        tracing::info!(audit_id, attempts, calls, end = ?end, "audit polling finished");

        return PollOutcome {
            end,
            attempts,
            calls,
            last_status,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageEffect, RecordingPage};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// Replays scripted results; repeats the last entry once exhausted.
    struct Scripted {
        script: Mutex<VecDeque<Result<AuditStatus, u16>>>,
        calls: AtomicU32,
    }

    impl Scripted {
        fn new(script: Vec<Result<AuditStatus, u16>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl StatusSource for Scripted {
        fn poll_status(
            &self,
            _audit_id: &str,
        ) -> impl Future<Output = Result<AuditStatus, AuditApiError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = {
                let mut script = self.script.lock().unwrap();
                if script.len() > 1 {
                    script.pop_front().unwrap()
                } else {
                    script.front().cloned().unwrap()
                }
            };
            async move {
                next.map_err(|status| AuditApiError::Rejected {
                    endpoint: "GET /api/audit/{id}/status".into(),
                    status,
                    message: crate::audit::STATUS_FAILED.into(),
                })
            }
        }
    }

    fn status(state: &str, progress: u32, step: &str) -> Result<AuditStatus, u16> {
        Ok(AuditStatus {
            status: AuditState::from(state),
            progress,
            current_step: Some(step.to_string()),
            audit_id: None,
            estimated_completion: None,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn stops_and_reloads_on_completion() {
        let source = Scripted::new(vec![
            status("pending", 0, "Waiting to start..."),
            status("running", 50, "Analyzing visibility..."),
            status("completed", 100, "Audit complete!"),
            status("pending", 0, "unreachable"),
        ]);
        let mut page = RecordingPage::results_page();
        let start = Instant::now();

        let outcome =
            wait_for_audit_completion(&source, "abc123", &mut page, &PollSettings::default()).await;

        assert_eq!(outcome.end, PollEnd::Completed);
        assert_eq!(outcome.attempts, 3);
        assert_eq!(source.calls(), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(6));
        assert_eq!(page.reloads(), 1);
        assert!(page.alerts().is_empty());
        assert_eq!(page.text(PROGRESS), Some("100%"));
        assert_eq!(page.text(CURRENT_STEP), Some("Audit complete!"));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_sixty_pending_polls() {
        let source = Scripted::new(vec![status("pending", 0, "Waiting to start...")]);
        let mut page = RecordingPage::results_page();
        let start = Instant::now();

        let outcome =
            wait_for_audit_completion(&source, "abc123", &mut page, &PollSettings::default()).await;

        assert_eq!(outcome.end, PollEnd::TimedOut);
        assert_eq!(outcome.attempts, 60);
        assert_eq!(source.calls(), 60);
        assert_eq!(start.elapsed(), Duration::from_secs(120));
        assert_eq!(page.alerts(), vec![FAILED_OR_TIMED_OUT]);
        assert_eq!(page.reloads(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_status_alerts_immediately() {
        let source = Scripted::new(vec![
            status("running", 50, "Analyzing visibility..."),
            status("failed", 0, "Audit failed"),
        ]);
        let mut page = RecordingPage::results_page();

        let outcome =
            wait_for_audit_completion(&source, "abc123", &mut page, &PollSettings::default()).await;

        assert_eq!(outcome.end, PollEnd::Failed);
        assert_eq!(source.calls(), 2);
        assert_eq!(page.alerts(), vec![FAILED_OR_TIMED_OUT]);
        assert_eq!(
            outcome.last_status.map(|s| s.status),
            Some(AuditState::Failed)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dom_updates_precede_the_terminal_effect() {
        let source = Scripted::new(vec![status("completed", 100, "Audit complete!")]);
        let mut page = RecordingPage::results_page();

        wait_for_audit_completion(&source, "abc123", &mut page, &PollSettings::default()).await;

        assert_eq!(
            page.effects(),
            &[
                PageEffect::TextSet {
                    id: PROGRESS.into(),
                    text: "100%".into()
                },
                PageEffect::TextSet {
                    id: CURRENT_STEP.into(),
                    text: "Audit complete!".into()
                },
                PageEffect::Reloaded,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_elements_are_skipped() {
        let source = Scripted::new(vec![status("completed", 100, "Audit complete!")]);
        let mut page = RecordingPage::new();

        let outcome =
            wait_for_audit_completion(&source, "abc123", &mut page, &PollSettings::default()).await;

        assert_eq!(outcome.end, PollEnd::Completed);
        assert_eq!(page.effects(), &[PageEffect::Reloaded]);
    }

    #[tokio::test(start_paused = true)]
    async fn errors_are_swallowed_and_the_loop_continues() {
        let source = Scripted::new(vec![
            Err(502),
            Err(502),
            status("completed", 100, "Audit complete!"),
        ]);
        let mut page = RecordingPage::results_page();

        let outcome =
            wait_for_audit_completion(&source, "abc123", &mut page, &PollSettings::default()).await;

        assert_eq!(outcome.end, PollEnd::Completed);
        assert_eq!(outcome.calls, 3);
        assert_eq!(outcome.attempts, 3);
        assert!(page.alerts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn counted_errors_exhaust_the_cap() {
        let source = Scripted::new(vec![Err(503)]);
        let mut page = RecordingPage::results_page();
        let settings = PollSettings {
            max_attempts: 5,
            ..PollSettings::default()
        };

        let outcome = wait_for_audit_completion(&source, "abc123", &mut page, &settings).await;

        assert_eq!(outcome.end, PollEnd::TimedOut);
        assert_eq!(source.calls(), 5);
        assert_eq!(outcome.last_status, None);
        assert_eq!(page.alerts(), vec![FAILED_OR_TIMED_OUT]);
        assert_eq!(page.text(PROGRESS), Some(""));
    }

    #[tokio::test(start_paused = true)]
    async fn uncounted_errors_do_not_consume_attempts() {
        let source = Scripted::new(vec![
            Err(503),
            Err(503),
            Err(503),
            status("pending", 0, "Waiting to start..."),
            status("pending", 0, "Waiting to start..."),
        ]);
        let mut page = RecordingPage::results_page();
        let settings = PollSettings {
            max_attempts: 2,
            error_policy: PollErrorPolicy::Uncounted,
            ..PollSettings::default()
        };

        let outcome = wait_for_audit_completion(&source, "abc123", &mut page, &settings).await;

        assert_eq!(outcome.end, PollEnd::TimedOut);
        assert_eq!(outcome.attempts, 2);
        assert_eq!(outcome.calls, 5);
        assert_eq!(source.calls(), 5);
    }
}

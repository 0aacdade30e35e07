use crate::ports::{CallFilter, CallFilterResultCallback, FilterSession};
use callguard_domain::{Call, CallId, Verdict};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};

/// Deadline used when the configured timeout does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// A verdict posted by one source onto the run's dispatch queue.
#[derive(Debug, Clone, Copy)]
struct FilterReport {
    index: usize,
    session: FilterSession,
    verdict: Verdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunOutcome {
    Completed(Verdict),
    TimedOut,
}

impl RunOutcome {
    fn verdict(self) -> Verdict {
        match self {
            RunOutcome::Completed(verdict) => verdict,
            RunOutcome::TimedOut => Verdict::PERMISSIVE_DEFAULT,
        }
    }
}

/// Completion side of a filtering run.
///
/// The callback is the production output; this handle exists so callers can
/// await the same verdict deterministically.
#[derive(Debug)]
pub struct FilterRunHandle {
    call_id: CallId,
    completion: oneshot::Receiver<Verdict>,
}

impl FilterRunHandle {
    pub fn call_id(&self) -> CallId {
        self.call_id
    }

    /// Resolves to the delivered verdict, or `None` if the run task died
    /// before delivering (the result callback panicked).
    pub async fn completion(self) -> Option<Verdict> {
        self.completion.await.ok()
    }
}

/// Fans one incoming call out to every [`CallFilter`] and folds their
/// verdicts into a single decision under a deadline.
///
/// Exactly one of two things ends the run: every source has reported, or the
/// deadline passed. The first delivers the merged verdict, the second
/// delivers [`Verdict::PERMISSIVE_DEFAULT`]. Reports arriving afterwards are
/// dropped.
pub struct IncomingCallFilter {
    call: Arc<Call>,
    filters: Vec<Arc<dyn CallFilter>>,
    callback: Arc<dyn CallFilterResultCallback>,
    timeout: Duration,
    session: FilterSession,
}

impl IncomingCallFilter {
    pub fn new(
        call: Call,
        filters: Vec<Arc<dyn CallFilter>>,
        callback: Arc<dyn CallFilterResultCallback>,
        timeout: Duration,
        session: FilterSession,
    ) -> Self {
        Self {
            call: Arc::new(call),
            filters,
            callback,
            timeout,
            session,
        }
    }

    pub fn perform_filtering(self) -> FilterRunHandle {
        let span = info_span!(
            "call_filter",
            call_id = %self.call.id,
            run_id = self.session.run_id
        );
        let now = Instant::now();
        let deadline = now
            .checked_add(self.timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let (report_tx, report_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = oneshot::channel();

        debug!(
            parent: &span,
            sources = self.filters.len(),
            timeout = ?self.timeout,
            "Starting call filtering"
        );

        for (index, filter) in self.filters.iter().enumerate() {
            spawn_source(
                index,
                Arc::clone(filter),
                Arc::clone(&self.call),
                self.session,
                report_tx.clone(),
                span.clone(),
            );
        }
        drop(report_tx);

        let source_count = self.filters.len();
        let call_id = self.call.id;
        tokio::spawn(
            async move {
                let outcome = collect_verdicts(report_rx, source_count, deadline).await;
                let verdict = outcome.verdict();
                match outcome {
                    RunOutcome::Completed(_) => {
                        info!(%verdict, "Call filtering complete")
                    }
                    RunOutcome::TimedOut => {
                        warn!(%verdict, "Call filtering timed out; letting the call through")
                    }
                }
                self.callback.on_call_filtering_complete(&self.call, verdict);
                let _ = done_tx.send(verdict);
            }
            .instrument(span),
        );

        FilterRunHandle {
            call_id,
            completion: done_rx,
        }
    }
}

fn spawn_source(
    index: usize,
    filter: Arc<dyn CallFilter>,
    call: Arc<Call>,
    session: FilterSession,
    reports: mpsc::UnboundedSender<FilterReport>,
    span: tracing::Span,
) {
    tokio::spawn(
        async move {
            let verdict = match AssertUnwindSafe(filter.evaluate(&call, &session))
                .catch_unwind()
                .await
            {
                Ok(verdict) => verdict,
                Err(_) => {
                    warn!(source = filter.name(), "Call filter panicked; using permissive default");
                    Verdict::PERMISSIVE_DEFAULT
                }
            };

            let report = FilterReport {
                index,
                session,
                verdict,
            };
            if reports.send(report).is_err() {
                debug!(
                    source = filter.name(),
                    %verdict,
                    "Filtering already finished; discarding late verdict"
                );
            }
        }
        .instrument(span),
    );
}

/// Serialized fan-in for one run. Returns exactly once, which is what makes
/// the result callback single-fire.
async fn collect_verdicts(
    mut reports: mpsc::UnboundedReceiver<FilterReport>,
    source_count: usize,
    deadline: Instant,
) -> RunOutcome {
    let mut result = Verdict::PASS;
    let mut reported = vec![false; source_count];
    let mut remaining = source_count;

    if remaining == 0 {
        return RunOutcome::Completed(result);
    }

    let timer = tokio::time::sleep_until(deadline);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            biased;

            Some(report) = reports.recv() => {
                let Some(seen) = reported.get_mut(report.index) else {
                    warn!(index = report.index, "Report from unknown source index; ignoring");
                    continue;
                };
                if *seen {
                    debug!(index = report.index, session = %report.session, "Duplicate report; ignoring");
                    continue;
                }
                *seen = true;
                remaining -= 1;
                result = result.combine(report.verdict);
                debug!(
                    index = report.index,
                    session = %report.session,
                    verdict = %report.verdict,
                    remaining,
                    "Source reported"
                );

                if remaining == 0 {
                    return RunOutcome::Completed(result);
                }
            }
            _ = &mut timer => {
                return RunOutcome::TimedOut;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(index: usize, verdict: Verdict) -> FilterReport {
        FilterReport {
            index,
            session: FilterSession::new(CallId(1), 1),
            verdict,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_report_does_not_complete_run() {
        let (tx, rx) = mpsc::unbounded_channel();
        let deadline = Instant::now() + Duration::from_millis(100);

        tx.send(report(0, Verdict::new(false, true, false, false)))
            .unwrap();
        tx.send(report(0, Verdict::PERMISSIVE_DEFAULT)).unwrap();

        let outcome = collect_verdicts(rx, 2, deadline).await;

        assert_eq!(outcome, RunOutcome::TimedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_first_report_per_source_is_merged() {
        let (tx, rx) = mpsc::unbounded_channel();
        let deadline = Instant::now() + Duration::from_millis(100);

        tx.send(report(0, Verdict::new(false, true, false, false)))
            .unwrap();
        tx.send(report(0, Verdict::new(true, false, true, true)))
            .unwrap();
        tx.send(report(1, Verdict::PASS)).unwrap();

        let outcome = collect_verdicts(rx, 2, deadline).await;

        assert_eq!(
            outcome,
            RunOutcome::Completed(Verdict::new(false, true, false, false))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_index_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        let deadline = Instant::now() + Duration::from_millis(100);

        tx.send(report(5, Verdict::new(false, true, true, true)))
            .unwrap();
        tx.send(report(0, Verdict::PASS)).unwrap();

        let outcome = collect_verdicts(rx, 1, deadline).await;

        assert_eq!(outcome, RunOutcome::Completed(Verdict::PASS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_queue_waits_for_deadline() {
        let (tx, rx) = mpsc::unbounded_channel::<FilterReport>();
        drop(tx);
        let start = Instant::now();

        let outcome = collect_verdicts(rx, 1, start + Duration::from_millis(100)).await;

        assert_eq!(outcome, RunOutcome::TimedOut);
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_no_sources_completes_with_pass() {
        let (_tx, rx) = mpsc::unbounded_channel();

        let outcome = collect_verdicts(rx, 0, Instant::now()).await;

        assert_eq!(outcome, RunOutcome::Completed(Verdict::PASS));
    }
}

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use super::{MarkdownRenderer, RenderError};

/// A finished render, tagged with the sequence number it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    pub seq: u64,
    pub result: Result<String, RenderError>,
}

/// Runs renders off the UI thread and hands the results back.
///
/// Each dispatch runs on its own short-lived thread, so a slow response never
/// blocks a newer one. Outcomes arrive in completion order; discarding stale
/// ones is the caller's job.
pub struct RenderWorker {
    renderer: Arc<dyn MarkdownRenderer>,
    tx: Sender<RenderOutcome>,
    rx: Receiver<RenderOutcome>,
}

impl RenderWorker {
    pub fn new(renderer: Arc<dyn MarkdownRenderer>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { renderer, tx, rx }
    }

    pub fn dispatch(&self, seq: u64, markdown: String) {
        let renderer = Arc::clone(&self.renderer);
        let tx = self.tx.clone();
        tracing::debug!(seq, bytes = markdown.len(), "dispatching render");
        std::thread::spawn(move || {
            let result = renderer.render(&markdown);
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(RenderOutcome { seq, result });
        });
    }

    /// Next finished render, if any, without waiting.
    pub fn try_recv(&self) -> Option<RenderOutcome> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next finished render.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RenderOutcome> {
        self.rx.recv_timeout(timeout).ok()
    }
}

impl std::fmt::Debug for RenderWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderWorker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl MarkdownRenderer for Echo {
        fn render(&self, markdown: &str) -> Result<String, RenderError> {
            if markdown == "fail" {
                Err(RenderError::Status(502))
            } else {
                Ok(format!("<p>{markdown}</p>"))
            }
        }
    }

    #[test]
    fn test_dispatch_reports_outcome_with_seq() {
        let worker = RenderWorker::new(Arc::new(Echo));
        worker.dispatch(7, "hi".to_string());
        let outcome = worker.recv_timeout(Duration::from_secs(5)).expect("outcome");
        assert_eq!(
            outcome,
            RenderOutcome {
                seq: 7,
                result: Ok("<p>hi</p>".to_string())
            }
        );
    }

    #[test]
    fn test_dispatch_reports_failure() {
        let worker = RenderWorker::new(Arc::new(Echo));
        worker.dispatch(1, "fail".to_string());
        let outcome = worker.recv_timeout(Duration::from_secs(5)).expect("outcome");
        assert_eq!(outcome.result, Err(RenderError::Status(502)));
    }

    #[test]
    fn test_try_recv_is_empty_before_dispatch() {
        let worker = RenderWorker::new(Arc::new(Echo));
        assert!(worker.try_recv().is_none());
    }
}

use super::{RenderError, RenderOutcome};

/// Preview text after any failed render.
pub const ERROR_MESSAGE: &str = "Error processing markdown";
/// Preview text while a render is in flight.
pub const PROCESSING_MESSAGE: &str = "Processing...";

/// What the preview pane shows and whether a render is outstanding.
///
/// Every dispatched render gets the next sequence number. Only the outcome
/// carrying the highest issued number is applied; older outcomes that
/// resolve late are dropped.
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    rendered_html: String,
    is_rendering: bool,
    error: Option<RenderError>,
    issued: u64,
    keep_last_good: bool,
}

impl RenderState {
    /// With `keep_last_good`, a failure leaves the previous HTML in place
    /// and only records the error.
    pub fn new(keep_last_good: bool) -> Self {
        Self {
            keep_last_good,
            ..Self::default()
        }
    }

    /// Start a new render and return its sequence number.
    pub const fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.is_rendering = true;
        self.issued
    }

    /// Apply a finished render. Returns `false` if it was stale.
    pub fn apply(&mut self, outcome: RenderOutcome) -> bool {
        if outcome.seq != self.issued {
            return false;
        }
        self.is_rendering = false;
        match outcome.result {
            Ok(html) => {
                self.rendered_html = html;
                self.error = None;
            }
            Err(err) => {
                if !self.keep_last_good {
                    self.rendered_html = ERROR_MESSAGE.to_string();
                }
                self.error = Some(err);
            }
        }
        true
    }

    pub const fn is_rendering(&self) -> bool {
        self.is_rendering
    }

    /// Sequence number of the most recent dispatch (0 before the first).
    pub const fn latest_seq(&self) -> u64 {
        self.issued
    }

    pub fn rendered_html(&self) -> &str {
        &self.rendered_html
    }

    pub const fn error(&self) -> Option<&RenderError> {
        self.error.as_ref()
    }

    /// The text the preview pane displays right now.
    pub fn preview_content(&self) -> &str {
        if self.is_rendering {
            PROCESSING_MESSAGE
        } else {
            &self.rendered_html
        }
    }

    /// Banner text when an error is shown on top of a kept preview.
    pub fn error_banner(&self) -> Option<&'static str> {
        (self.keep_last_good && self.error.is_some() && !self.is_rendering)
            .then_some(ERROR_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(seq: u64, html: &str) -> RenderOutcome {
        RenderOutcome {
            seq,
            result: Ok(html.to_string()),
        }
    }

    fn failed(seq: u64) -> RenderOutcome {
        RenderOutcome {
            seq,
            result: Err(RenderError::Status(500)),
        }
    }

    #[test]
    fn test_idle_rendering_idle() {
        let mut state = RenderState::new(false);
        assert!(!state.is_rendering());
        let seq = state.begin();
        assert!(state.is_rendering());
        assert_eq!(state.preview_content(), PROCESSING_MESSAGE);
        assert!(state.apply(ok(seq, "<h1>Hi</h1>")));
        assert!(!state.is_rendering());
        assert_eq!(state.preview_content(), "<h1>Hi</h1>");
    }

    #[test]
    fn test_failure_replaces_preview_with_error_message() {
        let mut state = RenderState::new(false);
        let seq = state.begin();
        state.apply(ok(seq, "<p>good</p>"));
        let seq = state.begin();
        assert!(state.apply(failed(seq)));
        assert!(!state.is_rendering());
        assert_eq!(state.preview_content(), ERROR_MESSAGE);
        assert_eq!(state.error(), Some(&RenderError::Status(500)));
        assert_eq!(state.error_banner(), None);
    }

    #[test]
    fn test_keep_last_good_preserves_preview_and_shows_banner() {
        let mut state = RenderState::new(true);
        let seq = state.begin();
        state.apply(ok(seq, "<p>good</p>"));
        let seq = state.begin();
        state.apply(failed(seq));
        assert_eq!(state.preview_content(), "<p>good</p>");
        assert_eq!(state.error_banner(), Some(ERROR_MESSAGE));

        let seq = state.begin();
        state.apply(ok(seq, "<p>better</p>"));
        assert_eq!(state.error_banner(), None);
    }

    #[test]
    fn test_stale_outcome_is_discarded() {
        let mut state = RenderState::new(false);
        let first = state.begin();
        let second = state.begin();

        assert!(state.apply(ok(second, "new")));
        assert!(!state.apply(ok(first, "old")));
        assert_eq!(state.preview_content(), "new");
        assert!(!state.is_rendering());
    }

    #[test]
    fn test_stale_outcome_does_not_end_newer_render() {
        let mut state = RenderState::new(false);
        let first = state.begin();
        let _second = state.begin();

        assert!(!state.apply(failed(first)));
        assert!(state.is_rendering());
        assert_eq!(state.preview_content(), PROCESSING_MESSAGE);
        assert!(state.error().is_none());
    }
}

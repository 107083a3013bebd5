use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app::{Message, Model, update};
use crate::clipboard::Clipboard;
use crate::config::EditorSettings;
use crate::render::{MarkdownRenderer, RenderWorker};
use crate::watcher::FileWatcher;

/// Cancel-and-reset timer for remote renders.
///
/// Every queue replaces the pending deadline, so only a quiet period of at
/// least `delay_ms` after the last document change fires.
#[derive(Debug)]
pub struct RenderDebouncer {
    delay_ms: u64,
    pending: Option<u64>,
}

impl RenderDebouncer {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub const fn queue(&mut self, now_ms: u64) {
        self.pending = Some(now_ms);
    }

    pub fn take_ready(&mut self, now_ms: u64) -> bool {
        let Some(queued_at) = self.pending else {
            return false;
        };
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub const fn cancel(&mut self) {
        self.pending = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Milliseconds until the pending render fires.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.pending
            .map(|queued_at| (queued_at + self.delay_ms).saturating_sub(now_ms))
    }
}

/// The editor controller without a terminal attached.
///
/// Owns the model together with everything that acts on it: the debounce
/// timer, the render dispatcher, the clipboard and the file watcher. The
/// event loop feeds it messages and clock ticks; tests do the same.
pub struct Session {
    pub(super) model: Model,
    pub(super) settings: EditorSettings,
    pub(super) worker: RenderWorker,
    pub(super) clipboard: Box<dyn Clipboard>,
    pub(super) watcher: Option<FileWatcher>,
    debouncer: RenderDebouncer,
}

impl Session {
    pub fn new(
        model: Model,
        settings: EditorSettings,
        renderer: Arc<dyn MarkdownRenderer>,
        clipboard: Box<dyn Clipboard>,
    ) -> Self {
        let delay_ms = u64::try_from(settings.debounce.as_millis()).unwrap_or(u64::MAX);
        Self {
            model,
            settings,
            worker: RenderWorker::new(renderer),
            clipboard,
            watcher: None,
            debouncer: RenderDebouncer::new(delay_ms),
        }
    }

    pub const fn model(&self) -> &Model {
        &self.model
    }

    pub const fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Schedule the first render, as if the document had just been set.
    pub const fn start(&mut self, now_ms: u64) {
        self.debouncer.queue(now_ms);
    }

    /// Apply a message: state transition, then side effects. Any document
    /// change (re)starts the render debounce.
    pub fn handle(&mut self, msg: Message, now_ms: u64) {
        let revision = self.model.revision();
        if matches!(msg, Message::RequestRender) {
            self.debouncer.cancel();
        }
        let side_msg = msg.clone();
        self.model = update(std::mem::take(&mut self.model), msg);
        self.handle_message_side_effects(&side_msg);
        if self.model.revision() != revision {
            self.debouncer.queue(now_ms);
        }
    }

    /// Advance timers and collect finished work. Returns true if anything
    /// visible changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let mut changed = self.model.expire_toast(Instant::now());

        if self.debouncer.take_ready(now_ms) {
            self.handle(Message::RequestRender, now_ms);
            changed = true;
        }

        while let Some(outcome) = self.worker.try_recv() {
            self.handle(Message::RenderFinished(outcome), now_ms);
            changed = true;
        }

        if self
            .watcher
            .as_mut()
            .is_some_and(|w| w.poll_change(Instant::now()))
        {
            self.handle(Message::FileChanged, now_ms);
            changed = true;
        }

        changed
    }

    /// Block until one render outcome arrives and apply it.
    pub fn wait_for_render(&mut self, timeout: Duration, now_ms: u64) -> bool {
        match self.worker.recv_timeout(timeout) {
            Some(outcome) => {
                self.handle(Message::RenderFinished(outcome), now_ms);
                true
            }
            None => false,
        }
    }

    pub const fn render_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// How long the event loop may sleep before the next tick matters.
    pub fn poll_timeout(&self, now_ms: u64) -> Duration {
        let mut ms = 250;
        if let Some(remaining) = self.debouncer.remaining_ms(now_ms) {
            ms = ms.min(remaining.max(1));
        }
        if self.model.render.is_rendering() {
            ms = ms.min(25);
        }
        if self.watcher.is_some() {
            ms = ms.min(100);
        }
        Duration::from_millis(ms)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("model", &self.model)
            .field("settings", &self.settings)
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

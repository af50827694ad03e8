//! Event wiring — binds user activations to the session controller and
//! re-derives base text and resume offset on every read request.

use tracing::{debug, warn};

use crate::anchor::realign;
use crate::config::ReaderConfig;
use crate::dom::DocumentView;
use crate::extract::{extract, select_base_text, ExclusionPolicy, Scope, TextSource};
use crate::session::{EngineEvent, SessionState, SpeechController, SpeechEngine, UtteranceId};
use crate::ui::{present, present_unsupported, ReaderControls, UiLabels};

/// The reading assistant, wired to a host document and a speech engine.
///
/// The host forwards control activations to [`on_read`](Self::on_read) /
/// [`on_stop`](Self::on_stop), forwards engine callbacks to
/// [`on_engine_event`](Self::on_engine_event), and re-renders its buttons
/// from [`controls`](Self::controls) after each of those.
pub struct Reader<E: SpeechEngine, D: DocumentView> {
    doc: D,
    controller: SpeechController<E>,
    exclusions: ExclusionPolicy,
    labels: UiLabels,
    supported: bool,
}

impl<E: SpeechEngine, D: DocumentView> Reader<E, D> {
    /// Wire up the reader. Engine availability is checked once here; an
    /// unavailable engine permanently disables both controls and turns
    /// every action into a no-op.
    pub fn new(engine: E, doc: D, config: ReaderConfig) -> Self {
        let supported = engine.available();
        if !supported {
            warn!("speech synthesis unavailable, reader disabled");
        }
        Self {
            doc,
            controller: SpeechController::new(engine, config.voice),
            exclusions: config.exclusions,
            labels: config.labels,
            supported,
        }
    }

    /// "Read" activation.
    ///
    /// A non-empty selection always starts a fresh read of the selection
    /// from offset 0 — a new selection is a new intent, never a resume.
    /// Otherwise the base text is recomputed, the prior resume point is
    /// realigned against it, and reading starts from the realigned offset.
    pub fn on_read(&mut self) {
        if !self.supported {
            return;
        }

        let selection = extract(&self.doc, Scope::Selection, &self.exclusions);
        if !selection.is_empty() {
            self.controller.start_read(selection, 0, TextSource::Selection);
            return;
        }

        let (text, source) = select_base_text(&self.doc, &self.exclusions);
        let start = realign(
            &text,
            self.controller.session().last_index,
            &self.controller.session().anchor,
        );
        debug!(start, ?source, "read activation");
        self.controller.start_read(text, start, source);
    }

    /// "Stop" activation: pause, keeping the resume point.
    pub fn on_stop(&mut self) {
        if !self.supported {
            return;
        }
        self.controller.stop_read();
    }

    /// Forward one engine callback into the state machine.
    pub fn on_engine_event(&mut self, id: UtteranceId, event: EngineEvent) {
        if !self.supported {
            return;
        }
        self.controller.handle_event(id, event);
    }

    /// Current state of both controls, ready to apply to the host UI.
    pub fn controls(&self) -> ReaderControls {
        if !self.supported {
            return present_unsupported(&self.labels);
        }
        let has_selection = !extract(&self.doc, Scope::Selection, &self.exclusions).is_empty();
        present(
            &self.labels,
            self.controller.is_speaking(),
            self.controller.session().has_resume(),
            has_selection,
        )
    }

    pub fn session(&self) -> &SessionState {
        self.controller.session()
    }

    pub fn is_speaking(&self) -> bool {
        self.controller.is_speaking()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! Speech session controller — owns the one utterance in flight.
//!
//! The controller is an explicit Idle/Speaking state machine driven by two
//! user actions ([`SpeechController::start_read`] /
//! [`SpeechController::stop_read`]) and by engine callbacks forwarded
//! through [`SpeechController::handle_event`]. Everything runs on the
//! host's single event thread; handlers run to completion, so the session
//! state is never read mid-mutation.
//!
//! At most one utterance is ever active: starting a new read cancels the
//! previous one first, and every utterance carries an id so late events
//! from a cancelled utterance are discarded instead of corrupting the
//! resume position.

use thiserror::Error;
use tracing::{debug, warn};

use crate::anchor::{char_len, make_anchor, tail};
use crate::extract::TextSource;
use crate::voice::{Voice, VoicePreference};

/// Opaque handle identifying one utterance submitted to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtteranceId(u64);

/// One request to vocalise a span of text.
#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceRequest {
    pub id: UtteranceId,
    /// The remaining text to speak (the base text from the resume offset on).
    pub text: String,
    pub voice: Option<Voice>,
    pub locale: String,
    pub rate: f32,
    pub pitch: f32,
}

/// Lifecycle and progress events the engine delivers for an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine actually started speaking.
    Started,
    /// Progress: character offset into the utterance's text reached so far.
    Boundary { char_index: usize },
    /// The utterance finished or was stopped by the engine.
    Ended,
    /// The engine gave up on the utterance.
    Errored,
}

/// Engine-side failure surfaced by [`SpeechEngine::speak`].
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// Speech synthesis is not available in this environment.
    #[error("speech synthesis unavailable")]
    Unavailable,
    /// The engine refused the utterance.
    #[error("utterance rejected: {0}")]
    Rejected(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// SpeechEngine — the platform seam
// ─────────────────────────────────────────────────────────────────────────────

/// The platform speech engine, as the controller needs it.
///
/// The engine is the only asynchronous boundary: `speak` returns
/// immediately and the engine later reports progress by having the host
/// call [`SpeechController::handle_event`] with the request's id.
/// `cancel` is fire-and-forget. Voice lists may load asynchronously; the
/// controller queries [`voices`](Self::voices) fresh on every read start,
/// so a voices-changed notification needs no handling here.
pub trait SpeechEngine {
    /// Whether synthesis is available at all. Checked once at reader
    /// construction; a `false` disables the feature entirely.
    fn available(&self) -> bool {
        true
    }

    fn speak(&mut self, request: UtteranceRequest) -> Result<(), EngineError>;

    fn cancel(&mut self);

    fn voices(&self) -> Vec<Voice>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Session state
// ─────────────────────────────────────────────────────────────────────────────

/// Resume bookkeeping for the current read.
///
/// Invariants: `last_index <= char_len(base_text)`, and `anchor` is always
/// the (≤80 char) prefix of `base_text` at `last_index`. A completed read
/// resets `last_index` to 0 and `anchor` to empty — no resume available.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub base_text: String,
    pub source: TextSource,
    pub last_index: usize,
    pub anchor: String,
}

impl SessionState {
    /// A resume point exists when the last read stopped strictly inside
    /// the base text.
    pub fn has_resume(&self) -> bool {
        self.last_index > 0 && self.last_index < char_len(&self.base_text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Idle,
    Speaking,
}

#[derive(Debug, Clone, Copy)]
struct ActiveUtterance {
    id: UtteranceId,
    /// Absolute char offset of the utterance's first character in the base
    /// text; boundary offsets are relative to it.
    start_index: usize,
}

// ─────────────────────────────────────────────────────────────────────────────
// Controller
// ─────────────────────────────────────────────────────────────────────────────

/// The Idle/Speaking state machine coordinating the external engine.
pub struct SpeechController<E: SpeechEngine> {
    engine: E,
    preference: VoicePreference,
    session: SessionState,
    phase: Phase,
    current: Option<ActiveUtterance>,
    next_id: u64,
}

impl<E: SpeechEngine> SpeechController<E> {
    pub fn new(engine: E, preference: VoicePreference) -> Self {
        Self {
            engine,
            preference,
            session: SessionState::default(),
            phase: Phase::Idle,
            current: None,
            next_id: 0,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// True exactly while the engine has acknowledged an active utterance.
    pub fn is_speaking(&self) -> bool {
        self.phase == Phase::Speaking
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Start reading `text` from `start_index` (clamped into bounds).
    ///
    /// Speaking nothing is a silent no-op. Otherwise any active utterance
    /// is cancelled first, the session state is replaced, and a fresh
    /// utterance for the remaining text is submitted with a freshly
    /// resolved voice.
    pub fn start_read(&mut self, text: String, start_index: usize, source: TextSource) {
        let index = start_index.min(char_len(&text));
        let remaining = tail(&text, index).to_string();
        if remaining.is_empty() {
            debug!("nothing to speak, staying idle");
            return;
        }

        // At-most-one-active: always cancel before submitting.
        self.engine.cancel();
        self.phase = Phase::Idle;

        let voices = self.engine.voices();
        let voice = self.preference.resolve(&voices).cloned();
        let locale = self.preference.utterance_locale(voice.as_ref());

        self.next_id += 1;
        let id = UtteranceId(self.next_id);

        self.session = SessionState {
            anchor: make_anchor(&text, index),
            base_text: text,
            source,
            last_index: index,
        };

        let request = UtteranceRequest {
            id,
            text: remaining,
            voice,
            locale,
            rate: 1.0,
            pitch: 1.0,
        };

        debug!(id = id.0, start_index = index, ?source, "submitting utterance");
        match self.engine.speak(request) {
            Ok(()) => self.current = Some(ActiveUtterance { id, start_index: index }),
            Err(err) => {
                // Resume state is already recorded, so the next activation
                // can retry from the same place.
                warn!(%err, "engine rejected utterance");
                self.current = None;
            }
        }
    }

    /// Stop is pause: cancel the engine unconditionally, go Idle, and keep
    /// `last_index`/`anchor` so the next activation can resume.
    pub fn stop_read(&mut self) {
        debug!("stop requested");
        self.engine.cancel();
        self.phase = Phase::Idle;
        self.current = None;
    }

    /// Feed one engine event back into the state machine. Events that do
    /// not belong to the current utterance are stale deliveries from a
    /// cancelled one and are discarded.
    pub fn handle_event(&mut self, id: UtteranceId, event: EngineEvent) {
        let Some(active) = self.current else {
            debug!(id = id.0, ?event, "event with no utterance in flight, ignoring");
            return;
        };
        if active.id != id {
            debug!(id = id.0, current = active.id.0, ?event, "stale utterance event, ignoring");
            return;
        }

        match event {
            EngineEvent::Started => {
                self.phase = Phase::Speaking;
            }
            EngineEvent::Boundary { char_index } => {
                let last = (active.start_index + char_index).min(char_len(&self.session.base_text));
                self.session.last_index = last;
                self.session.anchor = make_anchor(&self.session.base_text, last);
            }
            EngineEvent::Ended => {
                self.phase = Phase::Idle;
                self.current = None;
                // The engine's final boundary event often lands one short
                // of the end; treat that as full consumption too.
                if self.session.last_index + 1 >= char_len(&self.session.base_text) {
                    self.session.last_index = 0;
                    self.session.anchor.clear();
                } else {
                    debug!(
                        last_index = self.session.last_index,
                        "utterance ended early, keeping resume point"
                    );
                }
            }
            EngineEvent::Errored => {
                // Non-fatal interruption: back to Idle, resume point kept.
                warn!(id = id.0, "engine reported an utterance error");
                self.phase = Phase::Idle;
                self.current = None;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

//! # read-aloud
//!
//! Core of a resumable text-to-speech reading assistant: it reads a page's
//! content (or the user's selection) aloud, skips dynamically-changing
//! regions such as carousels, and can pause and resume from roughly the
//! same spot even when the underlying document mutated in between.
//!
//! The crate is platform-free. The host supplies two collaborators:
//!
//! * a [`SpeechEngine`] — submits utterances, cancels them, lists voices,
//!   and forwards lifecycle/progress callbacks back into the reader;
//! * a [`DocumentView`] — hands out owned [`dom::Element`] snapshots of
//!   the selection, the primary content region, and the document body.
//!
//! ## Quick start
//!
//! ```no_run
//! use read_aloud::{Reader, ReaderConfig, EngineEvent};
//! # use read_aloud::{DocumentView, SpeechEngine, UtteranceRequest, EngineError, Voice};
//! # use read_aloud::dom::Element;
//! # struct HostEngine;
//! # impl SpeechEngine for HostEngine {
//! #     fn speak(&mut self, _r: UtteranceRequest) -> Result<(), EngineError> { Ok(()) }
//! #     fn cancel(&mut self) {}
//! #     fn voices(&self) -> Vec<Voice> { vec![] }
//! # }
//! # struct HostDoc;
//! # impl DocumentView for HostDoc {
//! #     fn selection_text(&self) -> Option<String> { None }
//! #     fn primary_content(&self) -> Option<Element> { None }
//! #     fn body(&self) -> Option<Element> { None }
//! # }
//! let mut reader = Reader::new(HostEngine, HostDoc, ReaderConfig::default());
//!
//! // Wire the host's buttons and engine callbacks:
//! reader.on_read();                                  // "read" button
//! // ... engine reports progress through the host binding:
//! // reader.on_engine_event(id, EngineEvent::Boundary { char_index });
//! reader.on_stop();                                  // "stop" button — pause, not finish
//! reader.on_read();                                  // resumes near the paused position
//!
//! // Re-render the buttons after every action:
//! let controls = reader.controls();
//! assert!(controls.read.enabled);
//! ```
//!
//! ## How resume survives document churn
//!
//! 1. Extraction prunes excluded subtrees from a snapshot copy and
//!    normalises whitespace, so offsets are stable across re-extractions.
//! 2. While speaking, every engine boundary event re-captures an **anchor**
//!    — up to 80 characters of text at the last spoken position.
//! 3. On resume the base text is recomputed and [`anchor::realign`] finds
//!    the anchor's new position by content, falling back to the old
//!    numeric offset (or 0) when the text is gone.

pub mod anchor;
pub mod config;
pub mod dom;
pub mod extract;
pub mod normalize;
pub mod reader;
pub mod session;
pub mod ui;
pub mod voice;

// ─── Re-exports for convenience ─────────────────────────────────────────────

pub use config::ReaderConfig;
pub use dom::DocumentView;
pub use extract::{ExclusionPolicy, TextSource};
pub use reader::Reader;
pub use session::{
    EngineError, EngineEvent, SessionState, SpeechController, SpeechEngine, UtteranceId,
    UtteranceRequest,
};
pub use ui::{ControlView, ReaderControls, UiLabels};
pub use voice::{Voice, VoicePreference};

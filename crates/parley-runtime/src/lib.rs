//! Session orchestration for Parley
//!
//! Ties the tracker, memory chain, delegation advisor, and connection
//! manager together into the per-turn control flow, and owns the
//! transcript the UI renders.

mod session;
mod transcript;

pub use session::{Session, SessionBuilder, SessionError};
pub use transcript::{ItemStatus, Transcript, TranscriptItem, DELTA_MIN_INTERVAL};

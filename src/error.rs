//! Error types for the scholarship agent.
//!
//! `submit` itself never returns an error: empty input, busy rejection,
//! and cancellation are ordinary `SubmitOutcome`s, and reply-synthesis
//! failure is converted into a fixed apology message so the timeline is
//! always a complete, renderable log.

/// Reply synthesis errors.
#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("profile field {0} required to render recommendations is missing")]
    MissingProfileField(&'static str),
}

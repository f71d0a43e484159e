//! Session — the conversation controller.
//!
//! Owns the stage, profile, and timeline for one conversation, and
//! implements the scripted transition table on each submitted input.
//! `submit` never returns an error: every failure degrades into a normal
//! agent message so the timeline is always a complete, renderable log.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, warn};

use crate::catalog::render_recommendations;
use crate::config::AgentConfig;
use crate::error::ReplyError;
use crate::extractor::{self, MatchedCategory};
use crate::profile::UserProfile;
use crate::prompts;
use crate::stage::ConversationStage;
use crate::timeline::{Message, Timeline};

/// Outcome of a `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The input was processed and an agent reply was appended.
    Replied,
    /// Empty or whitespace-only input; nothing changed.
    IgnoredEmpty,
    /// A reply was already in flight; the input was dropped.
    RejectedBusy,
    /// The session closed before the reply resolved; the result was
    /// discarded without touching shared state.
    Cancelled,
}

/// Push notification emitted on session state changes.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Messages were appended or the typing placeholder resolved.
    TimelineChanged,
    /// The conversation stage advanced.
    StageChanged {
        from: ConversationStage,
        to: ConversationStage,
    },
}

/// Point-in-time view of the session for rendering.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub messages: Vec<Message>,
    pub stage: ConversationStage,
    pub profile: UserProfile,
    pub progress_percent: u8,
}

/// Mutable session state, guarded by one RwLock so observers can snapshot
/// while a reply is pending.
struct SessionState {
    stage: ConversationStage,
    profile: UserProfile,
    timeline: Timeline,
}

/// One conversation session.
///
/// At most one reply-generation is in flight at a time; a `submit` while
/// one is pending is rejected, not queued. `close` discards any pending
/// reply.
pub struct Session {
    config: AgentConfig,
    state: Arc<RwLock<SessionState>>,
    in_flight: AtomicBool,
    closed: AtomicBool,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    /// Create a session: stage Profiling, empty profile, and the fixed
    /// welcome message already on the timeline.
    pub fn new(config: AgentConfig) -> Self {
        let mut timeline = Timeline::new();
        timeline.push(Message::agent(prompts::WELCOME));

        let (events, _) = broadcast::channel(256);
        Self {
            config,
            state: Arc::new(RwLock::new(SessionState {
                stage: ConversationStage::Profiling,
                profile: UserProfile::default(),
                timeline,
            })),
            in_flight: AtomicBool::new(false),
            closed: AtomicBool::new(false),
            events,
        }
    }

    /// Subscribe to timeline/stage change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Whether the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Point-in-time copy of messages, stage, profile, and progress.
    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;
        Snapshot {
            messages: state.timeline.messages().to_vec(),
            stage: state.stage,
            profile: state.profile.clone(),
            progress_percent: state.profile.progress_percent(),
        }
    }

    /// Handle one user input per the transition table.
    ///
    /// Appends the user message and a typing placeholder (both observable
    /// before the simulated delay starts), waits out the delay, then
    /// resolves the placeholder into the scripted reply. Synthesis failure
    /// degrades to the fixed apology without rolling back stage or
    /// profile.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if self.is_closed() {
            return SubmitOutcome::Cancelled;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Ignoring empty input");
            return SubmitOutcome::IgnoredEmpty;
        }

        // At most one in-flight reply per session. Extraction mutates the
        // profile, so a second concurrent submit would race it.
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Rejecting submit while a reply is in flight");
            return SubmitOutcome::RejectedBusy;
        }

        {
            let mut state = self.state.write().await;
            state.timeline.push(Message::user(text));
            state.timeline.push(Message::typing());
        }
        let _ = self.events.send(SessionEvent::TimelineChanged);

        tokio::time::sleep(self.reply_delay()).await;

        let stage_change = {
            let mut state = self.state.write().await;

            // The session may have closed while we slept. The check must
            // happen under the write lock: close() sets the flag before
            // taking the lock to clean up the placeholder, so once we hold
            // the lock and the flag is clear, no close can have landed
            // between the check and the mutation below.
            if self.is_closed() {
                drop(state);
                self.in_flight.store(false, Ordering::SeqCst);
                debug!("Session closed while reply pending; discarding");
                return SubmitOutcome::Cancelled;
            }

            let (reply, stage_change) = synthesize_reply(&mut state, text);
            let reply_text = match reply {
                Ok(reply) => reply,
                Err(e) => {
                    warn!(error = %e, "Reply synthesis failed; sending apology");
                    prompts::APOLOGY.to_string()
                }
            };
            state.timeline.resolve_typing(Message::agent(reply_text));
            stage_change
        };

        self.in_flight.store(false, Ordering::SeqCst);

        let _ = self.events.send(SessionEvent::TimelineChanged);
        if let Some((from, to)) = stage_change {
            let _ = self.events.send(SessionEvent::StageChanged { from, to });
        }

        SubmitOutcome::Replied
    }

    /// Close the session. Any pending reply is discarded on completion;
    /// a dangling typing placeholder is removed here so the timeline is
    /// never left permanently "typing".
    pub async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let removed = {
            let mut state = self.state.write().await;
            state.timeline.remove_typing()
        };
        if removed {
            let _ = self.events.send(SessionEvent::TimelineChanged);
        }
        debug!("Session closed");
    }

    fn reply_delay(&self) -> Duration {
        let jitter_ms = self.config.reply_delay_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis(rand::thread_rng().gen_range(0..=jitter_ms))
        };
        self.config.reply_delay + jitter
    }
}

/// Apply the transition table for one input. Returns the reply (or a
/// synthesis error) and the stage change, if one occurred.
fn synthesize_reply(
    state: &mut SessionState,
    text: &str,
) -> (
    Result<String, ReplyError>,
    Option<(ConversationStage, ConversationStage)>,
) {
    match state.stage {
        ConversationStage::Profiling => {
            match extractor::extract(state.stage, text, &mut state.profile) {
                Some(category) => {
                    let stage_change = if category == MatchedCategory::Location {
                        advance(state, ConversationStage::Searching)
                    } else {
                        None
                    };
                    (Ok(prompts::follow_up(category).to_string()), stage_change)
                }
                None => (Ok(prompts::FALLBACK.to_string()), None),
            }
        }
        ConversationStage::Searching => {
            let stage_change = advance(state, ConversationStage::Responding);
            (render_recommendations(&state.profile), stage_change)
        }
        ConversationStage::Responding | ConversationStage::Complete => {
            (Ok(prompts::FALLBACK.to_string()), None)
        }
    }
}

/// Advance the stage, validating against the forward-only transition set.
fn advance(
    state: &mut SessionState,
    to: ConversationStage,
) -> Option<(ConversationStage, ConversationStage)> {
    let from = state.stage;
    if !from.can_transition_to(to) {
        warn!(%from, %to, "Refusing invalid stage transition");
        return None;
    }
    debug!(%from, %to, "Stage advanced");
    state.stage = to;
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(AgentConfig::instant())
    }

    #[tokio::test]
    async fn new_session_starts_with_welcome() {
        let session = session();
        let snap = session.snapshot().await;
        assert_eq!(snap.stage, ConversationStage::Profiling);
        assert_eq!(snap.progress_percent, 0);
        assert_eq!(snap.messages.len(), 1);
        assert_eq!(snap.messages[0].text, prompts::WELCOME);
        assert!(!snap.messages[0].is_typing);
    }

    #[tokio::test]
    async fn empty_input_is_a_noop() {
        let session = session();
        for input in ["", "   ", "\n\t"] {
            assert_eq!(session.submit(input).await, SubmitOutcome::IgnoredEmpty);
        }
        let snap = session.snapshot().await;
        assert_eq!(snap.messages.len(), 1);
        assert_eq!(snap.stage, ConversationStage::Profiling);
        assert_eq!(snap.progress_percent, 0);
    }

    #[tokio::test]
    async fn field_of_study_input_stays_in_profiling() {
        let session = session();
        let outcome = session.submit("I study computer engineering").await;
        assert_eq!(outcome, SubmitOutcome::Replied);

        let snap = session.snapshot().await;
        assert_eq!(snap.stage, ConversationStage::Profiling);
        assert_eq!(
            snap.profile.field_of_study.as_deref(),
            Some("Computer Science/Engineering")
        );
        let reply = snap.messages.last().unwrap();
        assert!(reply.text.contains("level of education"));
        assert!(!snap.messages.iter().any(|m| m.is_typing));
    }

    #[tokio::test]
    async fn no_match_gets_fallback_without_state_change() {
        let session = session();
        session.submit("hello!").await;
        let snap = session.snapshot().await;
        assert_eq!(snap.stage, ConversationStage::Profiling);
        assert_eq!(snap.progress_percent, 0);
        assert_eq!(snap.messages.last().unwrap().text, prompts::FALLBACK);
    }

    #[tokio::test]
    async fn location_input_advances_to_searching() {
        let session = session();
        session.submit("I live in Ottawa").await;
        let snap = session.snapshot().await;
        assert_eq!(snap.stage, ConversationStage::Searching);
        assert!(snap.messages.last().unwrap().text.contains("start searching"));
    }

    #[tokio::test]
    async fn searching_input_delivers_recommendations() {
        let session = session();
        session.submit("I am a Canadian citizen").await;
        session.submit("Toronto").await;
        session.submit("ok, go ahead").await;

        let snap = session.snapshot().await;
        assert_eq!(snap.stage, ConversationStage::Responding);
        let reply = &snap.messages.last().unwrap().text;
        assert!(reply.contains("Scholarships for I am a Canadian citizen Citizens"));
        assert!(reply.contains("Next Steps"));
    }

    #[tokio::test]
    async fn searching_without_citizenship_degrades_to_apology() {
        // Reachable only by construction in the current rule set (location
        // is asked after citizenship), but synthesis failure must not
        // roll back the stage.
        let session = session();
        session.submit("Vancouver").await; // straight to Searching
        session.submit("anything").await;

        let snap = session.snapshot().await;
        assert_eq!(snap.stage, ConversationStage::Responding);
        assert_eq!(snap.messages.last().unwrap().text, prompts::APOLOGY);
    }

    #[tokio::test]
    async fn responding_stage_always_falls_back() {
        let session = session();
        session.submit("I am a Canadian citizen").await;
        session.submit("Toronto").await;
        session.submit("search please").await;
        session.submit("tell me more about computer science").await;

        let snap = session.snapshot().await;
        // Tokens that would match in Profiling are inert here.
        assert_eq!(snap.stage, ConversationStage::Responding);
        assert_eq!(snap.messages.last().unwrap().text, prompts::FALLBACK);
    }

    #[tokio::test]
    async fn submit_after_close_is_cancelled() {
        let session = session();
        session.close().await;
        assert_eq!(session.submit("hello").await, SubmitOutcome::Cancelled);
        assert_eq!(session.snapshot().await.messages.len(), 1);
    }

    #[tokio::test]
    async fn events_are_broadcast_on_submit() {
        let session = session();
        let mut rx = session.subscribe();
        session.submit("I study computer engineering").await;

        // Two timeline events: user+typing appended, then reply resolved.
        assert!(matches!(rx.recv().await, Ok(SessionEvent::TimelineChanged)));
        assert!(matches!(rx.recv().await, Ok(SessionEvent::TimelineChanged)));
    }

    #[tokio::test]
    async fn stage_change_event_carries_endpoints() {
        let session = session();
        let mut rx = session.subscribe();
        session.submit("Toronto").await;

        let mut saw_stage_change = false;
        while let Ok(event) = rx.try_recv() {
            if let SessionEvent::StageChanged { from, to } = event {
                assert_eq!(from, ConversationStage::Profiling);
                assert_eq!(to, ConversationStage::Searching);
                saw_stage_change = true;
            }
        }
        assert!(saw_stage_change);
    }
}

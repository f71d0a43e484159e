//! Conversation stage machine — tracks which phase of the scripted flow
//! the session is in.

use serde::{Deserialize, Serialize};

/// The stages of the scholarship conversation.
///
/// Progresses linearly: Profiling → Searching → Responding → Complete.
/// There are no backward edges; a mis-extracted profile field can only be
/// overwritten while still in Profiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    /// Collecting profile fields from free-text input.
    Profiling,
    /// Enough profile collected; next input triggers recommendations.
    Searching,
    /// Recommendations delivered; further input gets a generic fallback.
    Responding,
    /// Terminal. Nothing in the current rule set enters this stage.
    Complete,
}

impl ConversationStage {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: ConversationStage) -> bool {
        use ConversationStage::*;
        matches!(
            (self, target),
            (Profiling, Searching) | (Searching, Responding) | (Responding, Complete)
        )
    }

    /// Whether this stage is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Get the next stage in the linear progression, if any.
    pub fn next(&self) -> Option<ConversationStage> {
        use ConversationStage::*;
        match self {
            Profiling => Some(Searching),
            Searching => Some(Responding),
            Responding => Some(Complete),
            Complete => None,
        }
    }

    /// Human-readable label for presentation layers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Profiling => "Building Your Profile",
            Self::Searching => "Searching Scholarships",
            Self::Responding => "Providing Recommendations",
            Self::Complete => "Complete",
        }
    }
}

impl Default for ConversationStage {
    fn default() -> Self {
        Self::Profiling
    }
}

impl std::fmt::Display for ConversationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Profiling => "profiling",
            Self::Searching => "searching",
            Self::Responding => "responding",
            Self::Complete => "complete",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use ConversationStage::*;
        let transitions = [
            (Profiling, Searching),
            (Searching, Responding),
            (Responding, Complete),
        ];
        for (from, to) in transitions {
            assert!(
                from.can_transition_to(to),
                "{from} should transition to {to}"
            );
        }
    }

    #[test]
    fn invalid_transitions() {
        use ConversationStage::*;
        // Skip stages
        assert!(!Profiling.can_transition_to(Responding));
        assert!(!Profiling.can_transition_to(Complete));
        // Go backward
        assert!(!Searching.can_transition_to(Profiling));
        assert!(!Responding.can_transition_to(Searching));
        // Terminal
        assert!(!Complete.can_transition_to(Profiling));
        // Self-transition
        assert!(!Profiling.can_transition_to(Profiling));
    }

    #[test]
    fn next_walks_all_stages() {
        use ConversationStage::*;
        let mut current = Profiling;
        for expected in [Searching, Responding, Complete] {
            let next = current.next().unwrap();
            assert_eq!(next, expected);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn is_terminal() {
        use ConversationStage::*;
        assert!(Complete.is_terminal());
        assert!(!Profiling.is_terminal());
        assert!(!Searching.is_terminal());
        assert!(!Responding.is_terminal());
    }

    #[test]
    fn display_matches_serde() {
        use ConversationStage::*;
        for stage in [Profiling, Searching, Responding, Complete] {
            let display = format!("{stage}");
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(format!("\"{display}\""), json);
        }
    }

    #[test]
    fn default_is_profiling() {
        assert_eq!(ConversationStage::default(), ConversationStage::Profiling);
    }
}

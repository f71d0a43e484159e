//! Keyword-based profile extraction.
//!
//! A closed, ordered rule table maps free-text input onto profile fields.
//! Matching is substring containment on the lower-cased input, first match
//! wins. This is deliberately not word-boundary matching: "Canadian"
//! contains "canada" (which the scripted flow relies on) and "mastermind"
//! contains "master" (a known false positive, kept as-is).

use crate::profile::UserProfile;
use crate::stage::ConversationStage;

/// Which profile field a rule targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedCategory {
    FieldOfStudy,
    EducationLevel,
    Citizenship,
    Location,
}

impl std::fmt::Display for MatchedCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FieldOfStudy => "field_of_study",
            Self::EducationLevel => "education_level",
            Self::Citizenship => "citizenship",
            Self::Location => "location",
        };
        write!(f, "{s}")
    }
}

/// How a rule derives the stored value from the matched input.
enum ValueTransform {
    /// Store a fixed normalized label.
    Label(&'static str),
    /// Store the raw input text, exactly as typed.
    RawInput,
}

/// One entry in the extraction rule table.
struct ExtractionRule {
    /// Stage in which this rule applies.
    stage: ConversationStage,
    /// Any of these tokens appearing in the lower-cased input matches.
    tokens: &'static [&'static str],
    category: MatchedCategory,
    transform: ValueTransform,
}

/// The rule table, in priority order. First match wins: an input carrying
/// tokens for two categories only satisfies the earlier rule.
const RULES: &[ExtractionRule] = &[
    ExtractionRule {
        stage: ConversationStage::Profiling,
        tokens: &["computer", "engineering"],
        category: MatchedCategory::FieldOfStudy,
        transform: ValueTransform::Label("Computer Science/Engineering"),
    },
    ExtractionRule {
        stage: ConversationStage::Profiling,
        tokens: &["bachelor", "master", "phd"],
        category: MatchedCategory::EducationLevel,
        transform: ValueTransform::RawInput,
    },
    ExtractionRule {
        stage: ConversationStage::Profiling,
        tokens: &["canada", "usa", "india"],
        category: MatchedCategory::Citizenship,
        transform: ValueTransform::RawInput,
    },
    ExtractionRule {
        stage: ConversationStage::Profiling,
        tokens: &["toronto", "ottawa", "vancouver"],
        category: MatchedCategory::Location,
        transform: ValueTransform::RawInput,
    },
];

/// Apply the rule table to one user input.
///
/// Returns the matched category, or `None` if no rule applied (the profile
/// is left untouched in that case). A match only ever sets or overwrites
/// its target field — nothing is cleared, so the profile stays
/// monotonically non-decreasing in fields known.
pub fn extract(
    stage: ConversationStage,
    user_text: &str,
    profile: &mut UserProfile,
) -> Option<MatchedCategory> {
    let lowered = user_text.to_lowercase();

    for rule in RULES {
        if rule.stage != stage {
            continue;
        }
        if !rule.tokens.iter().any(|token| lowered.contains(token)) {
            continue;
        }

        let value = match rule.transform {
            ValueTransform::Label(label) => label.to_string(),
            ValueTransform::RawInput => user_text.to_string(),
        };
        match rule.category {
            MatchedCategory::FieldOfStudy => profile.field_of_study = Some(value),
            MatchedCategory::EducationLevel => profile.education_level = Some(value),
            MatchedCategory::Citizenship => profile.citizenship = Some(value),
            MatchedCategory::Location => profile.location = Some(value),
        }
        tracing::debug!(category = %rule.category, "Profile field extracted");
        return Some(rule.category);
    }

    None
}

//! User profile built incrementally from free-text input.

use serde::{Deserialize, Serialize};

/// Partially-filled facts about the user, accumulated during profiling.
///
/// Every field starts unset. The extractor only ever sets or overwrites a
/// field; nothing clears one, so the set of known fields grows
/// monotonically within a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citizenship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_need: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extracurriculars: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub research_interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_goals: Option<String>,
}

impl UserProfile {
    /// The fields that count toward profiling progress.
    fn required_fields(&self) -> [&Option<String>; 4] {
        [
            &self.field_of_study,
            &self.education_level,
            &self.location,
            &self.citizenship,
        ]
    }

    /// How many of the four required fields are known.
    pub fn completed_required_fields(&self) -> usize {
        self.required_fields()
            .iter()
            .filter(|f| f.is_some())
            .count()
    }

    /// Profiling progress in [0, 100].
    ///
    /// Derived, never stored: `100 * known required fields / 4`, so the
    /// result is always an exact multiple of 25.
    pub fn progress_percent(&self) -> u8 {
        (self.completed_required_fields() * 100 / 4) as u8
    }
}

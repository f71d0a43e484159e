//! Scripted agent replies for the profiling flow.

use crate::extractor::MatchedCategory;

/// The fixed welcome message seeding every new session.
pub const WELCOME: &str = "🎓 Welcome to your AI-Powered Scholarship Agent! I'm here to help you \
find personalized scholarships and guide you through the application process. Let's start by \
getting to know you better - what field are you studying or planning to study?";

/// Generic fallback when no rule matched or the conversation is past the
/// scripted flow.
pub const FALLBACK: &str = "I'm here to help! Feel free to ask me anything about scholarships \
or the application process.";

/// Fixed apology shown when reply synthesis fails.
pub const APOLOGY: &str = "I apologize, but I encountered an error. Please try again.";

/// The follow-up prompt sent after a successful extraction.
///
/// Each matched category acknowledges what was captured and asks for the
/// next required field; the location prompt acknowledges that the search
/// is starting instead.
pub fn follow_up(category: MatchedCategory) -> &'static str {
    match category {
        MatchedCategory::FieldOfStudy => {
            "Great! Computer Science and Engineering have excellent scholarship opportunities. \
             What level of education are you pursuing? (Bachelor's, Master's, PhD)"
        }
        MatchedCategory::EducationLevel => {
            "Perfect! Now, what is your citizenship/nationality? This is crucial as scholarships \
             have specific eligibility requirements based on citizenship."
        }
        MatchedCategory::Citizenship => {
            "Thank you! Where are you planning to study or currently studying? (City, Country)"
        }
        MatchedCategory::Location => {
            "Excellent! I have enough information to start searching. Let me find relevant \
             scholarships for you..."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_introduces_and_asks_field_of_study() {
        assert!(WELCOME.contains("Scholarship Agent"));
        assert!(WELCOME.contains("what field are you studying"));
    }

    #[test]
    fn follow_up_asks_for_the_next_field() {
        assert!(follow_up(MatchedCategory::FieldOfStudy).contains("level of education"));
        assert!(follow_up(MatchedCategory::EducationLevel).contains("citizenship"));
        assert!(follow_up(MatchedCategory::Citizenship).contains("Where are you planning to study"));
        assert!(follow_up(MatchedCategory::Location).contains("start searching"));
    }

    #[test]
    fn apology_and_fallback_are_distinct() {
        assert_ne!(APOLOGY, FALLBACK);
        assert!(APOLOGY.contains("apologize"));
    }
}

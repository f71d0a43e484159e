//! Static scholarship fixture data and the recommendation block renderer.
//!
//! The entries here are a fixed fixture table, not live search results.

use crate::error::ReplyError;
use crate::profile::UserProfile;

/// A single scholarship entry in the fixture table.
#[derive(Debug, Clone, Copy)]
pub struct Scholarship {
    pub name: &'static str,
    pub amount: &'static str,
    pub deadline: &'static str,
    pub eligibility: &'static str,
    pub source: &'static str,
}

/// The recommendation set: always exactly three entries.
pub const SCHOLARSHIPS: [Scholarship; 3] = [
    Scholarship {
        name: "Tech Excellence Scholarship",
        amount: "$5,000",
        deadline: "March 15, 2024",
        eligibility: "For Computer Science students",
        source: "techscholarships.org",
    },
    Scholarship {
        name: "International Student Merit Award",
        amount: "$10,000",
        deadline: "April 30, 2024",
        eligibility: "Open to international students in STEM",
        source: "university-scholarships.ca",
    },
    Scholarship {
        name: "Future Leaders Grant",
        amount: "$7,500",
        deadline: "May 15, 2024",
        eligibility: "For graduate students in technology",
        source: "futureleaders.edu",
    },
];

/// Render the recommendation block: citizenship heading, the three
/// scholarship entries, a fixed next-steps checklist, and a closing
/// question offering application support.
///
/// Requires `citizenship` on the profile — the heading names it.
pub fn render_recommendations(profile: &UserProfile) -> Result<String, ReplyError> {
    let citizenship = profile
        .citizenship
        .as_deref()
        .ok_or(ReplyError::MissingProfileField("citizenship"))?;

    let mut out = String::from(
        "Based on your profile, I found several excellent scholarship opportunities:\n\n",
    );
    out.push_str(&format!("**🎯 Scholarships for {citizenship} Citizens**\n\n"));

    for (i, s) in SCHOLARSHIPS.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}** - {}\n   - Deadline: {}\n   - {}\n   - [Source: {}]\n\n",
            i + 1,
            s.name,
            s.amount,
            s.deadline,
            s.eligibility,
            s.source,
        ));
    }

    out.push_str(
        "**📋 Next Steps:**\n\
         - Verify eligibility on official websites\n\
         - Prepare transcripts and recommendation letters\n\
         - Start working on personal statements\n\n\
         Would you like me to provide detailed application support for any of these scholarships?",
    );

    Ok(out)
}

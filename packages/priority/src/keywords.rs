//! Description keyword groups.
//!
//! Each group adds its points at most once, however many of its keywords
//! appear. Keywords are lowercase and matched as substrings of the
//! lowercased description, so stems like `"injur"` cover `"injured"` and
//! `"injuries"`.

use serde::Serialize;

/// A named set of keywords worth a fixed number of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordGroup {
    /// Stable identifier, reported in score breakdowns.
    pub name: &'static str,
    /// Points added when any keyword matches.
    pub points: u8,
    /// Lowercase substrings to look for.
    pub keywords: &'static [&'static str],
}

impl KeywordGroup {
    /// Returns `true` if any keyword occurs in `lowercase_text`.
    #[must_use]
    pub fn matches(&self, lowercase_text: &str) -> bool {
        contains_any(lowercase_text, self.keywords)
    }
}

/// Weapons or physical harm.
pub const WEAPON_OR_INJURY: KeywordGroup = KeywordGroup {
    name: "weapon_or_injury",
    points: 7,
    keywords: &[
        "gun",
        "firearm",
        "pistol",
        "rifle",
        "shooting",
        "shots fired",
        "knife",
        "stab",
        "weapon",
        "blood",
        "bleeding",
        "injur",
        "wound",
        "hurt",
    ],
};

/// Threats or a frightened complainant.
pub const THREAT_OR_FEAR: KeywordGroup = KeywordGroup {
    name: "threat_or_fear",
    points: 5,
    keywords: &[
        "threat",
        "afraid",
        "scared",
        "fear",
        "terrified",
        "intimidat",
        "stalk",
    ],
};

/// A vulnerable victim is involved.
pub const VULNERABLE_VICTIM: KeywordGroup = KeywordGroup {
    name: "vulnerable_victim",
    points: 5,
    keywords: &[
        "child",
        "elderly",
        "disabled",
        "pregnant",
        "toddler",
        "infant",
        "senior citizen",
    ],
};

/// The incident is still happening.
pub const IN_PROGRESS: KeywordGroup = KeywordGroup {
    name: "in_progress",
    points: 10,
    keywords: &[
        "in progress",
        "happening now",
        "right now",
        "ongoing",
        "still on scene",
        "still here",
    ],
};

/// All keyword groups, in the order they are evaluated.
pub const KEYWORD_GROUPS: &[KeywordGroup] = &[
    WEAPON_OR_INJURY,
    THREAT_OR_FEAR,
    VULNERABLE_VICTIM,
    IN_PROGRESS,
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

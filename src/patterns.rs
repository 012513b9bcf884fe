//! Built-in analysis patterns and writing-assistant prompts.
//!
//! A pattern is a persona prompt sent together with a Telos document.
//! Patterns are grouped into categories for display; the order of
//! [`CATEGORIES`] is the order used by `analyze --all`.

use crate::error::{Error, Result};
use crate::validate::{find_similar, normalize_key, resolve_name, ASSIST_SYNONYMS};
use std::collections::HashMap;
use std::fmt;

/// A named persona prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub category: &'static str,
    pub prompt: &'static str,
}

impl Pattern {
    /// Display title, e.g. `red_team` → `Red Team`.
    #[must_use]
    pub fn title(&self) -> String {
        title(self.name)
    }
}

/// A display group of patterns.
#[derive(Debug)]
pub struct Category {
    pub name: &'static str,
    pub icon: &'static str,
    pub patterns: &'static [Pattern],
}

const CORE: &str = "Core Analysis";
const CRITICAL: &str = "Critical Analysis";
const STRATEGIC: &str = "Strategic Coaching";
const PSYCHOLOGICAL: &str = "Psychological Depth";
const PRACTICAL: &str = "Creative & Practical";
const PHILOSOPHICAL: &str = "Philosophical";

pub static CATEGORIES: &[Category] = &[
    Category {
        name: CORE,
        icon: "🎯",
        patterns: &[Pattern {
            name: "summarize",
            category: CORE,
            prompt: "You are an expert synthesizer. Read the provided user context (Telos file) \
                     and provide a concise executive summary of their current life status, \
                     mission, and immediate goals.",
        }],
    },
    Category {
        name: CRITICAL,
        icon: "🔥",
        patterns: &[
            Pattern {
                name: "red_team",
                category: CRITICAL,
                prompt: "You are an expert security researcher and life coach. Your goal is to 'Red Team' \
                         the user's life strategy. Look at the provided context (Telos file). \
                         Ruthlessly identify vulnerabilities, contradictions, weak goals, and blind spots. \
                         Be direct, critical, and constructive. Tell them where they are lying to themselves.",
            },
            Pattern {
                name: "find_blind_spots",
                category: CRITICAL,
                prompt: "Analyze the provided Telos file for cognitive dissonance and blind spots. \
                         Look for areas where the user's stated goals do not match their reported behaviors \
                         or challenges. Highlight 3 major blind spots they are ignoring.",
            },
            Pattern {
                name: "death_bed_test",
                category: CRITICAL,
                prompt: "You are a memento mori philosopher. Imagine the user is on their deathbed at age 90, \
                         looking back at their life. Based on their current Telos, what will they regret NOT doing? \
                         What opportunities did they waste? What fears held them back from their true potential? \
                         Be brutally honest but compassionate. This is their wake-up call.",
            },
            Pattern {
                name: "future_self",
                category: CRITICAL,
                prompt: "You are the user's future self from 10 years in the future. You've achieved everything they dream of. \
                         Write them a letter explaining: 1) What they need to START doing immediately, \
                         2) What they need to STOP doing that's holding them back, \
                         3) The ONE decision that changed everything. Be specific and personal.",
            },
        ],
    },
    Category {
        name: STRATEGIC,
        icon: "💼",
        patterns: &[
            Pattern {
                name: "career_coach",
                category: STRATEGIC,
                prompt: "You are a world-class career strategist. Based on the user's history, \
                         skills, and mission in the Telos file, suggest 3 concrete, high-impact \
                         projects they should start immediately to advance their specific mission.",
            },
            Pattern {
                name: "stoic_mentor",
                category: STRATEGIC,
                prompt: "You are Marcus Aurelius, the Stoic philosopher-emperor. Analyze the user's Telos through \
                         the lens of Stoic philosophy. What is within their control vs outside their control? \
                         Where are they wasting energy on externals? What virtues should they cultivate? \
                         Provide 3 Stoic practices they should adopt immediately. Write in a wise, measured tone.",
            },
            Pattern {
                name: "contrarian",
                category: STRATEGIC,
                prompt: "You are a contrarian thinker who questions conventional wisdom. Look at the user's goals \
                         and ask: Are these REALLY their goals, or society's goals? Are they optimizing for the wrong things? \
                         Challenge their assumptions. Suggest 3 unconventional paths they haven't considered. \
                         Be provocative but insightful.",
            },
            Pattern {
                name: "systems_thinker",
                category: STRATEGIC,
                prompt: "You are a systems design expert. Analyze the user's life as an interconnected system. \
                         Identify: 1) Leverage points - small changes with big impact, \
                         2) Feedback loops - what behaviors reinforce or undermine their goals, \
                         3) Bottlenecks - what's the ONE constraint limiting their progress? \
                         Provide a systems-level intervention strategy.",
            },
        ],
    },
    Category {
        name: PSYCHOLOGICAL,
        icon: "🧠",
        patterns: &[
            Pattern {
                name: "therapist",
                category: PSYCHOLOGICAL,
                prompt: "You are a compassionate but firm therapist. Read the journal entries and \
                         insecurities in the Telos file. Identify the emotional blockers holding the user back \
                         and provide a psychological reframe to help them move forward.",
            },
            Pattern {
                name: "shadow_work",
                category: PSYCHOLOGICAL,
                prompt: "You are a Jungian psychologist specializing in shadow work. Analyze the user's Telos for: \
                         1) Repressed desires they're not admitting, 2) Projections - what they criticize in others that they deny in themselves, \
                         3) The 'golden shadow' - positive traits they're not owning. \
                         Help them integrate their shadow for wholeness. Be deep and psychological.",
            },
            Pattern {
                name: "inner_child",
                category: PSYCHOLOGICAL,
                prompt: "You are a trauma-informed therapist. Look at the user's goals and challenges through the lens of their inner child. \
                         What childhood wounds are driving their current behaviors? What does their inner child need to hear? \
                         What patterns are they repeating from their past? Provide a healing message and 3 reparenting practices.",
            },
            Pattern {
                name: "imposter_syndrome",
                category: PSYCHOLOGICAL,
                prompt: "You are an expert in imposter syndrome and self-worth. Analyze where the user is playing small, \
                         self-sabotaging, or not claiming their achievements. Identify: 1) Evidence they're more capable than they believe, \
                         2) The origin story of their self-doubt, 3) A new identity narrative they should adopt. \
                         Be empowering and evidence-based.",
            },
        ],
    },
    Category {
        name: PRACTICAL,
        icon: "⚡",
        patterns: &[
            Pattern {
                name: "elevator_pitch",
                category: PRACTICAL,
                prompt: "Based on the 'Mission' and 'Narrative' sections, create three variations \
                         of an elevator pitch: 1) A 10-second casual version, 2) A 30-second professional version, \
                         and 3) A Twitter/X bio version.",
            },
            Pattern {
                name: "energy_audit",
                category: PRACTICAL,
                prompt: "You are an energy management consultant. Analyze the user's Telos and identify: \
                         1) Energy vampires - activities/people draining them, \
                         2) Energy amplifiers - what gives them life, \
                         3) Misallocated energy - where they're spending energy that doesn't align with their mission. \
                         Provide a weekly energy reallocation plan.",
            },
            Pattern {
                name: "time_billionaire",
                category: PRACTICAL,
                prompt: "You are a time management philosopher. If the user had unlimited money but the same 24 hours, \
                         how would they spend their time? Compare that to their current schedule. \
                         What does the gap reveal about their priorities? Provide a 'time billionaire' weekly schedule \
                         that aligns with their true values.",
            },
            Pattern {
                name: "accountability_partner",
                category: PRACTICAL,
                prompt: "You are a no-BS accountability coach. Based on their Telos, create: \
                         1) 3 specific, measurable commitments for the next 30 days, \
                         2) The consequences if they don't follow through (what they'll lose), \
                         3) A weekly check-in protocol. Be direct and action-oriented.",
            },
        ],
    },
    Category {
        name: PHILOSOPHICAL,
        icon: "🏛️",
        patterns: &[
            Pattern {
                name: "meaning_maker",
                category: PHILOSOPHICAL,
                prompt: "You are Viktor Frankl, author of Man's Search for Meaning. Analyze the user's Telos through \
                         the lens of logotherapy. What is their unique meaning and purpose? \
                         Where are they experiencing existential vacuum? How can they find meaning even in their struggles? \
                         Provide 3 meaning-centered practices.",
            },
            Pattern {
                name: "memento_mori",
                category: PHILOSOPHICAL,
                prompt: "You are a death meditation guide. Remind the user that they will die, and no one knows when. \
                         Given their mortality, what becomes urgent? What becomes trivial? \
                         What would they do differently if they knew they had 1 year left? \
                         Provide a 'death-aware' life strategy. Be sobering but motivating.",
            },
        ],
    },
];

/// Categories in display order.
#[must_use]
pub fn categories() -> &'static [Category] {
    CATEGORIES
}

/// All patterns in category order.
pub fn all() -> impl Iterator<Item = &'static Pattern> {
    CATEGORIES.iter().flat_map(|c| c.patterns.iter())
}

/// Number of built-in patterns.
#[must_use]
pub fn count() -> usize {
    CATEGORIES.iter().map(|c| c.patterns.len()).sum()
}

/// Look up a pattern by name or title (`red_team`, `Red Team`, `red-team`).
pub fn find(name: &str) -> Result<&'static Pattern> {
    let key = normalize_key(name);
    all().find(|p| p.name == key).ok_or_else(|| Error::PatternNotFound {
        name: name.to_string(),
        similar: suggest(&key),
    })
}

/// Pattern names close to `name`, for did-you-mean hints.
#[must_use]
pub fn suggest(name: &str) -> Vec<String> {
    let names: Vec<String> = all().map(|p| p.name.to_string()).collect();
    find_similar(&normalize_key(name), &names, 3)
}

/// Category a pattern directory belongs to, if it is a built-in pattern.
#[must_use]
pub fn category_of(name: &str) -> Option<&'static Category> {
    CATEGORIES
        .iter()
        .find(|c| c.patterns.iter().any(|p| p.name == name))
}

/// Convert a snake-case key to a title: `death_bed_test` → `Death Bed Test`.
#[must_use]
pub fn title(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// ── Writing assistant ────────────────────────────────────────

/// Kinds of help the writing assistant offers while drafting a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistKind {
    /// Refine the mission statement
    Mission,
    /// Draft SMART goals
    Goals,
    /// Surface hidden challenges
    Challenges,
    /// Discover overlooked strengths
    Strengths,
    /// Questions to expand and deepen the draft
    #[default]
    Expand,
    /// Clarity, alignment and actionability feedback
    Improve,
    /// What works, what's missing, how to connect sections
    AnalyzeExpand,
    /// Map Problems → Mission → Goals → Challenges
    Connect,
}

impl AssistKind {
    pub const ALL: [Self; 8] = [
        Self::Mission,
        Self::Goals,
        Self::Challenges,
        Self::Strengths,
        Self::Expand,
        Self::Improve,
        Self::AnalyzeExpand,
        Self::Connect,
    ];

    /// Canonical snake-case key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Mission => "mission",
            Self::Goals => "goals",
            Self::Challenges => "challenges",
            Self::Strengths => "strengths",
            Self::Expand => "expand",
            Self::Improve => "improve",
            Self::AnalyzeExpand => "analyze_expand",
            Self::Connect => "connect",
        }
    }

    /// Parse from a loose spelling or synonym ("smart" → `Goals`).
    pub fn parse(input: &str) -> Result<Self> {
        let keys: Vec<&'static str> = Self::ALL.iter().map(|k| k.key()).collect();
        let synonyms: &HashMap<&str, &str> = &ASSIST_SYNONYMS;
        match resolve_name(input, &keys, synonyms) {
            Ok(key) => Ok(Self::ALL
                .into_iter()
                .find(|k| k.key() == key)
                .unwrap_or_default()),
            Err(similar) => Err(Error::InvalidArgument(if similar.is_empty() {
                format!("unknown assistant kind '{input}'")
            } else {
                format!("unknown assistant kind '{input}' (did you mean: {}?)", similar.join(", "))
            })),
        }
    }

    /// Fixed system prompt for this kind.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::Mission => {
                "You are a life purpose coach. Based on the user's current Telos draft, \
                 help them articulate their core mission and purpose. Ask probing questions \
                 or provide 3-5 concrete mission statement examples that align with what they've written. \
                 Be inspiring but grounded."
            }
            Self::Goals => {
                "You are a goal-setting expert. Review the user's Telos and help them create \
                 SMART goals (Specific, Measurable, Achievable, Relevant, Time-bound). \
                 Suggest 3-5 concrete short-term and long-term goals based on their mission and current status."
            }
            Self::Challenges => {
                "You are a strategic problem-solver. Based on the user's Telos, help them identify \
                 and articulate their key challenges and obstacles. Ask clarifying questions or \
                 suggest common challenges they might be facing but haven't named yet."
            }
            Self::Strengths => {
                "You are a strengths-based coach. Help the user identify and articulate their \
                 key strengths, skills, and resources. Based on their Telos, suggest strengths \
                 they might be overlooking or undervaluing."
            }
            Self::Expand => {
                "You are a thoughtful writing coach. The user is working on their Telos. \
                 Provide 3-5 thought-provoking questions or prompts to help them expand and deepen \
                 what they've written. Be specific to their content."
            }
            Self::Improve => {
                "You are an editor and life coach. Review the user's Telos draft and provide \
                 constructive feedback on: 1) Clarity - is it clear and specific? \
                 2) Alignment - do the sections support each other? \
                 3) Actionability - are there concrete next steps? \
                 Provide 3-5 specific suggestions for improvement."
            }
            Self::AnalyzeExpand => {
                "You are a Telos expert. Analyze the user's current Telos document and provide: \
                 1) What's working well (2-3 strengths), \
                 2) What's missing or underdeveloped (2-3 gaps), \
                 3) Specific suggestions to expand and deepen each section, \
                 4) How to better connect Problems → Mission → Goals → Challenges. \
                 Be specific and actionable. Reference their actual content."
            }
            Self::Connect => {
                "You are a systems thinker. Analyze how the user's Problems, Mission, Goals, and Challenges \
                 connect to each other. Show the logical flow: which goals address which problems? \
                 Which challenges block which goals? Are there gaps in the chain? \
                 Provide a clear map of connections and suggest missing links."
            }
        }
    }
}

impl fmt::Display for AssistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&title(self.key()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_shape() {
        assert_eq!(CATEGORIES.len(), 6);
        assert_eq!(count(), 20);
        assert_eq!(all().next().map(|p| p.name), Some("summarize"));
        assert_eq!(all().last().map(|p| p.name), Some("memento_mori"));
    }

    #[test]
    fn test_names_unique_and_categorized() {
        let names: HashSet<&str> = all().map(|p| p.name).collect();
        assert_eq!(names.len(), count());
        for category in CATEGORIES {
            for pattern in category.patterns {
                assert_eq!(pattern.category, category.name);
                assert!(!pattern.prompt.is_empty());
            }
        }
    }

    #[test]
    fn test_find_accepts_title_form() {
        assert_eq!(find("Red Team").unwrap().name, "red_team");
        assert_eq!(find("find-blind-spots").unwrap().name, "find_blind_spots");
        assert_eq!(find("summarize").unwrap().category, "Core Analysis");
    }

    #[test]
    fn test_find_unknown_suggests() {
        match find("stoic_mentr") {
            Err(Error::PatternNotFound { similar, .. }) => {
                assert_eq!(similar.first().map(String::as_str), Some("stoic_mentor"));
            }
            other => panic!("expected PatternNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_title() {
        assert_eq!(title("death_bed_test"), "Death Bed Test");
        assert_eq!(title("summarize"), "Summarize");
        assert_eq!(find("red_team").unwrap().title(), "Red Team");
    }

    #[test]
    fn test_category_of() {
        assert_eq!(category_of("therapist").map(|c| c.name), Some("Psychological Depth"));
        assert!(category_of("not_a_pattern").is_none());
    }

    #[test]
    fn test_assist_kind_parse() {
        assert_eq!(AssistKind::parse("goals").unwrap(), AssistKind::Goals);
        assert_eq!(AssistKind::parse("Analyze Expand").unwrap(), AssistKind::AnalyzeExpand);
        assert_eq!(AssistKind::parse("smart").unwrap(), AssistKind::Goals);
        assert!(AssistKind::parse("zzzzzz").is_err());
        assert_eq!(AssistKind::default(), AssistKind::Expand);
    }
}

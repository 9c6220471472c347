//! Deterministic fallback paths, used when Gemini is unreachable or its
//! answer can't be parsed.
//!
//! `fallback_paths` picks one of three fixed sets with an ordered keyword
//! rule list: the first rule whose keywords appear in the lower-cased query
//! wins, so a query mentioning both "code" and "data" is a code query.

use super::types::ThinkingPath;

/// Topic a query was classified into by the keyword rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTopic {
    Code,
    Analysis,
    General,
}

/// Keyword rules, checked in order.
const TOPIC_RULES: &[(QueryTopic, &[&str])] = &[
    (QueryTopic::Code, &["code", "program", "function"]),
    (QueryTopic::Analysis, &["analyz", "data", "research"]),
];

/// Classify a query by substring match against `TOPIC_RULES`.
pub fn classify_query(query: &str) -> QueryTopic {
    let lower = query.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(topic, _)| *topic)
        .unwrap_or(QueryTopic::General)
}

/// Four keyword-selected paths for a fresh query.
pub fn fallback_paths(query: &str) -> Vec<ThinkingPath> {
    match classify_query(query) {
        QueryTopic::Code => vec![
            ThinkingPath::new(
                "Step by Step",
                ["Break down requirements", "Design the algorithm", "Implement and test"],
            ),
            ThinkingPath::new(
                "Best Practices",
                [
                    "Research existing solutions",
                    "Apply design patterns",
                    "Optimize for performance",
                ],
            ),
            ThinkingPath::new(
                "Quick Prototype",
                ["Create minimal version", "Test core functionality", "Iterate and improve"],
            ),
            ThinkingPath::new(
                "Comprehensive",
                ["Plan architecture", "Implement with documentation", "Add error handling"],
            ),
        ],
        QueryTopic::Analysis => vec![
            ThinkingPath::new(
                "Data Driven",
                ["Gather relevant data", "Analyze patterns", "Draw conclusions"],
            ),
            ThinkingPath::new(
                "Comparative",
                ["Identify alternatives", "Compare pros and cons", "Recommend best option"],
            ),
            ThinkingPath::new(
                "Root Cause",
                ["Identify the problem", "Trace underlying causes", "Propose solutions"],
            ),
            ThinkingPath::new(
                "Strategic",
                ["Define objectives", "Evaluate resources", "Create action plan"],
            ),
        ],
        QueryTopic::General => vec![
            ThinkingPath::new(
                "Analytical",
                ["Break down the question", "Examine each component", "Synthesize insights"],
            ),
            ThinkingPath::new(
                "Creative",
                [
                    "Brainstorm possibilities",
                    "Explore unconventional ideas",
                    "Refine the best concepts",
                ],
            ),
            ThinkingPath::new(
                "Practical",
                [
                    "Focus on implementation",
                    "Consider real constraints",
                    "Provide actionable steps",
                ],
            ),
            ThinkingPath::new(
                "Comprehensive",
                [
                    "Research thoroughly",
                    "Consider multiple perspectives",
                    "Provide detailed analysis",
                ],
            ),
        ],
    }
}

/// Four follow-up paths after a partial execution.
///
/// The arguments are accepted for API symmetry with the model-backed
/// continuation but do not influence the result.
pub fn continuation_paths(
    _last_path_name: &str,
    _last_steps_executed: usize,
) -> Vec<ThinkingPath> {
    vec![
        ThinkingPath::new(
            "Continue Deep",
            [
                "Build on current insights",
                "Explore specific implications",
                "Develop concrete recommendations",
            ],
        ),
        ThinkingPath::new(
            "New Angle",
            [
                "Approach from different perspective",
                "Challenge current assumptions",
                "Synthesize alternative view",
            ],
        ),
        ThinkingPath::new(
            "Apply Practical",
            ["Focus on implementation", "Address real-world constraints", "Create actionable plan"],
        ),
        ThinkingPath::new(
            "Expand Context",
            ["Broaden the scope", "Connect to related domains", "Explore wider implications"],
        ),
    ]
}

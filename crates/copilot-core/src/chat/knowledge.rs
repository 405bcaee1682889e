//! Canned answers for common sidebar questions.
//!
//! A question matching one of these entries (case-insensitive, surrounding
//! whitespace ignored) is answered locally instead of calling the model.

/// Question/answer pairs, in the order they are offered as suggestions.
pub const KNOWLEDGE_BASE: &[(&str, &str)] = &[
    (
        "What is an innovation challenge?",
        "An innovation challenge is a competition where participants solve specific problems or create new ideas.",
    ),
    (
        "How do I define a challenge?",
        "You can define a challenge by specifying its title, problem statement, goals, and type.",
    ),
    (
        "What are the types of challenges?",
        "Common types include Ideation, Development, Data Science, and AI challenges.",
    ),
    (
        "How can I set the audience for my challenge?",
        "You can set the audience by specifying whether it's open to the public or invite-only, and defining allowed geographies and languages.",
    ),
];

/// Look up a canned answer for `question`.
pub fn lookup(question: &str) -> Option<&'static str> {
    let question = question.trim();
    KNOWLEDGE_BASE
        .iter()
        .find(|(q, _)| q.eq_ignore_ascii_case(question))
        .map(|(_, answer)| *answer)
}

/// The questions with canned answers, for display as suggestions.
pub fn suggested_questions() -> impl Iterator<Item = &'static str> {
    KNOWLEDGE_BASE.iter().map(|(q, _)| *q)
}

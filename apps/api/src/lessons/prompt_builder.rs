//! Builds the lesson prompt from a topic and a student profile.
//!
//! Pure and deterministic: the same inputs always produce the same prompt.
//! Empty profile fields never fail; they only make the prompt less specific.

use crate::lessons::prompts::{FORMATTING_RULES, NOT_SPECIFIED, REQUIRED_SECTIONS, ROLE_FRAMING};
use crate::models::student::Profile;

pub fn build_prompt(topic: &str, profile: &Profile) -> String {
    let mut prompt = String::new();

    prompt.push_str(ROLE_FRAMING);
    prompt.push_str("\n\n");

    prompt.push_str(&format!(
        "Create a 10-minute mini-lesson on the topic: \"{topic}\".\n\n"
    ));

    prompt.push_str("Tailor the lesson to a student with the following needs:\n");
    prompt.push_str(&accommodation_summary(profile));
    prompt.push('\n');

    prompt.push_str("The lesson MUST contain these sections, in this order:\n");
    for (i, (label, description)) in REQUIRED_SECTIONS.iter().enumerate() {
        prompt.push_str(&format!("{}. {} {}\n", i + 1, label, description));
    }
    prompt.push('\n');

    prompt.push_str(FORMATTING_RULES);
    prompt.push('\n');

    prompt
}

fn accommodation_summary(profile: &Profile) -> String {
    format!(
        "- Learning Style: {}\n- Known Barriers: {}\n- Interests: {}\n",
        or_not_specified(&profile.learning_style),
        or_not_specified(&profile.barriers),
        or_not_specified(&profile.interests),
    )
}

fn or_not_specified(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

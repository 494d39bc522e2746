// Fixed prompt fragments for lesson generation.

/// Role framing that opens every lesson prompt.
pub const ROLE_FRAMING: &str = "You are an AI-powered inclusive education specialist \
    who designs short, accessible lessons for neurodiverse learners.";

/// Placeholder used when a profile attribute was left empty.
pub const NOT_SPECIFIED: &str = "not specified";

/// Sections every lesson must contain, in order, with what each must cover.
/// The label text is also what the document exporter recognizes as a header.
pub const REQUIRED_SECTIONS: [(&str, &str); 5] = [
    ("Objective:", "one clear, simplified learning goal."),
    (
        "Concept Breakdown:",
        "the core idea explained in small steps, using analogies and visual descriptions where they help.",
    ),
    (
        "Activity:",
        "a short interactive activity or analogy that checks understanding and connects to the student's interests.",
    ),
    (
        "Inclusivity Considerations:",
        "suggested scaffolding and differentiation for this student, such as a text-to-speech option or reduced steps.",
    ),
    ("Wrap Up:", "a brief recap and one reflection question."),
];

/// Formatting rules appended after the section list.
pub const FORMATTING_RULES: &str = r#"Formatting rules:
- Start each section with its heading in bold, using the exact label text above (for example **Objective:**).
- Use a hyphen followed by a space ("- ") for every bullet point.
- Never use the "•" character.
- Keep sentences short and plain. Do not use tables."#;

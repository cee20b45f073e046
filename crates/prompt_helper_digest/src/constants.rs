/// Notes appended verbatim to the instructions section
pub const NOTES_FILE: &str = "promptHelper/notes.md";

/// Default style guide location
pub const STYLE_FILE: &str = "promptHelper/style.md";

/// Directories never descended into by the source collector
pub const SKIP_DIRS: &[&str] = &["node_modules", ".git"];

/// Separator between instruction sections
pub const SECTION: &str = "\n---\n";

pub const INSTRUCTIONS: &[&str] = &[
    "Please give the full updated code for any files that were changed in a Markdown code block.",
    "If you need additional context, code, or information, please ask before proceeding.",
    "Provide a summary of any issues found.",
    "Suggest improvements with code examples if possible.",
];

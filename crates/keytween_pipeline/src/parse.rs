//! Numbered prompt list parsing.

use keytween_core::Prompt;

/// Extracts prompts from a numbered, one-per-line completion.
///
/// The text is trimmed, blank lines are skipped, and everything up to and
/// including the first `.` on a line is dropped as its label. Lines with no
/// `.` are kept whole. Lines that end up empty are discarded.
///
/// # Examples
///
/// ```
/// use keytween_pipeline::parse_prompt_list;
///
/// let prompts = parse_prompt_list("1. A cat\n2. A dog");
/// let texts: Vec<&str> = prompts.iter().map(|p| p.as_str()).collect();
/// assert_eq!(texts, ["A cat", "A dog"]);
/// ```
pub fn parse_prompt_list(text: &str) -> Vec<Prompt> {
    text.trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once('.') {
            Some((_, rest)) => rest.trim(),
            None => line,
        })
        .filter(|prompt| !prompt.is_empty())
        .map(Prompt::from)
        .collect()
}

//! Turning free-form model output into explanation bullets

/// Lines this short or shorter are treated as noise (headings, blank bullets).
pub const MIN_EXPLANATION_LINE_CHARS: usize = 20;

pub struct ResponseParser;

impl ResponseParser {
    /// Split `text` on newlines, drop lines of [`MIN_EXPLANATION_LINE_CHARS`]
    /// characters or fewer, and keep at most `max_lines` of the rest.
    ///
    /// Lines are returned as the model wrote them; bullet markers are not stripped.
    pub fn explanation_lines(text: &str, max_lines: usize) -> Vec<String> {
        text.split('\n')
            .filter(|line| line.chars().count() > MIN_EXPLANATION_LINE_CHARS)
            .take(max_lines)
            .map(str::to_string)
            .collect()
    }
}

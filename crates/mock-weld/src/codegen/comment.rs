//! Doc comment wrapping

const MAX_WIDTH: usize = 80;
const INDENT: usize = 4;
const MAX_LEVELS: usize = 3;
const MIN_WIDTH: usize = MAX_WIDTH - INDENT * MAX_LEVELS;

/// Text width available to a comment at nesting `level`.
///
/// Top-level declarations are level 1, struct fields level 2.
pub fn allowance(level: usize) -> usize {
    MAX_WIDTH
        .saturating_sub(INDENT * level + 3)
        .max(MIN_WIDTH)
}

/// Greedy word wrap. A word longer than `width` gets a line of its own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap `text` for nesting `level`
pub fn wrap_for_level(text: &str, level: usize) -> Vec<String> {
    wrap(text, allowance(level))
}

//! Text helpers for change log rendering.

/// Word-wrap `text` so no line exceeds `width` characters.
///
/// Lines are broken at spaces; the space is replaced by `line_break`, which
/// may carry an indent for continuation lines. The indent does not count
/// towards the width of the following line. Words longer than `width` are
/// never split. Existing newlines start a fresh line.
#[must_use]
pub fn wrap(text: &str, width: usize, line_break: &str) -> String {
    text.split('\n').map(|line| wrap_line(line, width, line_break)).collect::<Vec<_>>().join("\n")
}

fn wrap_line(line: &str, width: usize, line_break: &str) -> String {
    let mut wrapped = String::with_capacity(line.len());
    let mut current = 0;

    for (i, word) in line.split(' ').enumerate() {
        let len = word.chars().count();
        if i == 0 {
            wrapped.push_str(word);
            current = len;
        } else if current + 1 + len > width {
            wrapped.push_str(line_break);
            wrapped.push_str(word);
            current = len;
        } else {
            wrapped.push(' ');
            wrapped.push_str(word);
            current += 1 + len;
        }
    }

    wrapped
}

//! Text measurement and word wrapping.
//!
//! Greedy line breaker over the built-in font metrics. Words longer than a
//! whole line are split at the character that overflows, so pathological
//! input can never push a line past the content width.

use crate::document::font::Font;

/// Replace anything a page-drawing primitive might not support with ASCII.
/// Currency glyphs never appear here (the document formatter is ASCII-only);
/// this catches traveler-supplied names and free-form tags.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .map(|ch| if (' '..='~').contains(&ch) || ch == '\n' { ch } else { '?' })
        .collect()
}

/// Break `text` into lines no wider than `max_width` points.
///
/// Explicit newlines are respected; runs of whitespace collapse to single
/// spaces. Returns at least one (possibly empty) line.
pub fn wrap(text: &str, font: Font, size: f64, max_width: f64) -> Vec<String> {
    let text = sanitize(text);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let words: Vec<&str> = paragraph.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        let space_width = font.char_width(' ', size);
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in words {
            let word_width = font.text_width(word, size);

            if current.is_empty() {
                if word_width <= max_width {
                    current.push_str(word);
                    current_width = word_width;
                } else {
                    // Oversized word: hard-split
                    let (head, rest) = split_oversized(word, font, size, max_width);
                    lines.push(head);
                    let mut rest = rest;
                    while !rest.is_empty() {
                        let (head, tail) = split_oversized(&rest, font, size, max_width);
                        if tail.is_empty() {
                            current_width = font.text_width(&head, size);
                            current = head;
                            break;
                        }
                        lines.push(head);
                        rest = tail;
                    }
                }
                continue;
            }

            if current_width + space_width + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space_width + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                if word_width <= max_width {
                    current_width = word_width;
                    current.push_str(word);
                } else {
                    let (head, rest) = split_oversized(word, font, size, max_width);
                    lines.push(head);
                    current_width = font.text_width(&rest, size);
                    current = rest;
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split a word that cannot fit on one line: longest fitting prefix, rest.
fn split_oversized(word: &str, font: Font, size: f64, max_width: f64) -> (String, String) {
    let mut head = String::new();
    let mut width = 0.0;
    let mut chars = word.chars();

    for ch in chars.by_ref() {
        let w = font.char_width(ch, size);
        if !head.is_empty() && width + w > max_width {
            let mut rest = String::new();
            rest.push(ch);
            rest.extend(chars);
            return (head, rest);
        }
        head.push(ch);
        width += w;
    }
    (head, String::new())
}

/// Truncate with a trailing ellipsis so the result fits in `max_width`.
pub fn truncate(text: &str, font: Font, size: f64, max_width: f64) -> String {
    let text = sanitize(text);
    if font.text_width(&text, size) <= max_width {
        return text;
    }
    let ellipsis = "...";
    let budget = max_width - font.text_width(ellipsis, size);
    let mut out = String::new();
    let mut width = 0.0;
    for ch in text.chars() {
        let w = font.char_width(ch, size);
        if width + w > budget {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push_str(ellipsis);
    out
}

/// Shortens tweet text to a single display line, respecting char boundaries.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut shortened = String::with_capacity(text.len().min(max_chars + 3));
    let mut chars = text.chars();

    for _ in 0..max_chars {
        match chars.next() {
            Some(c) if c.is_control() || c.is_whitespace() => shortened.push(' '),
            Some(c) => shortened.push(c),
            None => return shortened,
        }
    }

    if chars.next().is_some() {
        shortened.push_str("...");
    }
    shortened
}

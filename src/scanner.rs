//! Character-level helpers shared by the parser: separator scanning, input
//! normalization, and the small prefix/bracket utilities the leaf parsers use.

/// Quote and bracket state while walking a string left to right.
#[derive(Default)]
struct Nesting {
    in_quotes: bool,
    depth: usize,
    prev: Option<char>,
}

impl Nesting {
    fn advance(&mut self, ch: char) {
        match ch {
            '"' if self.prev != Some('\\') => self.in_quotes = !self.in_quotes,
            '(' if !self.in_quotes => self.depth += 1,
            ')' if !self.in_quotes => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        self.prev = Some(ch);
    }

    fn at_top_level(&self) -> bool {
        !self.in_quotes && self.depth == 0
    }
}

/// Byte index of the first space outside quotes and brackets, scanning from
/// `start`.
///
/// A `"` not preceded by a backslash toggles the quote state; brackets inside
/// quotes are plain text, and a stray `)` at depth zero is ignored.
/// Unterminated quotes or brackets simply run to the end of the input, so the
/// remainder becomes a single token. `None` means there is no split point.
///
/// ```
/// use gallery_query::scanner::find_top_level_separator;
///
/// assert_eq!(find_top_level_separator("cat dog", 0), Some(3));
/// assert_eq!(find_top_level_separator("(cat dog) fish", 0), Some(9));
/// assert_eq!(find_top_level_separator("\"cat dog\"", 0), None);
/// ```
pub fn find_top_level_separator(input: &str, start: usize) -> Option<usize> {
    let mut nesting = Nesting::default();
    for (offset, ch) in input.get(start..)?.char_indices() {
        if ch == ' ' && nesting.at_top_level() {
            return Some(start + offset);
        }
        nesting.advance(ch);
    }
    None
}

/// Canonical spacing: whitespace runs become one space, whitespace after `:`
/// is dropped, a `)` directly followed by another character gets a space after
/// it, and the ends are trimmed. The colon and bracket rules do not apply
/// inside quotes.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut nesting = Nesting::default();
    let mut pending_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if !out.is_empty() {
            let quoted = nesting.in_quotes;
            let after_colon = !quoted && out.ends_with(':');
            let after_closer = !quoted && out.ends_with(')');
            if (pending_space && !after_colon) || after_closer {
                out.push(' ');
            }
        }
        pending_space = false;
        nesting.advance(ch);
        out.push(ch);
    }
    out
}

/// Removes one pair of brackets when the opening bracket at the start closes
/// exactly at the end, e.g. `(a or b)` but not `(a) or (b)`.
pub fn strip_outer_brackets(input: &str) -> &str {
    if input.len() < 2 || !input.starts_with('(') || !input.ends_with(')') {
        return input;
    }
    let mut nesting = Nesting::default();
    for (idx, ch) in input.char_indices() {
        nesting.advance(ch);
        if ch == ')' && nesting.at_top_level() {
            return if idx == input.len() - 1 {
                &input[1..idx]
            } else {
                input
            };
        }
    }
    input
}

/// Deepest bracket nesting in `input` and the byte offset where it is reached.
pub(crate) fn max_bracket_depth(input: &str) -> (usize, usize) {
    let mut nesting = Nesting::default();
    let mut deepest = (0, 0);
    for (idx, ch) in input.char_indices() {
        nesting.advance(ch);
        if nesting.depth > deepest.0 {
            deepest = (nesting.depth, idx);
        }
    }
    deepest
}

/// Inner text when `text` is wrapped in `open`/`close`.
pub(crate) fn unwrap_pair(text: &str, open: char, close: char) -> Option<&str> {
    if text.len() >= 2 && text.starts_with(open) && text.ends_with(close) {
        Some(&text[open.len_utf8()..text.len() - close.len_utf8()])
    } else {
        None
    }
}

/// Matches `<digits>-<keyword>:` at the start of `token`, returning the (maybe
/// empty) digit run and the rest after the colon.
pub(crate) fn strip_numeric_prefix<'a>(token: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, rest) = token.split_at(digits_end);
    let rest = rest.strip_prefix('-')?.strip_prefix(keyword)?.strip_prefix(':')?;
    Some((digits, rest))
}

/// Lenient base-10 integer read: leading whitespace and a sign are accepted,
/// then the longest run of digits; trailing garbage is ignored. `None` when no
/// digit is present or the value does not fit in an `i64`.
pub(crate) fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

//! Tokenizer, normalizer, and renderer: the reversible text <-> token
//! stream boundary the rest of the pipeline operates on.

const CONTROL_PREFIX: char = '\u{1f}';

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn ws_class(c: char) -> Option<char> {
    match c {
        ' ' => Some(' '),
        '\n' => Some('\n'),
        '\t' => Some('\t'),
        _ => None,
    }
}

/// Single greedy pass: word runs (letters/digits, optionally chained by a
/// single `'`/`-` connector) take priority, then maximal whitespace runs of
/// one class, then maximal runs of everything else. The control-prefix byte
/// always starts its own one-character token so normalization can find it
/// unambiguously.
pub fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < n {
        let c = chars[i];
        if c == CONTROL_PREFIX {
            tokens.push(c.to_string());
            i += 1;
        } else if is_word_char(c) {
            let start = i;
            i += 1;
            while i < n && is_word_char(chars[i]) {
                i += 1;
            }
            while i + 1 < n
                && (chars[i] == '\'' || chars[i] == '-')
                && is_word_char(chars[i + 1])
            {
                i += 1;
                while i < n && is_word_char(chars[i]) {
                    i += 1;
                }
            }
            tokens.push(chars[start..i].iter().collect());
        } else if let Some(class) = ws_class(c) {
            let start = i;
            i += 1;
            while i < n && chars[i] == class {
                i += 1;
            }
            tokens.push(chars[start..i].iter().collect());
        } else {
            let start = i;
            i += 1;
            while i < n
                && chars[i] != CONTROL_PREFIX
                && !is_word_char(chars[i])
                && ws_class(chars[i]).is_none()
            {
                i += 1;
            }
            tokens.push(chars[start..i].iter().collect());
        }
    }
    tokens
}

fn whitespace_class(tok: &str) -> Option<char> {
    let mut chars = tok.chars();
    let first = chars.next()?;
    let class = ws_class(first)?;
    if chars.all(|c| c == class) {
        Some(match class {
            ' ' => 's',
            '\n' => 'n',
            '\t' => 't',
            _ => unreachable!(),
        })
    } else {
        None
    }
}

fn is_numeric_token(tok: &str) -> bool {
    !tok.is_empty() && tok.chars().all(|c| c.is_ascii_digit())
}

/// `None` for plain lowercase words, punctuation runs, and anything else
/// emitted as-is.
fn case_marker(tok: &str) -> Option<char> {
    let alpha_count = tok.chars().filter(|c| c.is_ascii_alphabetic()).count();
    if alpha_count == 0 {
        return None;
    }
    let all_upper = tok
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .all(|c| c.is_ascii_uppercase());
    if all_upper && alpha_count >= 2 {
        return Some('u');
    }
    let mut chars = tok.chars();
    let first = chars.next()?;
    if first.is_ascii_uppercase() {
        let rest_lower = chars
            .filter(|c| c.is_ascii_alphabetic())
            .all(|c| c.is_ascii_lowercase());
        if rest_lower {
            return Some('c');
        }
    }
    None
}

pub fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8(buf).expect("base36 digits are ASCII")
}

pub fn from_base36(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    let mut n: u64 = 0;
    for c in s.chars() {
        let d = c.to_digit(36)?;
        n = n.checked_mul(36)?.checked_add(d as u64)?;
    }
    Some(n)
}

/// Maps each raw token to zero, one, or two normalized tokens. Every
/// whitespace run, including a lone space, newline, or tab, gets the
/// marker + base-36 length treatment so it can be reconstructed exactly.
pub fn normalize(tokens: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len());
    for tok in tokens {
        if tok.starts_with(CONTROL_PREFIX) {
            out.push(format!("{CONTROL_PREFIX}e"));
            out.push(tok.clone());
            continue;
        }
        if let Some(marker) = whitespace_class(tok) {
            let len = tok.chars().count();
            out.push(format!("{CONTROL_PREFIX}{marker}"));
            out.push(to_base36(len as u64));
            continue;
        }
        if is_numeric_token(tok) {
            out.push(format!("{CONTROL_PREFIX}d"));
            out.push(tok.clone());
            continue;
        }
        if let Some(marker) = case_marker(tok) {
            out.push(format!("{CONTROL_PREFIX}{marker}"));
            out.push(tok.to_lowercase());
            continue;
        }
        out.push(tok.clone());
    }
    out
}

fn control_marker(tok: &str) -> Option<char> {
    let mut chars = tok.chars();
    if chars.next()? != CONTROL_PREFIX {
        return None;
    }
    let marker = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if "sntduce".contains(marker) {
        Some(marker)
    } else {
        None
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Inverse of [`normalize`]. A dangling marker at the end of the stream
/// (reachable only via a corrupt or hand-crafted stream) is a no-op: the
/// marker is skipped and nothing is emitted for it.
pub fn render(tokens: &[String]) -> String {
    let mut out = String::new();
    let mut i = 0;
    let n = tokens.len();
    while i < n {
        let tok = &tokens[i];
        if let Some(marker) = control_marker(tok) {
            if i + 1 >= n {
                i += 1;
                continue;
            }
            let payload = &tokens[i + 1];
            match marker {
                's' => {
                    if let Some(len) = from_base36(payload) {
                        out.extend(std::iter::repeat(' ').take(len as usize));
                    }
                }
                'n' => {
                    if let Some(len) = from_base36(payload) {
                        out.extend(std::iter::repeat('\n').take(len as usize));
                    }
                }
                't' => {
                    if let Some(len) = from_base36(payload) {
                        out.extend(std::iter::repeat('\t').take(len as usize));
                    }
                }
                'd' => out.push_str(payload),
                'u' => out.push_str(&payload.to_uppercase()),
                'c' => out.push_str(&title_case(payload)),
                'e' => out.push_str(payload),
                _ => {}
            }
            i += 2;
        } else {
            out.push_str(tok);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_preserves_concatenation() {
        let samples = [
            "",
            "hello world",
            "Hello, World! 123",
            "line1\nline2\n\ttabbed",
            "it's a cat-eye, right-here",
            "\u{1f}\u{1f}\u{1f}",
        ];
        for s in samples {
            let toks = tokenize(s);
            let joined: String = toks.concat();
            assert_eq!(joined, s);
        }
    }

    #[test]
    fn tokenize_splits_control_prefix_into_single_chars() {
        let toks = tokenize("\u{1f}\u{1f}\u{1f}");
        assert_eq!(toks, vec!["\u{1f}", "\u{1f}", "\u{1f}"]);
    }

    #[test]
    fn tokenize_word_with_connectors() {
        let toks = tokenize("cat's-eye!");
        assert_eq!(toks, vec!["cat's-eye", "!"]);
    }

    #[test]
    fn normalize_marks_single_space_and_newline() {
        let toks = tokenize("Hello HELLO hello\n");
        let norm = normalize(&toks);
        assert!(norm.contains(&"\u{1f}c".to_string()));
        assert!(norm.contains(&"\u{1f}u".to_string()));
        assert!(norm.contains(&"\u{1f}n".to_string()));
        assert!(norm.contains(&"\u{1f}s".to_string()));
        assert!(norm.contains(&"hello".to_string()));
        assert_eq!(norm.iter().filter(|t| t.as_str() == " ").count(), 0);
        assert_eq!(render(&norm), "Hello HELLO hello\n");
    }

    #[test]
    fn normalize_marks_escape_tokens() {
        let toks = tokenize("\u{1f}\u{1f}\u{1f}");
        let norm = normalize(&toks);
        assert_eq!(
            norm,
            vec!["\u{1f}e", "\u{1f}", "\u{1f}e", "\u{1f}", "\u{1f}e", "\u{1f}"]
        );
        assert_eq!(render(&norm), "\u{1f}\u{1f}\u{1f}");
    }

    #[test]
    fn round_trips_multi_space_and_tab_runs() {
        let text = "a   b\t\tc";
        let norm = normalize(&tokenize(text));
        assert_eq!(render(&norm), text);
    }

    #[test]
    fn base36_round_trip() {
        for n in [0u64, 1, 35, 36, 37, 1295, 999999] {
            let s = to_base36(n);
            assert_eq!(from_base36(&s), Some(n));
        }
    }
}

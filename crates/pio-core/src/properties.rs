//! Parser for properties-format message resources.
//!
//! The format is line oriented `key=value` text:
//!
//! - `#` and `!` start comment lines
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - a line ending in an odd number of backslashes continues on the next line
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded; any other
//!   escaped character stands for itself

use std::collections::HashMap;

use crate::catalog::CatalogError;

/// Parses properties text into a key/value map.
///
/// Later entries for the same key replace earlier ones.
///
/// ## Errors
///
/// Returns [`CatalogError::Parse`] with the 1-based line number when an
/// escape sequence is malformed.
pub fn parse(text: &str) -> Result<HashMap<String, String>, CatalogError> {
    let mut entries = HashMap::new();
    let mut lines = text.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = index + 1;
        let trimmed = raw.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = trimmed.to_string();
        while has_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        entries.insert(unescape(key, line)?, unescape(value, line)?);
    }

    Ok(entries)
}

const fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\x0c')
}

fn has_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&ch| ch == '\\').count() % 2 == 1
}

/// Splits a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut separator = None;

    for (idx, ch) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if ch == '=' || ch == ':' || is_blank(ch) {
            separator = Some((idx, ch));
            break;
        }
    }

    let Some((idx, ch)) = separator else {
        return (line, "");
    };

    let key = &line[..idx];
    let mut value = line[idx + ch.len_utf8()..].trim_start_matches(is_blank);
    if is_blank(ch) {
        if let Some(rest) = value.strip_prefix(['=', ':']) {
            value = rest.trim_start_matches(is_blank);
        }
    }
    (key, value)
}

fn unescape(raw: &str, line: usize) -> Result<String, CatalogError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let unit = read_code_unit(&mut chars, line)?;
                out.push(decode_code_unit(unit, &mut chars, line)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

/// Reads the four hex digits following `\u`.
fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u16, CatalogError> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(malformed_unicode(&hex, line));
    }
    u16::from_str_radix(&hex, 16).map_err(|_| malformed_unicode(&hex, line))
}

/// Turns a UTF-16 code unit into a char, pairing high surrogates with a
/// following `\uXXXX` low surrogate when one is present.
fn decode_code_unit(
    unit: u16,
    chars: &mut std::str::Chars<'_>,
    line: usize,
) -> Result<char, CatalogError> {
    let mut units = vec![unit];
    if (0xD800..0xDC00).contains(&unit) && chars.as_str().starts_with("\\u") {
        let mut lookahead = chars.clone();
        lookahead.nth(1);
        let low = read_code_unit(&mut lookahead, line)?;
        if (0xDC00..0xE000).contains(&low) {
            units.push(low);
            *chars = lookahead;
        }
    }

    Ok(char::decode_utf16(units)
        .next()
        .and_then(Result::ok)
        .unwrap_or(char::REPLACEMENT_CHARACTER))
}

fn malformed_unicode(hex: &str, line: usize) -> CatalogError {
    CatalogError::Parse {
        line,
        reason: format!("malformed \\u{hex} escape"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_entries() {
        let entries = parse("a=1\nb:2\nc 3\n").unwrap();
        assert_eq!(entries["a"], "1");
        assert_eq!(entries["b"], "2");
        assert_eq!(entries["c"], "3");
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let entries = parse("# comment\n! also comment\n\n   \nkey=value\n").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries["key"], "value");
    }

    #[test]
    fn whitespace_around_separator_is_dropped() {
        let entries = parse("  key   =   value with spaces  \nother : x\n").unwrap();
        assert_eq!(entries["key"], "value with spaces  ");
        assert_eq!(entries["other"], "x");
    }

    #[test]
    fn key_without_value_maps_to_empty_string() {
        let entries = parse("lonely\n").unwrap();
        assert_eq!(entries["lonely"], "");
    }

    #[test]
    fn value_may_contain_separators() {
        let entries = parse("url=https://example.com/a=b\n").unwrap();
        assert_eq!(entries["url"], "https://example.com/a=b");
    }

    #[test]
    fn continuation_lines_are_joined() {
        let entries = parse("message=Required parameter \\\n    [{0}] \\\n    missing.\n").unwrap();
        assert_eq!(entries["message"], "Required parameter [{0}] missing.");
    }

    #[test]
    fn escaped_backslash_does_not_continue() {
        let entries = parse("path=C:\\\\\nnext=1\n").unwrap();
        assert_eq!(entries["path"], "C:\\");
        assert_eq!(entries["next"], "1");
    }

    #[test]
    fn decodes_escapes() {
        let entries = parse("a=tab\\there\nb=\\u00e9t\\u00e9\nc=\\q\nd=\\ud83d\\ude00\n").unwrap();
        assert_eq!(entries["a"], "tab\there");
        assert_eq!(entries["b"], "été");
        assert_eq!(entries["c"], "q");
        assert_eq!(entries["d"], "😀");
    }

    #[test]
    fn escaped_separator_is_part_of_key() {
        let entries = parse("a\\=b=c\nx\\ y=z\n").unwrap();
        assert_eq!(entries["a=b"], "c");
        assert_eq!(entries["x y"], "z");
    }

    #[test]
    fn later_duplicates_win() {
        let entries = parse("k=first\nk=second\n").unwrap();
        assert_eq!(entries["k"], "second");
    }

    #[test]
    fn malformed_unicode_escape_reports_line() {
        let err = parse("ok=1\nbad=\\u12g4\n").unwrap_err();
        match err {
            CatalogError::Parse { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("\\u12g4"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn signed_unicode_escape_is_rejected() {
        assert!(matches!(
            parse("bad=\\u+041\n"),
            Err(CatalogError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn truncated_unicode_escape_is_rejected() {
        assert!(matches!(
            parse("bad=\\u12\n"),
            Err(CatalogError::Parse { line: 1, .. })
        ));
    }
}

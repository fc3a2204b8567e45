//! Quoting and escaping of strings in stringified notation.
//!
//! Short escapes: `\\ \" \' \n \r \t \b \f \s` (`\s` is a space). Any
//! character can also be written as `\xHH`, `\uHHHH` or `\UHHHHHHHH`. An
//! escape the parser does not recognise is kept as written, backslash
//! included.

use super::cursor::StringCursor;
use crate::Result;

/// Returns `true` if `s` can be written without quotes:
/// `[A-Za-z_.][A-Za-z0-9_.+-]*`.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::snbt::is_bare_token;
///
/// assert!(is_bare_token("minecraft.stone"));
/// assert!(is_bare_token("_id-2"));
/// assert!(!is_bare_token("2nd"));
/// assert!(!is_bare_token("has space"));
/// assert!(!is_bare_token(""));
/// ```
#[must_use]
pub fn is_bare_token(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '.' => {
            chars.all(is_token_char)
        }
        _ => false,
    }
}

/// Characters that may appear in an unquoted token.
#[inline]
pub(crate) fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '+' | '-')
}

/// Wraps `s` in `quote`, escaping backslashes, that quote character and
/// control characters.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::snbt::quote;
///
/// assert_eq!(quote("a\"b", '"'), r#""a\"b""#);
/// assert_eq!(quote("a\"b", '\''), r#"'a"b'"#);
/// assert_eq!(quote("tab\there", '"'), r#""tab\there""#);
/// assert_eq!(quote("\u{1}", '"'), r#""\x01""#);
/// ```
#[must_use]
pub fn quote(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Reads a quoted string starting at the opening quote.
///
/// Fails if the closing quote is missing; the error points at the opening
/// quote.
pub(crate) fn parse_quoted(cursor: &mut StringCursor<'_>) -> Result<String> {
    let start = cursor.position();
    let Some(quote) = cursor.next() else {
        return Err(cursor.error("Expected a quoted string"));
    };

    let mut out = String::new();
    loop {
        match cursor.next() {
            None => return Err(cursor.error_at(start, "Unterminated string")),
            Some(ch) if ch == quote => return Ok(out),
            Some('\\') => read_escape(cursor, &mut out),
            Some(ch) => out.push(ch),
        }
    }
}

/// Decodes the escape after a backslash into `out`.
fn read_escape(cursor: &mut StringCursor<'_>, out: &mut String) {
    let short = match cursor.peek() {
        Some('\\') => Some('\\'),
        Some('"') => Some('"'),
        Some('\'') => Some('\''),
        Some('n') => Some('\n'),
        Some('r') => Some('\r'),
        Some('t') => Some('\t'),
        Some('b') => Some('\u{0008}'),
        Some('f') => Some('\u{000C}'),
        Some('s') => Some(' '),
        _ => None,
    };
    if let Some(ch) = short {
        cursor.next();
        out.push(ch);
        return;
    }

    let digits = match cursor.peek() {
        Some('x') => 2,
        Some('u') => 4,
        Some('U') => 8,
        _ => 0,
    };
    if digits > 0 {
        let rest = cursor.rest();
        let hex = rest.get(1..=digits).filter(|h| h.chars().all(|c| c.is_ascii_hexdigit()));
        let decoded = hex
            .and_then(|h| u32::from_str_radix(h, 16).ok())
            .and_then(char::from_u32);
        if let Some(ch) = decoded {
            cursor.set_position(cursor.position() + 1 + digits);
            out.push(ch);
            return;
        }
    }

    out.push('\\');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unquote(input: &str) -> Result<String> {
        parse_quoted(&mut StringCursor::new(input))
    }

    #[test]
    fn test_short_escapes() {
        assert_eq!(
            unquote(r#""\\ \" \' \n \r \t \b \f \s""#).unwrap(),
            "\\ \" ' \n \r \t \u{8} \u{c}  "
        );
    }

    #[test]
    fn test_hex_and_unicode_escapes() {
        assert_eq!(unquote(r#""\x41é\U0001F600""#).unwrap(), "Aé😀");
    }

    #[test]
    fn test_unknown_escapes_kept() {
        assert_eq!(unquote(r#"'\q'"#).unwrap(), "\\q");
        assert_eq!(unquote(r#"'\xZZ'"#).unwrap(), "\\xZZ");
        assert_eq!(unquote(r#"'\UFFFFFFFF'"#).unwrap(), "\\UFFFFFFFF");
    }

    #[test]
    fn test_unterminated() {
        let err = unquote("\"abc").unwrap_err();
        assert_eq!(err.syntax_index(), Some(0));
    }

    #[test]
    fn test_quote_round_trip() {
        let original = "mixed 'quotes' \"here\" \\ \u{7f} é";
        for q in ['"', '\''] {
            assert_eq!(unquote(&quote(original, q)).unwrap(), original);
        }
    }
}

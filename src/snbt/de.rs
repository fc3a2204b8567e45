//! Stringified-notation parsing.
//!
//! [`from_str`] reads one payload by recursive descent over a
//! [`StringCursor`]. At each value position the next characters decide
//! what follows:
//!
//! 1. `{` opens a compound of `name: value` members
//! 2. `[B;`, `[I;` or `[L;` (whitespace allowed) opens a typed array
//! 3. any other `[` opens a list
//! 4. letters followed by `(` call an operator such as `uuid("...")`
//! 5. `true` / `false` not followed by a token character are bytes
//! 6. a quote opens a string
//! 7. a run of `[A-Za-z0-9_.+-]` is a number if it matches the integer or
//!    float grammar, and a bare string otherwise
//!
//! Every failure is a syntax error carrying the input and the character
//! offset, except for values the model itself rejects (a list mixing
//! element kinds, an over-long string, an operator given the wrong kind of
//! argument), which are validation errors.
//!
//! ```rust
//! use nbt_codec::{from_snbt, Payload, TagId};
//!
//! let payload = from_snbt(r#"{foo: 1b, bar: [I; 1, 2, 3], baz: "a\"b"}"#).unwrap();
//! let ids: Vec<TagId> = payload
//!     .as_compound()
//!     .unwrap()
//!     .iter()
//!     .map(|tag| tag.payload().tag_id())
//!     .collect();
//! assert_eq!(ids, vec![TagId::Byte, TagId::IntArray, TagId::String]);
//! ```

use tracing::trace;
use uuid::Uuid;

use super::cursor::StringCursor;
use super::escape::{is_token_char, parse_quoted};
use crate::options::ParseOptions;
use crate::payload::{Payload, TagId};
use crate::tag::Tag;
use crate::{Error, Result};

/// Parses one payload; only whitespace may follow it.
pub fn from_str(input: &str) -> Result<Payload> {
    from_str_with_options(input, &ParseOptions::default())
}

/// Parses one payload with an explicit nesting limit.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::snbt::from_str_with_options;
/// use nbt_codec::{Error, ParseOptions};
///
/// let options = ParseOptions::new().with_max_depth(2);
/// assert!(from_str_with_options("[[1]]", &options).is_ok());
/// assert_eq!(
///     from_str_with_options("[[[1]]]", &options).unwrap_err(),
///     Error::DepthLimitExceeded { limit: 2 }
/// );
/// ```
pub fn from_str_with_options(input: &str, options: &ParseOptions) -> Result<Payload> {
    let mut parser = Parser::new(input, options);
    let payload = parser.parse_value()?;
    parser.cursor.skip_whitespace();
    if !parser.cursor.at_end() {
        return Err(parser.cursor.error("Unexpected trailing input"));
    }
    trace!(len = input.len(), "parsed stringified payload");
    Ok(payload)
}

/// Parses a document: the text must be a compound, returned as a root tag.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::snbt::tag_from_str;
///
/// let root = tag_from_str("{a: 1}").unwrap();
/// assert!(root.is_root());
/// assert!(tag_from_str("[1, 2]").unwrap_err().is_validation());
/// ```
pub fn tag_from_str(input: &str) -> Result<Tag> {
    Tag::root(from_str(input)?)
}

type OperatorFn = fn(Payload) -> Result<Payload>;

/// Named operators, `name(argument)`.
const OPERATORS: &[(&str, OperatorFn)] = &[("bool", bool_operator), ("uuid", uuid_operator)];

/// `bool(n)`: any nonzero number is `1b`, zero is `0b`.
fn bool_operator(argument: Payload) -> Result<Payload> {
    match argument.as_f64() {
        Some(n) => Ok(Payload::Byte(i8::from(n != 0.0))),
        None => Err(Error::validation(format!(
            "Operator \"bool\" expects a number, got a {}",
            argument.tag_id()
        ))),
    }
}

/// `uuid("xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx")`: four signed words.
fn uuid_operator(argument: Payload) -> Result<Payload> {
    let Some(text) = argument.as_str() else {
        return Err(Error::validation(format!(
            "Operator \"uuid\" expects a string, got a {}",
            argument.tag_id()
        )));
    };
    if !is_hyphenated_uuid(text) {
        return Err(Error::validation(format!("Invalid uuid string \"{}\"", text)));
    }
    let uuid = Uuid::parse_str(text)
        .map_err(|e| Error::validation(format!("Invalid uuid string \"{}\": {}", text, e)))?;
    Ok(Payload::from_uuid(uuid))
}

/// 8-4-4-4-12 hex digits, either case.
fn is_hyphenated_uuid(text: &str) -> bool {
    text.len() == 36
        && text.char_indices().all(|(i, c)| match i {
            8 | 13 | 18 | 23 => c == '-',
            _ => c.is_ascii_hexdigit(),
        })
}

struct Parser<'a> {
    cursor: StringCursor<'a>,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, options: &ParseOptions) -> Self {
        Parser {
            cursor: StringCursor::new(input),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_value(&mut self) -> Result<Payload> {
        self.cursor.skip_whitespace();
        match self.cursor.peek() {
            Some('{') => self.parse_compound(),
            Some('[') => match self.typed_array_kind() {
                Some(kind) => self.parse_typed_array(kind),
                None => self.parse_list(),
            },
            Some('"' | '\'') => Payload::string(parse_quoted(&mut self.cursor)?),
            Some(_) => self.parse_word(),
            None => Err(self.cursor.error("Expected a value but found end of input")),
        }
    }

    /// Looks for `[ B ;` without consuming anything.
    fn typed_array_kind(&self) -> Option<TagId> {
        let mut probe = self.cursor.clone();
        probe.next();
        probe.skip_whitespace();
        let kind = match probe.next()? {
            'B' => TagId::ByteArray,
            'I' => TagId::IntArray,
            'L' => TagId::LongArray,
            _ => return None,
        };
        probe.skip_whitespace();
        probe.eat(';').then_some(kind)
    }

    fn parse_compound(&mut self) -> Result<Payload> {
        self.enter()?;
        self.cursor.expect(&['{'])?;
        let mut tags = Vec::new();

        self.cursor.skip_whitespace();
        if !self.cursor.eat('}') {
            loop {
                self.cursor.skip_whitespace();
                let name = self.parse_name()?;
                self.cursor.skip_whitespace();
                self.cursor.expect(&[':'])?;
                let payload = self.parse_value()?;
                tags.push(Tag::new(name, payload)?);

                self.cursor.skip_whitespace();
                if self.cursor.expect(&[',', '}'])? == '}' {
                    break;
                }
            }
        }

        self.leave();
        Ok(Payload::Compound(tags))
    }

    /// A member name: quoted, or a bare run of token characters.
    fn parse_name(&mut self) -> Result<String> {
        match self.cursor.peek() {
            Some('"' | '\'') => parse_quoted(&mut self.cursor),
            _ => {
                let name = self.cursor.take_while(is_token_char);
                if name.is_empty() {
                    return Err(self.cursor.error("Expected a tag name"));
                }
                Ok(name.to_string())
            }
        }
    }

    fn parse_list(&mut self) -> Result<Payload> {
        self.enter()?;
        self.cursor.expect(&['['])?;
        let mut elements = Vec::new();

        self.cursor.skip_whitespace();
        if !self.cursor.eat(']') {
            loop {
                elements.push(self.parse_value()?);
                self.cursor.skip_whitespace();
                if self.cursor.expect(&[',', ']'])? == ']' {
                    break;
                }
            }
        }

        self.leave();
        Payload::list(elements)
    }

    fn parse_typed_array(&mut self, kind: TagId) -> Result<Payload> {
        self.enter()?;
        self.cursor.take_while(|c| c != ';');
        self.cursor.expect(&[';'])?;

        let (range, element) = match kind {
            TagId::ByteArray => (i64::from(i8::MIN)..=i64::from(i8::MAX), "byte"),
            TagId::IntArray => (i64::from(i32::MIN)..=i64::from(i32::MAX), "int"),
            _ => (i64::MIN..=i64::MAX, "long"),
        };

        let mut values = Vec::new();
        self.cursor.skip_whitespace();
        if !self.cursor.eat(']') {
            loop {
                self.cursor.skip_whitespace();
                let start = self.cursor.position();
                let value = self.parse_value()?;
                match value.as_i64() {
                    Some(v) if range.contains(&v) => values.push(v),
                    _ => {
                        return Err(self
                            .cursor
                            .error_at(start, &format!("Expected a {} value", element)))
                    }
                }
                self.cursor.skip_whitespace();
                if self.cursor.expect(&[',', ']'])? == ']' {
                    break;
                }
            }
        }

        self.leave();
        // values are range-checked above
        Ok(match kind {
            TagId::ByteArray => Payload::ByteArray(values.into_iter().map(|v| v as i8).collect()),
            TagId::IntArray => Payload::IntArray(values.into_iter().map(|v| v as i32).collect()),
            _ => Payload::LongArray(values),
        })
    }

    /// Operators, booleans, numbers and bare strings.
    fn parse_word(&mut self) -> Result<Payload> {
        let start = self.cursor.position();

        let ident = self.cursor.take_while(|c| c.is_ascii_alphabetic());
        if !ident.is_empty() {
            let mut probe = self.cursor.clone();
            probe.skip_whitespace();
            if probe.peek() == Some('(') {
                self.cursor = probe;
                return self.parse_operator(ident, start);
            }
        }
        self.cursor.set_position(start);

        let token = self.cursor.take_while(is_token_char);
        if token.is_empty() {
            return Err(self.cursor.error("Expected a value"));
        }
        match token {
            "true" => return Ok(Payload::Byte(1)),
            "false" => return Ok(Payload::Byte(0)),
            _ => {}
        }
        if let Some(payload) = parse_integer(token) {
            return Ok(payload);
        }
        if let Some(parsed) = parse_float(token) {
            return parsed;
        }
        Payload::string(token)
    }

    fn parse_operator(&mut self, name: &str, start: usize) -> Result<Payload> {
        let Some((_, operator)) = OPERATORS.iter().find(|(n, _)| *n == name) else {
            return Err(self
                .cursor
                .error_at(start, &format!("Unknown operator \"{}\"", name)));
        };
        self.enter()?;
        self.cursor.expect(&['('])?;
        let argument = self.parse_value()?;
        self.cursor.skip_whitespace();
        self.cursor.expect(&[')'])?;
        self.leave();
        operator(argument)
    }
}

/// Integer grammar: `[+-]? (0x HEX | 0b BIN | DEC) ([us]? [bsil])?` with `_`
/// allowed between digits. Values wrap to the suffix width; no suffix means
/// Int.
fn parse_integer(token: &str) -> Option<Payload> {
    let (negative, rest) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, rest) = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, hex)
    } else if rest.starts_with("0b") && matches!(rest.as_bytes().get(2), Some(b'0' | b'1')) {
        (2, &rest[2..])
    } else {
        (10, rest)
    };

    let (digits, kind) = split_width_suffix(rest);
    let mut chars = digits.chars();
    if !chars.next()?.is_digit(radix) || !chars.all(|c| c == '_' || c.is_digit(radix)) {
        return None;
    }

    let magnitude = digits
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0u64, |acc, d| {
            acc.wrapping_mul(u64::from(radix)).wrapping_add(u64::from(d))
        });
    let value = if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    };
    Payload::integer(kind, value as i64).ok()
}

/// Splits a trailing `[us]?[bsil]` width suffix (any case) off `s`.
fn split_width_suffix(s: &str) -> (&str, TagId) {
    let kind = match s.as_bytes().last().map(u8::to_ascii_lowercase) {
        Some(b'b') => TagId::Byte,
        Some(b's') => TagId::Short,
        Some(b'i') => TagId::Int,
        Some(b'l') => TagId::Long,
        _ => return (s, TagId::Int),
    };
    let s = &s[..s.len() - 1];
    let s = match s.as_bytes().last().map(u8::to_ascii_lowercase) {
        Some(b'u' | b's') => &s[..s.len() - 1],
        _ => s,
    };
    (s, kind)
}

/// Float grammar: `[+-]? D (. D)? ([eE] [+-]? D)? [fFdD]?` where `D` is a
/// digit followed by digits or `_`. No suffix means Double.
///
/// `None` if the token is not a float; `Some(Err)` if it is one but does not
/// fit the target width.
fn parse_float(token: &str) -> Option<Result<Payload>> {
    let (body, kind) = match token.as_bytes().last()? {
        b'f' | b'F' => (&token[..token.len() - 1], TagId::Float),
        b'd' | b'D' => (&token[..token.len() - 1], TagId::Double),
        _ => (token, TagId::Double),
    };
    if !is_float_literal(body) {
        return None;
    }

    let cleaned = body.replace('_', "");
    Some(match kind {
        TagId::Float => cleaned
            .parse::<f32>()
            .map_err(|e| Error::validation(e.to_string()))
            .and_then(Payload::float),
        _ => cleaned
            .parse::<f64>()
            .map_err(|e| Error::validation(e.to_string()))
            .and_then(Payload::double),
    })
}

fn is_float_literal(s: &str) -> bool {
    fn digits(s: &str) -> Option<&str> {
        let mut chars = s.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_ascii_digit() => {}
            _ => return None,
        }
        let end = chars
            .find(|(_, c)| !(c.is_ascii_digit() || *c == '_'))
            .map_or(s.len(), |(i, _)| i);
        Some(&s[end..])
    }

    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    let Some(mut rest) = digits(s) else {
        return false;
    };
    if let Some(fraction) = rest.strip_prefix('.') {
        match digits(fraction) {
            Some(r) => rest = r,
            None => return false,
        }
    }
    if let Some(exponent) = rest.strip_prefix(['e', 'E']) {
        let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        match digits(exponent) {
            Some(r) => rest = r,
            None => return false,
        }
    }
    rest.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(token: &str) -> Option<Payload> {
        parse_integer(token)
    }

    #[test]
    fn test_integer_suffixes() {
        assert_eq!(int("1b"), Some(Payload::Byte(1)));
        assert_eq!(int("1S"), Some(Payload::Short(1)));
        assert_eq!(int("1"), Some(Payload::Int(1)));
        assert_eq!(int("1i"), Some(Payload::Int(1)));
        assert_eq!(int("-1L"), Some(Payload::Long(-1)));
        assert_eq!(int("255ub"), Some(Payload::Byte(-1)));
        assert_eq!(int("127sb"), Some(Payload::Byte(127)));
        assert_eq!(int("1_000_000"), Some(Payload::Int(1_000_000)));
    }

    #[test]
    fn test_integer_radix() {
        assert_eq!(int("0x1F"), Some(Payload::Int(31)));
        assert_eq!(int("-0x10s"), Some(Payload::Short(-16)));
        assert_eq!(int("0b1010"), Some(Payload::Int(10)));
        assert_eq!(int("0b1_0b"), Some(Payload::Byte(2)));
        // a bare "0b" is zero with a byte suffix
        assert_eq!(int("0b"), Some(Payload::Byte(0)));
        assert_eq!(int("0bz"), None);
    }

    #[test]
    fn test_integer_wraps() {
        assert_eq!(int("128b"), Some(Payload::Byte(-128)));
        assert_eq!(int("2147483648"), Some(Payload::Int(i32::MIN)));
        assert_eq!(int("0xFFFFFFFFFFFFFFFFL"), Some(Payload::Long(-1)));
    }

    #[test]
    fn test_not_integers() {
        for token in ["", "-", "_1", "1.0", "1e5", "abc", "1bb", "0x"] {
            assert_eq!(int(token), None, "{:?}", token);
        }
        // separators may trail
        assert_eq!(int("1_"), Some(Payload::Int(1)));
    }

    #[test]
    fn test_float_grammar() {
        assert!(is_float_literal("1"));
        assert!(is_float_literal("-1.5"));
        assert!(is_float_literal("1_0.2_5e+1_0"));
        assert!(!is_float_literal(".5"));
        assert!(!is_float_literal("1."));
        assert!(!is_float_literal("1e"));
        assert!(!is_float_literal("NaN"));
    }

    #[test]
    fn test_float_suffixes() {
        assert_eq!(parse_float("1.5f").unwrap().unwrap(), Payload::Float(1.5));
        assert_eq!(parse_float("2d").unwrap().unwrap(), Payload::Double(2.0));
        assert_eq!(parse_float("1e3").unwrap().unwrap(), Payload::Double(1000.0));
        assert!(parse_float("1e39f").unwrap().unwrap_err().is_validation());
        assert!(parse_float("word").is_none());
    }

    #[test]
    fn test_uuid_shape() {
        assert!(is_hyphenated_uuid("550e8400-e29b-41d4-a716-446655440000"));
        assert!(is_hyphenated_uuid("550E8400-E29B-41D4-A716-446655440000"));
        assert!(!is_hyphenated_uuid("550e8400e29b41d4a716446655440000"));
        assert!(!is_hyphenated_uuid("550e8400-e29b-41d4-a716-44665544000g"));
    }

    #[test]
    fn test_operators() {
        assert_eq!(from_str("bool(2)").unwrap(), Payload::Byte(1));
        assert_eq!(from_str("bool (0.0)").unwrap(), Payload::Byte(0));
        assert!(from_str("bool(\"x\")").unwrap_err().is_validation());
        assert!(from_str("uuid(1)").unwrap_err().is_validation());
        let err = from_str("[nope(1)]").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.syntax_index(), Some(1));
    }

    #[test]
    fn test_bool_literals_need_a_boundary() {
        assert_eq!(from_str("true").unwrap(), Payload::Byte(1));
        assert_eq!(
            from_str("[false,true]").unwrap(),
            Payload::List(vec![Payload::Byte(0), Payload::Byte(1)])
        );
        assert_eq!(
            from_str("truestuff").unwrap(),
            Payload::String("truestuff".to_string())
        );
    }

    #[test]
    fn test_typed_array_detection() {
        assert_eq!(from_str("[ L ; 1 ]").unwrap(), Payload::LongArray(vec![1]));
        assert_eq!(from_str("[B;]").unwrap(), Payload::ByteArray(vec![]));
        // lowercase is a list of bare strings, not a typed array
        assert!(from_str("[b; 1]").is_err());
        assert_eq!(
            from_str("[B, I]").unwrap(),
            Payload::List(vec![
                Payload::String("B".to_string()),
                Payload::String("I".to_string())
            ])
        );
    }

    #[test]
    fn test_typed_array_element_errors() {
        let err = from_str("[B; 1, 2, 300]").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.syntax_index(), Some(10));

        let err = from_str("[I; 1, \"x\"]").unwrap_err();
        assert_eq!(err.syntax_index(), Some(7));

        assert!(from_str("[I; 1.5]").unwrap_err().is_syntax());
        assert_eq!(
            from_str("[L; 1b, 2s, 3, 4L]").unwrap(),
            Payload::LongArray(vec![1, 2, 3, 4])
        );
    }
}

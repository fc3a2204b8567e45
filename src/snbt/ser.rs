//! Stringified-notation serialization.
//!
//! [`to_string`] renders a [`Payload`] according to [`SnbtOptions`]:
//!
//! | Payload | Rendering |
//! |---|---|
//! | Byte / Short / Int / Long | `1b` / `1s` / `1` / `1l` |
//! | Float / Double | `1.5f` / `1.5d` |
//! | String | quoted, or bare when allowed and unambiguous |
//! | ByteArray / IntArray / LongArray | `[B; 1b, 2b]` / `[I; 1, 2]` / `[L; 1l, 2l]` |
//! | List | `[a, b]` |
//! | Compound | `{ name: value }` |
//!
//! Rendering trusts the nesting depth of its input and has no limit of its
//! own. Trees produced by the decoders are already bounded by their
//! `max_depth`; a hand-built tree is rendered however deep it is.
//!
//! ```rust
//! use nbt_codec::{from_snbt, to_snbt_with_options, SnbtOptions};
//!
//! let payload = from_snbt("{pos: [I; 1, 64, -3], name: 'Steve'}").unwrap();
//! assert_eq!(
//!     to_snbt_with_options(&payload, &SnbtOptions::compact()),
//!     r#"{pos:[I;1,64,-3],name:"Steve"}"#
//! );
//! assert_eq!(
//!     to_snbt_with_options(&payload, &SnbtOptions::default()),
//!     r#"{ pos: [I; 1, 64, -3], name: "Steve" }"#
//! );
//! ```

use super::escape::{is_bare_token, quote};
use crate::options::{SnbtMode, SnbtOptions};
use crate::payload::Payload;
use crate::tag::Tag;

/// Renders a payload.
#[must_use]
pub fn to_string(payload: &Payload, options: &SnbtOptions) -> String {
    let mut serializer = Serializer::new(options);
    serializer.serialize_payload(payload);
    serializer.into_inner()
}

/// Renders a tag: a root as its compound, any other tag wrapped as
/// `{name: value}`.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::snbt::tag_to_string;
/// use nbt_codec::{Payload, SnbtOptions, Tag};
///
/// let tag = Tag::new("level", Payload::Int(3)).unwrap();
/// assert_eq!(tag_to_string(&tag, &SnbtOptions::compact()), "{level:3}");
/// ```
#[must_use]
pub fn tag_to_string(tag: &Tag, options: &SnbtOptions) -> String {
    let mut serializer = Serializer::new(options);
    if tag.is_root() {
        serializer.serialize_payload(tag.payload());
    } else {
        serializer.serialize_compound(std::slice::from_ref(tag));
    }
    serializer.into_inner()
}

/// Writes payloads into an owned buffer.
pub struct Serializer<'o> {
    output: String,
    options: &'o SnbtOptions,
    mode: SnbtMode,
    indent_level: usize,
}

impl<'o> Serializer<'o> {
    pub fn new(options: &'o SnbtOptions) -> Self {
        Serializer {
            output: String::with_capacity(128),
            options,
            mode: options.mode,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    pub fn serialize_payload(&mut self, payload: &Payload) {
        match payload {
            Payload::Byte(v) if self.options.bool_literals && (*v == 0 || *v == 1) => {
                self.output.push_str(if *v == 1 { "true" } else { "false" });
            }
            Payload::Byte(v) => self.write_number(v, "b"),
            Payload::Short(v) => self.write_number(v, "s"),
            Payload::Int(v) => self.write_number(v, ""),
            Payload::Long(v) => self.write_number(v, "l"),
            Payload::Float(v) => self.write_number(v, "f"),
            Payload::Double(v) => self.write_number(v, "d"),
            Payload::String(s) => self.write_string(s, self.options.unquoted_strings),
            Payload::ByteArray(values) => self.write_array("B;", values, "b"),
            Payload::IntArray(values) => self.write_array("I;", values, ""),
            Payload::LongArray(values) => self.write_array("L;", values, "l"),
            Payload::List(elements) => {
                self.write_container('[', "", ']', elements, &|s, e| s.serialize_payload(e));
            }
            Payload::Compound(tags) => self.serialize_compound(tags),
        }
    }

    fn serialize_compound(&mut self, tags: &[Tag]) {
        self.write_container('{', "", '}', tags, &|s, tag| {
            s.write_string(tag.name(), s.options.unquoted_keys);
            s.output.push(':');
            if s.mode != SnbtMode::Compact {
                s.output.push(' ');
            }
            s.serialize_payload(tag.payload());
        });
    }

    fn write_number<T: std::fmt::Display>(&mut self, v: T, suffix: &str) {
        self.output.push_str(&v.to_string());
        self.output.push_str(suffix);
    }

    fn write_string(&mut self, s: &str, allow_bare: bool) {
        if allow_bare && is_bare_token(s) && s != "true" && s != "false" {
            self.output.push_str(s);
        } else {
            self.output.push_str(&quote(s, self.options.quote.quote_for(s)));
        }
    }

    fn write_array<T: std::fmt::Display>(&mut self, prefix: &str, values: &[T], suffix: &str) {
        self.write_container('[', prefix, ']', values, &|s, v| s.write_number(v, suffix));
    }

    fn write_newline(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent);
        }
    }

    /// Writes `open prefix items close` in the current mode.
    fn write_container<T>(
        &mut self,
        open: char,
        prefix: &str,
        close: char,
        items: &[T],
        write: &dyn Fn(&mut Self, &T),
    ) {
        if items.is_empty() {
            self.output.push(open);
            self.output.push_str(prefix);
            self.output.push(close);
            return;
        }

        match self.mode {
            SnbtMode::Compact => {
                self.output.push(open);
                self.output.push_str(prefix);
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    write(self, item);
                }
            }
            SnbtMode::Pretty => {
                let padded = open == '{';
                self.output.push(open);
                self.output.push_str(prefix);
                if padded || !prefix.is_empty() {
                    self.output.push(' ');
                }
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push_str(", ");
                    }
                    write(self, item);
                }
                if padded {
                    self.output.push(' ');
                }
            }
            SnbtMode::Multiline => {
                let mut one_line = Serializer {
                    output: String::new(),
                    options: self.options,
                    mode: SnbtMode::Pretty,
                    indent_level: 0,
                };
                one_line.write_container(open, prefix, close, items, write);
                if one_line.output.chars().count() <= self.options.line_width {
                    self.output.push_str(&one_line.output);
                    return;
                }

                self.output.push(open);
                self.output.push_str(prefix);
                self.indent_level += 1;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.output.push(',');
                    }
                    self.write_newline();
                    write(self, item);
                }
                self.indent_level -= 1;
                self.write_newline();
            }
        }
        self.output.push(close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::QuoteStyle;

    fn compound(members: Vec<(&str, Payload)>) -> Payload {
        Payload::compound(
            members
                .into_iter()
                .map(|(name, payload)| Tag::new(name, payload).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_scalar_suffixes() {
        let options = SnbtOptions::default();
        let cases = [
            (Payload::Byte(-1), "-1b"),
            (Payload::Short(2), "2s"),
            (Payload::Int(3), "3"),
            (Payload::Long(4), "4l"),
            (Payload::Float(1.5), "1.5f"),
            (Payload::Double(-0.25), "-0.25d"),
            (Payload::Double(2.0), "2d"),
        ];
        for (payload, expected) in cases {
            assert_eq!(to_string(&payload, &options), expected);
        }
    }

    #[test]
    fn test_empty_containers() {
        for options in [SnbtOptions::compact(), SnbtOptions::default(), SnbtOptions::multiline()] {
            assert_eq!(to_string(&Payload::Compound(vec![]), &options), "{}");
            assert_eq!(to_string(&Payload::List(vec![]), &options), "[]");
            assert_eq!(to_string(&Payload::IntArray(vec![]), &options), "[I;]");
        }
    }

    #[test]
    fn test_pretty_and_compact() {
        let payload = compound(vec![
            ("a", Payload::Byte(1)),
            ("b", Payload::LongArray(vec![1, 2])),
            ("c", Payload::List(vec![Payload::Int(1), Payload::Int(2)])),
        ]);
        assert_eq!(
            to_string(&payload, &SnbtOptions::default()),
            "{ a: 1b, b: [L; 1l, 2l], c: [1, 2] }"
        );
        assert_eq!(
            to_string(&payload, &SnbtOptions::compact()),
            "{a:1b,b:[L;1l,2l],c:[1,2]}"
        );
    }

    #[test]
    fn test_multiline_breaks_long_containers() {
        let payload = compound(vec![
            ("short", Payload::List(vec![Payload::Int(1)])),
            (
                "long",
                Payload::ByteArray(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]),
            ),
        ]);
        let expected = "{\n    short: [1],\n    long: [B;\n        1b,\n        2b,\n        3b,\n        4b,\n        5b,\n        6b,\n        7b,\n        8b,\n        9b,\n        10b,\n        11b,\n        12b\n    ]\n}";
        assert_eq!(to_string(&payload, &SnbtOptions::multiline()), expected);

        let small = compound(vec![("a", Payload::Int(1))]);
        assert_eq!(to_string(&small, &SnbtOptions::multiline()), "{ a: 1 }");
    }

    #[test]
    fn test_multiline_custom_indent_and_width() {
        let payload = Payload::List(vec![Payload::Int(1), Payload::Int(2)]);
        let options = SnbtOptions::multiline().with_indent("\t").with_line_width(3);
        assert_eq!(to_string(&payload, &options), "[\n\t1,\n\t2\n]");
    }

    #[test]
    fn test_keys_and_strings() {
        let payload = compound(vec![
            ("plain", Payload::String("word".into())),
            ("needs quotes", Payload::String("true".into())),
            ("", Payload::String("it's".into())),
        ]);
        assert_eq!(
            to_string(&payload, &SnbtOptions::compact()),
            r#"{plain:"word","needs quotes":"true","":"it's"}"#
        );
        assert_eq!(
            to_string(&payload, &SnbtOptions::compact().with_unquoted_strings(true)),
            r#"{plain:word,"needs quotes":"true","":"it's"}"#
        );
        assert_eq!(
            to_string(
                &payload,
                &SnbtOptions::compact()
                    .with_unquoted_keys(false)
                    .with_quote(QuoteStyle::ForceSingle)
            ),
            r#"{'plain':'word','needs quotes':'true','':'it\'s'}"#
        );
    }

    #[test]
    fn test_bool_literals() {
        let options = SnbtOptions::compact().with_bool_literals(true);
        let payload = Payload::List(vec![Payload::Byte(0), Payload::Byte(1), Payload::Byte(2)]);
        assert_eq!(to_string(&payload, &options), "[false,true,2b]");
    }

    #[test]
    fn test_non_root_tag_is_wrapped() {
        let tag = Tag::new("x y", Payload::Short(5)).unwrap();
        assert_eq!(tag_to_string(&tag, &SnbtOptions::default()), r#"{ "x y": 5s }"#);

        let root = Tag::root(compound(vec![("a", Payload::Int(1))])).unwrap();
        assert_eq!(tag_to_string(&root, &SnbtOptions::compact()), "{a:1}");
    }
}

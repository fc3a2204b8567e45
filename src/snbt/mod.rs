//! Stringified notation: the human-editable text form of payloads.
//!
//! ```text
//! {name: "Steve", level: 30, pos: [I; 1, 64, -3], flags: [1b, 0b], id: uuid("550e8400-e29b-41d4-a716-446655440000")}
//! ```
//!
//! Parsing is in [`de`], rendering in [`ser`]; both share the quoting rules
//! in [`escape`] and parsing runs on the [`StringCursor`].

pub mod cursor;
pub mod de;
pub mod escape;
pub mod ser;

pub use cursor::StringCursor;
pub use de::{from_str, from_str_with_options, tag_from_str};
pub use escape::{is_bare_token, quote};
pub use ser::{tag_to_string, to_string, Serializer};

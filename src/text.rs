//! Helpful utilities for working with text returned by Reddit.

use htmlentity::entity::{self, ICodedDataTrait};

/// Decodes the HTML entities Reddit sprinkles into comment bodies, post
/// titles, and message subjects.
///
/// Unless a client asks for "raw JSON", Reddit escapes `&`, `<`, and `>`
/// as `&amp;`, `&lt;`, and `&gt;`; this turns them back into the characters
/// the user actually typed. Leading and trailing whitespace is trimmed.
///
/// If the text cannot be decoded, it is returned trimmed but otherwise
/// untouched.
///
/// # Examples
///
/// ```
/// use myredditbackup::text::decode;
/// assert_eq!(decode("Fish &amp; Chips"), "Fish & Chips");
/// assert_eq!(decode("  &gt; quoted reply\n"), "> quoted reply");
/// assert_eq!(decode(""), "");
/// ```
pub fn decode(text: &str) -> String {
    let text = text.trim();
    entity::decode(text.as_bytes())
        .to_string()
        .unwrap_or_else(|_| text.to_string())
}

//! Name-column classification
//!
//! Grammars, all ASCII and applied to the whole (already trimmed) cell text:
//!
//! | class      | grammar                                           |
//! |------------|---------------------------------------------------|
//! | rejected   | `[A-Za-z]{1,2}[0-9]+` or `param` / `params` (any case) |
//! | valid      | `[A-Za-z]_?[A-Za-z0-9_]+`                          |
//! | terminator | starts with `--`                                  |
//!
//! Rejection is checked first; the coordinate look-alike grammar overlaps the
//! valid grammar (`A1`, `xy12`).

/// What a name cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass<'a> {
    /// Header label or cell-coordinate look-alike
    Rejected,
    /// A usable binding name (verbatim cell text)
    Valid(&'a str),
    /// End-of-parameters marker
    Terminator,
    /// Anything else; ignored
    Other,
}

/// Classify the text of a name cell
pub fn classify(text: &str) -> NameClass<'_> {
    if is_coordinate_like(text) || is_header_label(text) {
        NameClass::Rejected
    } else if is_valid_name(text) {
        NameClass::Valid(text)
    } else if is_terminator(text) {
        NameClass::Terminator
    } else {
        NameClass::Other
    }
}

/// One or two letters followed by one or more digits, nothing else (`B12`, `aa7`)
pub fn is_coordinate_like(text: &str) -> bool {
    let letters = text.bytes().take_while(u8::is_ascii_alphabetic).count();
    let digits = &text.as_bytes()[letters..];
    (1..=2).contains(&letters) && !digits.is_empty() && digits.iter().all(u8::is_ascii_digit)
}

/// `Param` or `Params` in any case
pub fn is_header_label(text: &str) -> bool {
    text.eq_ignore_ascii_case("param") || text.eq_ignore_ascii_case("params")
}

/// One letter, an optional underscore, then one or more letters, digits or underscores
pub fn is_valid_name(text: &str) -> bool {
    let bytes = text.as_bytes();
    let Some((first, rest)) = bytes.split_first() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    // The optional underscore is itself a word character, so it folds into the tail.
    !rest.is_empty() && rest.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

/// Two or more leading dashes
pub fn is_terminator(text: &str) -> bool {
    text.starts_with("--")
}

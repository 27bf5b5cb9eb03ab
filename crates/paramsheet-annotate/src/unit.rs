//! Display-unit extraction from value-cell text
//!
//! Grammar (whole trimmed text):
//!
//! ```text
//! value   = ["="] number " "+ unit
//! number  = [sign] (digits ["." digits*] | "." digits) [("e" | "E") [sign] digits]
//! unit    = one or more non-whitespace characters
//! ```

/// Units recognised when no allow-list is configured
pub const DEFAULT_UNITS: &[&str] = &["mm", "deg", "°"];

/// Split value text into its numeric literal and unit token
///
/// ```
/// use paramsheet_annotate::unit::split_quantity;
///
/// assert_eq!(split_quantity("=12.5  mm"), Some(("12.5", "mm")));
/// assert_eq!(split_quantity("12.5mm"), None);
/// ```
pub fn split_quantity(text: &str) -> Option<(&str, &str)> {
    let text = text.trim();
    let text = text.strip_prefix('=').unwrap_or(text);

    let number_len = numeric_prefix_len(text)?;
    let (number, rest) = text.split_at(number_len);

    let unit = rest.trim_start_matches(' ');
    if unit.len() == rest.len() || unit.is_empty() {
        return None;
    }
    if unit.chars().any(char::is_whitespace) {
        return None;
    }

    Some((number, unit))
}

/// Unit token of `text` if it is in `allowed`
pub fn extract_unit<'a, S: AsRef<str>>(text: &'a str, allowed: &[S]) -> Option<&'a str> {
    let (_, unit) = split_quantity(text)?;
    allowed
        .iter()
        .any(|a| a.as_ref() == unit)
        .then_some(unit)
}

/// Length in bytes of the numeric literal at the start of `text`
fn numeric_prefix_len(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        pos += 1 + frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        // An "e" without digits is not an exponent; leave it for the unit check
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    Some(pos)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

//! Numeral decoding for literal-equality names.

/// Decode a C-style unsigned numeral.
///
/// `0x` prefixes hex, `0b` binary, a leading `0` octal, anything else
/// decimal. Returns `None` for an empty radix body, digits outside the radix,
/// or overflow.
pub fn parse_numeral(text: &str) -> Option<u64> {
    let (digits, radix) = if let Some(hex) = text.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(bin) = text.strip_prefix("0b") {
        (bin, 2)
    } else if text.len() > 1 && text.starts_with('0') {
        (&text[1..], 8)
    } else {
        (text, 10)
    };

    // from_str_radix tolerates a leading '+'
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

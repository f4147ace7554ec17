//! Escaping of character data and attribute values, and decoding of
//! character references.

/// Escapes character data for element content: `&` and `<` must not appear
/// literally.
pub fn escape_content(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            _ => escaped.push(character),
        }
    }
    escaped
}

/// Escapes an attribute value for emission inside double quotes.
pub fn escape_attribute(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(character),
        }
    }
    escaped
}

/// Decodes the digits of a character reference (`&#n;` or `&#xH;`) into a
/// character. Returns `None` for malformed digits or characters outside the
/// XML character range.
pub fn decode_char_ref(digits: &str, hex: bool) -> Option<char> {
    if digits.is_empty() {
        return None;
    }
    let radix = if hex { 16 } else { 10 };
    let scalar = u32::from_str_radix(digits, radix).ok()?;
    let character = char::from_u32(scalar)?;
    if is_xml_char(character) {
        Some(character)
    } else {
        None
    }
}

/// The XML 1.0 Char production: tab, LF, CR and everything from space up,
/// minus the surrogate block (already excluded by `char`) and U+FFFE/U+FFFF.
pub fn is_xml_char(character: char) -> bool {
    matches!(character,
        '\u{9}' | '\u{a}' | '\u{d}'
        | '\u{20}'..='\u{d7ff}'
        | '\u{e000}'..='\u{fffd}'
        | '\u{10000}'..='\u{10ffff}')
}

/// The XML NameStartChar production, approximated over Unicode letters.
pub fn is_name_start_char(character: char) -> bool {
    character.is_alphabetic() || character == '_' || character == ':'
}

/// The XML NameChar production.
pub fn is_name_char(character: char) -> bool {
    is_name_start_char(character)
        || character.is_ascii_digit()
        || character == '-'
        || character == '.'
}

/// True when every character of `name` satisfies the Name production.
pub fn is_name(name: &str) -> bool {
    let mut characters = name.chars();
    match characters.next() {
        Some(first) if is_name_start_char(first) => characters.all(is_name_char),
        _ => false,
    }
}

/// True when every character satisfies the NameChar production (the Nmtoken
/// production used by NMTOKEN attribute types).
pub fn is_name_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_name_char)
}

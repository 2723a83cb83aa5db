//! Codec for `application/x-www-form-urlencoded` payloads, used both for
//! POST bodies and for query strings.
//!
//! Decoding is total: malformed percent sequences pass through literally
//! instead of failing, so arbitrary client input can never error out of
//! this module.

use std::collections::HashMap;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Decodes percent escapes and `+` as space.
///
/// A `%` that is not followed by two hex digits is emitted literally and
/// scanning resumes at the next character. Decoded bytes that do not form
/// valid UTF-8 are replaced lossily.
pub fn form_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'+' => {
                decoded.push(b' ');
                index += 1;
            }
            b'%' if index + 2 < bytes.len() => {
                if let (Some(high), Some(low)) =
                    (hex_digit(bytes[index + 1]), hex_digit(bytes[index + 2]))
                {
                    decoded.push(high << 4 | low);
                    index += 3;
                } else {
                    decoded.push(b'%');
                    index += 1;
                }
            }
            byte => {
                decoded.push(byte);
                index += 1;
            }
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Inverse of [`form_decode`]: unreserved ASCII passes through, space
/// becomes `+`, every other byte becomes `%XX`.
pub fn form_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for &byte in value.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            b' ' => encoded.push('+'),
            _ => {
                encoded.push('%');
                encoded.push(HEX_UPPER[(byte >> 4) as usize] as char);
                encoded.push(HEX_UPPER[(byte & 0x0f) as usize] as char);
            }
        }
    }
    encoded
}

/// Splits `key=value&key=value` input into a map with decoded keys and
/// values. Tokens without `=` contribute nothing; the last occurrence of a
/// duplicate key wins.
pub fn parse_form(input: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for token in input.split('&') {
        if let Some(equal) = token.find('=') {
            let key = form_decode(&token[..equal]);
            let value = form_decode(&token[equal + 1..]);
            values.insert(key, value);
        }
    }
    values
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

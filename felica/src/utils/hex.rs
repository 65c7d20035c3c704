//! Hexadecimal helpers for printing identities and block contents, and for
//! parsing block payloads given on a command line.

use std::fmt::Write;

use crate::{Error, Result};

/// Convert a byte slice to a lowercase hex string without separators.
///
/// Example: `&[0xde, 0xad]` -> `"dead"`
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        // write! never fails writing to a String
        let _ = write!(&mut s, "{:02x}", b);
        s
    })
}

/// Convert a byte slice to a lowercase hex string with a single space between
/// each byte.
///
/// Example: `&[0xde, 0xad]` -> `"de ad"`
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Parse a hex string into bytes. ASCII whitespace between digits is ignored.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    let digits: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();

    if digits.len() % 2 != 0 {
        return Err(Error::InvalidHex("odd number of digits".to_string()));
    }

    digits
        .chunks(2)
        .map(|pair| {
            // from_str_radix alone would accept a sign, e.g. "+f"
            if !pair.iter().all(u8::is_ascii_hexdigit) {
                return Err(Error::InvalidHex(format!(
                    "'{}' is not a hex byte",
                    String::from_utf8_lossy(pair)
                )));
            }
            let pair = std::str::from_utf8(pair)
                .map_err(|_| Error::InvalidHex("non-ascii input".to_string()))?;
            u8::from_str_radix(pair, 16)
                .map_err(|e| Error::InvalidHex(format!("'{}': {}", pair, e)))
        })
        .collect()
}

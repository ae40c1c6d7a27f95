//! Base32 Codec
//!
//! RFC 4648 Base32 with `=` padding, used for shared secrets.
//!
//! [`decode`] is deliberately lenient: characters outside the alphabet are
//! skipped rather than rejected, so a secret pasted with spaces or dashes still
//! decodes. That leniency is not validation. Junk injected into a secret string
//! silently yields a different key, with zero bytes where the skipped
//! characters would have been. Use [`decode_strict`] when the input must be
//! well-formed.

use tracing::warn;

use super::{OtpError, OtpResult};

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
const PAD: char = '=';

/// Encode bytes as padded Base32. Empty input encodes to an empty string.
pub fn encode(data: &[u8]) -> String {
    let mut result = String::with_capacity(data.len().div_ceil(5) * 8);
    let mut buffer: u32 = 0;
    let mut bits_left = 0;

    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits_left += 8;

        while bits_left >= 5 {
            bits_left -= 5;
            let index = ((buffer >> bits_left) & 0x1F) as usize;
            result.push(ALPHABET[index] as char);
        }
        buffer &= (1 << bits_left) - 1;
    }

    if bits_left > 0 {
        let index = ((buffer << (5 - bits_left)) & 0x1F) as usize;
        result.push(ALPHABET[index] as char);
    }

    while result.len() % 8 != 0 {
        result.push(PAD);
    }

    result
}

/// Decode Base32, case-insensitively, skipping any character outside the
/// alphabet. Trailing padding is stripped first.
///
/// The output is always `floor(len * 5 / 8)` bytes, where `len` counts every
/// character left after stripping padding, skipped ones included. Bytes the
/// valid symbols do not reach stay zero.
pub fn decode(encoded: &str) -> Vec<u8> {
    let trimmed = encoded.trim_end_matches(PAD);
    let output_len = trimmed.chars().count() * 5 / 8;

    let mut skipped = 0usize;
    let symbols: Vec<u8> = trimmed
        .chars()
        .filter_map(|c| {
            let value = symbol_value(c);
            if value.is_none() {
                skipped += 1;
            }
            value
        })
        .collect();

    if skipped > 0 {
        warn!(skipped, "lenient base32 decode ignored characters outside the alphabet");
    }

    let mut result = pack(&symbols);
    result.resize(output_len, 0);
    result
}

/// Decode Base32, rejecting anything an encoder would not have produced:
/// characters outside the alphabet, padding that does not complete exactly
/// the final 8 character group, symbol counts that cannot carry whole bytes,
/// and non-zero bits left over in the last symbol.
///
/// Padding may be omitted. Whatever is accepted re-encodes to the same text,
/// up to case and padding.
pub fn decode_strict(encoded: &str) -> OtpResult<Vec<u8>> {
    let trimmed = encoded.trim_end_matches(PAD);
    let pad_len = encoded.len() - trimmed.len();

    let mut symbols = Vec::with_capacity(trimmed.len());
    for (position, character) in trimmed.chars().enumerate() {
        let value =
            symbol_value(character).ok_or(OtpError::MalformedSecret { position, character })?;
        symbols.push(value);
    }

    // padding only ever completes a partial final group
    if pad_len > 0 && (pad_len > 6 || symbols.len() % 8 == 0 || encoded.len() % 8 != 0) {
        return Err(OtpError::InvalidSecretLength(encoded.len()));
    }
    // 1, 3 and 6 trailing symbols never come out of an encoder
    if matches!(symbols.len() % 8, 1 | 3 | 6) {
        return Err(OtpError::InvalidSecretLength(symbols.len()));
    }

    let leftover_bits = symbols.len() * 5 % 8;
    if let Some(&last) = symbols.last() {
        if last & ((1u8 << leftover_bits) - 1) != 0 {
            return Err(OtpError::MalformedSecret {
                position: symbols.len() - 1,
                character: trimmed.chars().last().unwrap_or(PAD),
            });
        }
    }

    Ok(pack(&symbols))
}

fn symbol_value(c: char) -> Option<u8> {
    match c.to_ascii_uppercase() {
        c @ 'A'..='Z' => Some(c as u8 - b'A'),
        c @ '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

/// Pack 5-bit symbols into bytes; leftover bits that do not fill a byte are dropped.
fn pack(symbols: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(symbols.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits_left = 0;

    for &value in symbols {
        buffer = (buffer << 5) | value as u32;
        bits_left += 5;

        if bits_left >= 8 {
            bits_left -= 8;
            result.push((buffer >> bits_left) as u8);
            buffer &= (1 << bits_left) - 1;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_rfc4648_vectors() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "MY======");
        assert_eq!(encode(b"fo"), "MZXQ====");
        assert_eq!(encode(b"foo"), "MZXW6===");
        assert_eq!(encode(b"foob"), "MZXW6YQ=");
        assert_eq!(encode(b"fooba"), "MZXW6YTB");
        assert_eq!(encode(b"foobar"), "MZXW6YTBOI======");
    }

    #[test]
    fn test_single_byte_is_one_padded_group() {
        let encoded = encode(&[0xFF]);
        assert_eq!(encoded.len(), 8);
        assert_eq!(encoded.trim_end_matches('=').len(), 2);
    }

    #[test]
    fn test_five_bytes_need_no_padding() {
        let encoded = encode(&[1, 2, 3, 4, 5]);
        assert_eq!(encoded.len(), 8);
        assert!(!encoded.contains('='));
    }

    #[test]
    fn test_decode_padded() {
        assert_eq!(decode("MZXW6==="), b"foo");
    }

    #[test]
    fn test_decode_is_case_insensitive() {
        assert_eq!(decode("mzxw6ytboi"), b"foobar");
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode("").is_empty());
        assert!(decode("========").is_empty());
    }

    #[test]
    fn test_roundtrip_various_lengths() {
        for input in [&b"A"[..], b"AB", b"ABC", b"ABCD", b"ABCDE", b"Hello, OTP!"] {
            assert_eq!(decode(&encode(input)), input);
        }
    }

    #[test]
    fn test_lenient_decode_skips_junk() {
        // 12 characters -> 7 bytes; the slot the junk took is zero-filled
        assert_eq!(decode("MZXW 6YTB-OI"), b"foobar\0");
        assert_eq!(decode("mzxw6ytboi"), b"foobar");
    }

    #[test]
    fn test_lenient_decode_length_counts_skipped_characters() {
        let clean = decode("JBSWY3DPEHPK3PXP");
        let tampered = decode("JBSWY3DPEHPK3P!!");
        assert_eq!(clean.len(), 10);
        assert_eq!(tampered.len(), 10);
        assert_eq!(&tampered[..8], &clean[..8]);
        assert_eq!(&tampered[8..], &[0, 0]);
        assert_ne!(tampered, clean);
    }

    #[test]
    fn test_lenient_decode_trailing_whitespace() {
        let secret = encode(&[0xAB; 65]);
        let decoded = decode(&format!("{secret}          "));
        assert_eq!(decoded.len(), (104 + 10) * 5 / 8);
        assert_eq!(&decoded[..65], &[0xAB; 65][..]);
        assert!(decoded[65..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_strict_accepts_canonical() {
        assert_eq!(decode_strict("MZXW6YTBOI======").unwrap(), b"foobar");
        assert_eq!(decode_strict("mzxw6ytboi").unwrap(), b"foobar");
    }

    #[test]
    fn test_strict_rejects_invalid_character() {
        let result = decode_strict("MZXW 6YTB");
        assert!(matches!(
            result,
            Err(OtpError::MalformedSecret { position: 4, character: ' ' })
        ));

        assert!(matches!(
            decode_strict("MZXW1YTB"),
            Err(OtpError::MalformedSecret { character: '1', .. })
        ));
    }

    #[test]
    fn test_strict_rejects_inner_padding() {
        assert!(matches!(
            decode_strict("MZ==XW6="),
            Err(OtpError::MalformedSecret { position: 2, character: '=' })
        ));
    }

    #[test]
    fn test_strict_rejects_leftover_bits() {
        assert!(matches!(
            decode_strict("M3======"),
            Err(OtpError::MalformedSecret { position: 1, character: '3' })
        ));
        assert!(matches!(
            decode_strict("MZXW7==="),
            Err(OtpError::MalformedSecret { position: 4, character: '7' })
        ));
        assert!(matches!(
            decode_strict("mzxw7"),
            Err(OtpError::MalformedSecret { character: '7', .. })
        ));
        assert_eq!(decode_strict("MY======").unwrap(), b"f");
        assert_eq!(decode_strict("MZXW6===").unwrap(), b"foo");
    }

    #[test]
    fn test_strict_rejects_excess_padding() {
        assert!(matches!(
            decode_strict("MZ=============="),
            Err(OtpError::InvalidSecretLength(16))
        ));
        assert!(matches!(
            decode_strict("MZXW6YTB========"),
            Err(OtpError::InvalidSecretLength(16))
        ));
        assert!(matches!(decode_strict("========"), Err(OtpError::InvalidSecretLength(8))));
        assert!(decode_strict("").unwrap().is_empty());
    }

    #[test]
    fn test_strict_accepted_text_reencodes_identically() {
        for text in ["MY======", "MZXQ====", "MZXW6===", "MZXW6YQ=", "MZXW6YTB", "MZXW6YTBOI======"] {
            assert_eq!(encode(&decode_strict(text).unwrap()), text);
        }
    }

    #[test]
    fn test_strict_rejects_impossible_lengths() {
        assert!(matches!(decode_strict("MZX"), Err(OtpError::InvalidSecretLength(3))));
        assert!(matches!(decode_strict("MZXW6=="), Err(OtpError::InvalidSecretLength(7))));
    }
}

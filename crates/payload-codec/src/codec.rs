//! Encode/decode between user text and the string stored in the symbol.
//!
//! The password only gates encoding: it must be present and non-empty, but
//! the key that decrypts the payload is generated at random and travels with
//! the ciphertext. Anyone holding the image can read it back.

use fernet::Fernet;
use tracing::debug;

use crate::{CodecError, Result};

/// Separator between the ciphertext token and the key token.
pub const SEPARATOR: char = '|';

/// Plaintext recovered from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub was_protected: bool,
}

/// Turn user text into the string that goes into the QR symbol.
///
/// `None` stores the text verbatim. `Some(password)` requires a non-empty
/// password and returns `<ciphertext>|<key>` under a fresh random key.
pub fn encode(text: &str, password: Option<&str>) -> Result<String> {
    let Some(password) = password else {
        return Ok(text.to_owned());
    };
    if password.is_empty() {
        return Err(CodecError::EmptyPassword);
    }

    let key = Fernet::generate_key();
    let cipher = Fernet::new(&key).ok_or(CodecError::MalformedKey)?;
    let token = cipher.encrypt(text.as_bytes());

    debug!(
        plain_len = text.len(),
        token_len = token.len(),
        "Encrypted payload"
    );
    Ok(format!("{token}{SEPARATOR}{key}"))
}

/// Whether `data` will be treated as a protected payload by [`decode`].
pub fn is_protected(data: &str) -> bool {
    data.contains(SEPARATOR)
}

/// Recover the user text from a scanned payload.
///
/// Payloads without a separator come back unchanged. Otherwise the string is
/// split on the *last* separator, the key token rebuilds the cipher, and the
/// ciphertext must authenticate under it.
pub fn decode(data: &str) -> Result<Decoded> {
    let Some((token, key)) = data.rsplit_once(SEPARATOR) else {
        return Ok(Decoded {
            text: data.to_owned(),
            was_protected: false,
        });
    };

    let cipher = Fernet::new(key).ok_or(CodecError::MalformedKey)?;
    let plain = cipher
        .decrypt(token)
        .map_err(|_| CodecError::Authentication)?;
    let text = String::from_utf8(plain).map_err(|_| CodecError::InvalidUtf8)?;

    Ok(Decoded {
        text,
        was_protected: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn split(payload: &str) -> (&str, &str) {
        payload.rsplit_once(SEPARATOR).expect("separator present")
    }

    #[test]
    fn plain_text_passes_through() {
        let data = encode("hello world", None).unwrap();
        assert_eq!(data, "hello world");

        let decoded = decode(&data).unwrap();
        assert_eq!(decoded.text, "hello world");
        assert!(!decoded.was_protected);
    }

    #[test]
    fn protected_round_trip() {
        let data = encode("hello", Some("secret")).unwrap();
        assert_eq!(data.matches(SEPARATOR).count(), 1);

        let (token, key) = split(&data);
        assert!(!token.is_empty());
        assert!(!key.is_empty());

        let decoded = decode(&data).unwrap();
        assert_eq!(decoded.text, "hello");
        assert!(decoded.was_protected);
    }

    #[test]
    fn round_trip_keeps_unicode_and_separators() {
        let text = "Roll: 101 | Name: Āshā 🌸\nline two";
        let data = encode(text, Some("pw")).unwrap();
        let decoded = decode(&data).unwrap();
        assert_eq!(decoded.text, text);
        assert!(decoded.was_protected);
    }

    #[test]
    fn empty_text_round_trips() {
        let data = encode("", Some("pw")).unwrap();
        assert_eq!(decode(&data).unwrap().text, "");
    }

    #[test]
    fn empty_password_is_rejected() {
        let err = encode("hello", Some("")).unwrap_err();
        assert!(matches!(err, CodecError::EmptyPassword));
        assert!(!err.is_decode_failure());
    }

    #[test]
    fn password_does_not_bind_the_key() {
        let a = encode("same", Some("one")).unwrap();
        let b = encode("same", Some("two")).unwrap();
        assert_ne!(split(&a).1, split(&b).1);
        assert_eq!(decode(&a).unwrap().text, "same");
        assert_eq!(decode(&b).unwrap().text, "same");
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let data = encode("hello", Some("secret")).unwrap();
        let (token, key) = split(&data);

        for i in 0..token.len() {
            let mut bytes = token.as_bytes().to_vec();
            bytes[i] = if bytes[i] == b'A' { b'B' } else { b'A' };
            let mutated = String::from_utf8(bytes).unwrap();
            let payload = format!("{mutated}{SEPARATOR}{key}");

            let err = decode(&payload).unwrap_err();
            assert!(err.is_decode_failure(), "position {i} decoded");
        }
    }

    #[test]
    fn key_from_another_payload_fails_authentication() {
        let a = encode("alpha", Some("pw")).unwrap();
        let b = encode("beta", Some("pw")).unwrap();
        let payload = format!("{}{SEPARATOR}{}", split(&a).0, split(&b).1);
        assert!(matches!(
            decode(&payload).unwrap_err(),
            CodecError::Authentication
        ));
    }

    #[test]
    fn garbled_key_is_malformed() {
        let err = decode("token|not-a-key").unwrap_err();
        assert!(matches!(err, CodecError::MalformedKey));
    }

    #[test]
    fn splits_on_last_separator() {
        let data = encode("x", Some("pw")).unwrap();
        let (token, key) = split(&data);
        let payload = format!("junk|{token}{SEPARATOR}{key}");
        // The extra prefix becomes part of the ciphertext token and breaks it.
        assert!(decode(&payload).is_err());
        assert!(is_protected(&payload));
    }

    #[test]
    fn unencrypted_text_with_separator_is_treated_as_protected() {
        assert!(is_protected("Roll: 101 | Name: Asha"));
        assert!(decode("Roll: 101 | Name: Asha").is_err());
    }

    const TOKEN_ALPHABET: &str =
        "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_=";

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn any_text_round_trips_under_any_password(text in any::<String>(), password in ".+") {
            let data = encode(&text, Some(password.as_str())).unwrap();
            prop_assert_eq!(data.matches(SEPARATOR).count(), 1);
            prop_assert_eq!(
                decode(&data).unwrap(),
                Decoded { text, was_protected: true }
            );
        }

        // Text containing the separator reads as protected, so identity
        // only holds for separator-free text.
        #[test]
        fn separator_free_text_is_identity(text in "[^|]*") {
            let data = encode(&text, None).unwrap();
            prop_assert_eq!(
                decode(&data).unwrap(),
                Decoded { text, was_protected: false }
            );
        }

        #[test]
        fn text_with_separator_never_decodes_as_plain(
            head in "[^|]*",
            tail in "[^|]*",
        ) {
            let text = format!("{head}{SEPARATOR}{tail}");
            let data = encode(&text, None).unwrap();
            prop_assert!(decode(&data).is_err());
        }

        #[test]
        fn single_character_tamper_is_detected(
            text in any::<String>(),
            position in any::<prop::sample::Index>(),
            replacement in any::<prop::sample::Index>(),
        ) {
            let data = encode(&text, Some("pw")).unwrap();
            let (token, key) = split(&data);

            let i = position.index(token.len());
            let original = token.as_bytes()[i];
            let choices: Vec<u8> = TOKEN_ALPHABET.bytes().filter(|&b| b != original).collect();
            let mut bytes = token.as_bytes().to_vec();
            bytes[i] = *replacement.get(&choices);

            let mutated = String::from_utf8(bytes).unwrap();
            let err = decode(&format!("{mutated}{SEPARATOR}{key}")).unwrap_err();
            prop_assert!(err.is_decode_failure());
        }
    }
}

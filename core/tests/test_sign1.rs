#[cfg(test)]
mod tests {
    use cose_core::cbor::{self, bstr, tagged_array};
    use cose_core::constants::{
        AEAD_KEY_LEN, AEAD_NONCE_LEN, AEAD_TAG_LEN, DIGEST_LEN, PROTECTED_ES256, SCALAR_LEN,
        TAG_ENCRYPT0, TAG_SIGN1,
    };
    use cose_core::crypto::ecdsa::signing_key_from_bytes;
    use cose_core::crypto::{CryptoProvider, ProviderError, RustCryptoProvider};
    use cose_core::sign1::*;
    use cose_core::types::{CoseError, Sign1Message};
    use p256::ecdsa::{SigningKey, VerifyingKey};
    use proptest::prelude::*;

    fn keypair(seed: u8) -> (SigningKey, VerifyingKey) {
        let sk = signing_key_from_bytes(&[seed; 32]).unwrap();
        let vk = sk.verifying_key().clone();
        (sk, vk)
    }

    fn message<'a>(aad: &'a [u8], payload: &'a [u8]) -> Sign1Message<'a> {
        Sign1Message {
            protected: &PROTECTED_ES256,
            unprotected: &[],
            external_aad: aad,
            payload,
        }
    }

    fn sign(aad: &[u8], payload: &[u8]) -> (Vec<u8>, VerifyingKey) {
        let (sk, vk) = keypair(7);
        let wire = encode_signed_vec(&RustCryptoProvider, &message(aad, payload), &sk, 512).unwrap();
        (wire, vk)
    }

    #[test]
    fn sign_then_verify() {
        let (wire, vk) = sign(b"TH_2", b"responder identity");
        assert!(verify_signed(&RustCryptoProvider, &wire, &vk, b"TH_2").unwrap());

        let payload = open_signed(&RustCryptoProvider, &wire, &vk, b"TH_2").unwrap();
        assert_eq!(payload, b"responder identity");
    }

    #[test]
    fn wire_shape() {
        let (wire, _) = sign(&[], b"x");
        // tag(18) + array(4)
        assert_eq!(&wire[..2], &[0xd2, 0x84]);

        let decoded = decode_sign1(&wire).unwrap();
        assert_eq!(decoded.protected, PROTECTED_ES256);
        assert!(decoded.unprotected.is_empty());
        assert_eq!(decoded.payload, b"x");
        assert_eq!(decoded.signature.len(), 64);
    }

    #[test]
    fn external_aad_is_not_transmitted() {
        let (wire, _) = sign(b"out-of-band-aad", b"p");
        let needle = b"out-of-band-aad";
        assert!(!wire.windows(needle.len()).any(|w| w == needle));
    }

    #[test]
    fn wrong_aad_or_key_is_false() {
        let (wire, vk) = sign(b"TH_2", b"payload");
        assert!(!verify_signed(&RustCryptoProvider, &wire, &vk, b"TH_3").unwrap());
        assert!(!verify_signed(&RustCryptoProvider, &wire, &vk, &[]).unwrap());

        let (_, other_vk) = keypair(9);
        assert!(!verify_signed(&RustCryptoProvider, &wire, &other_vk, b"TH_2").unwrap());

        assert_eq!(
            open_signed(&RustCryptoProvider, &wire, &vk, b"TH_3"),
            Err(CoseError::SignatureInvalid)
        );
    }

    #[test]
    fn tampered_fields_are_false() {
        let (wire, vk) = sign(b"aad", b"payload bytes");
        let decoded = decode_sign1(&wire).unwrap();

        let mut d = decoded.clone();
        d.payload[0] ^= 0x01;
        assert!(!verify_decoded(&RustCryptoProvider, &d, &vk, b"aad").unwrap());

        let mut d = decoded.clone();
        d.protected[2] ^= 0x80;
        assert!(!verify_decoded(&RustCryptoProvider, &d, &vk, b"aad").unwrap());

        let mut d = decoded;
        d.signature[63] ^= 0x01;
        assert!(!verify_decoded(&RustCryptoProvider, &d, &vk, b"aad").unwrap());
    }

    #[test]
    fn unprotected_header_is_not_covered() {
        let (sk, vk) = keypair(3);
        let msg = Sign1Message { unprotected: &[0xa0], ..message(&[], b"p") };
        let wire = encode_signed_vec(&RustCryptoProvider, &msg, &sk, 512).unwrap();
        let mut decoded = decode_sign1(&wire).unwrap();
        decoded.unprotected.clear();
        assert!(verify_decoded(&RustCryptoProvider, &decoded, &vk, &[]).unwrap());
    }

    #[test]
    fn wrong_arity_is_malformed() {
        let three = tagged_array(TAG_SIGN1, vec![bstr(&[]), bstr(&[]), bstr(&[])]);
        let wire = cbor::encode_bounded(&three, 64).unwrap();
        assert!(matches!(decode_sign1(&wire), Err(CoseError::DecodingMalformed(_))));

        let five = tagged_array(TAG_SIGN1, vec![bstr(&[]); 5]);
        let wire = cbor::encode_bounded(&five, 64).unwrap();
        assert!(matches!(decode_sign1(&wire), Err(CoseError::DecodingMalformed(_))));
    }

    #[test]
    fn wrong_tag_or_types_are_malformed() {
        let (wire, _) = sign(&[], b"p");
        let mut retagged = wire.clone();
        retagged[0] = 0xc0 | TAG_ENCRYPT0 as u8;
        assert!(matches!(decode_sign1(&retagged), Err(CoseError::DecodingMalformed(_))));

        let text_payload = tagged_array(
            TAG_SIGN1,
            vec![bstr(&[]), bstr(&[]), cbor::tstr("p"), bstr(&[0u8; 64])],
        );
        let wire = cbor::encode_bounded(&text_payload, 128).unwrap();
        assert!(matches!(decode_sign1(&wire), Err(CoseError::DecodingMalformed(_))));

        let short_sig = tagged_array(TAG_SIGN1, vec![bstr(&[]), bstr(&[]), bstr(b"p"), bstr(&[0u8; 63])]);
        let wire = cbor::encode_bounded(&short_sig, 128).unwrap();
        assert!(matches!(decode_sign1(&wire), Err(CoseError::DecodingMalformed(_))));
    }

    #[test]
    fn truncated_and_trailing_are_malformed() {
        let (wire, _) = sign(&[], b"payload");
        for cut in [0, 1, 5, wire.len() - 1] {
            assert!(matches!(decode_sign1(&wire[..cut]), Err(CoseError::DecodingMalformed(_))));
        }
        let mut longer = wire.clone();
        longer.push(0x00);
        assert!(matches!(decode_sign1(&longer), Err(CoseError::DecodingMalformed(_))));
    }

    #[test]
    fn lying_payload_length_is_malformed() {
        // 18([h'a10126', h'', h'<claims 2^40 bytes>' ...])
        let mut wire = hex::decode("d28443a1012640").unwrap();
        wire.extend_from_slice(&[0x5b, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00]);
        wire.extend_from_slice(&[0u8; 66]);
        assert!(matches!(decode_sign1(&wire), Err(CoseError::DecodingMalformed(_))));

        // indefinite-length payload
        let mut wire = hex::decode("d28443a1012640").unwrap();
        wire.extend_from_slice(&[0x5f, 0x41, 0x00, 0xff, 0x58, 0x40]);
        wire.extend_from_slice(&[0u8; 64]);
        assert!(matches!(decode_sign1(&wire), Err(CoseError::DecodingMalformed(_))));
    }

    #[test]
    fn undersized_output_is_overflow() {
        let (sk, _) = keypair(7);
        let mut out = [0u8; 40];
        let err = encode_signed(&RustCryptoProvider, &message(&[], b"p"), &sk, &mut out).unwrap_err();
        assert_eq!(err, CoseError::EncodingOverflow { capacity: 40 });
    }

    /// Provider that signs with a fixed DER encoding and accepts exactly the
    /// scalars it expects.
    struct FixedDer {
        der: Vec<u8>,
        r: [u8; SCALAR_LEN],
        s: [u8; SCALAR_LEN],
    }

    impl CryptoProvider for FixedDer {
        type SigningKey = ();
        type VerifyingKey = ();

        fn sha256(&self, data: &[u8]) -> [u8; DIGEST_LEN] {
            RustCryptoProvider.sha256(data)
        }

        fn ecdsa_sign(&self, _: &[u8; DIGEST_LEN], _: &()) -> Result<Vec<u8>, ProviderError> {
            Ok(self.der.clone())
        }

        fn ecdsa_verify(
            &self,
            r: &[u8; SCALAR_LEN],
            s: &[u8; SCALAR_LEN],
            _: &[u8; DIGEST_LEN],
            _: &(),
        ) -> Result<bool, ProviderError> {
            Ok(r == &self.r && s == &self.s)
        }

        fn aead_seal(
            &self,
            _: &[u8; AEAD_KEY_LEN],
            _: &[u8; AEAD_NONCE_LEN],
            _: &[u8],
            _: &mut [u8],
        ) -> Result<[u8; AEAD_TAG_LEN], ProviderError> {
            Err(ProviderError::Seal)
        }

        fn aead_open(
            &self,
            _: &[u8; AEAD_KEY_LEN],
            _: &[u8; AEAD_NONCE_LEN],
            _: &[u8],
            _: &mut [u8],
            _: &[u8; AEAD_TAG_LEN],
        ) -> Result<(), ProviderError> {
            Err(ProviderError::TagMismatch)
        }

        fn hkdf_sha256(&self, _: &[u8], _: &[u8], _: &[u8], _: &mut [u8]) -> Result<(), ProviderError> {
            Err(ProviderError::InvalidKey)
        }
    }

    fn der(r: &[u8], s: &[u8]) -> Vec<u8> {
        let mut out = vec![0x30, (4 + r.len() + s.len()) as u8, 0x02, r.len() as u8];
        out.extend_from_slice(r);
        out.extend_from_slice(&[0x02, s.len() as u8]);
        out.extend_from_slice(s);
        out
    }

    #[test]
    fn short_and_signed_components_normalize() {
        // r has 31 significant bytes, s carries a sign byte.
        let mut s_der = vec![0x00];
        s_der.extend_from_slice(&[0xf0; 32]);

        let mut r = [0u8; 32];
        r[1..].copy_from_slice(&[0x41; 31]);
        let provider = FixedDer { der: der(&[0x41; 31], &s_der), r, s: [0xf0; 32] };

        let wire = encode_signed_vec(&provider, &message(&[], b"p"), &(), 512).unwrap();
        let decoded = decode_sign1(&wire).unwrap();
        assert_eq!(&decoded.signature[..32], &r);
        assert_eq!(&decoded.signature[32..], &[0xf0; 32]);
        assert!(verify_signed(&provider, &wire, &(), &[]).unwrap());
    }

    #[test]
    fn out_of_envelope_der_is_rejected() {
        let provider = FixedDer {
            der: der(&[0x41; 34], &[0x01; 32]),
            r: [0; 32],
            s: [0; 32],
        };
        let mut out = [0u8; 512];
        assert!(matches!(
            encode_signed(&provider, &message(&[], b"p"), &(), &mut out),
            Err(CoseError::DecodingMalformed(_))
        ));

        let lying = FixedDer { der: vec![0x30, 0x44, 0x02, 0x20, 0x01], r: [0; 32], s: [0; 32] };
        assert!(encode_signed(&lying, &message(&[], b"p"), &(), &mut out).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_sign_verify_roundtrip(
            seed in 1u8..=200,
            aad in proptest::collection::vec(any::<u8>(), 0..64),
            payload in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let (sk, vk) = keypair(seed);
            let wire = encode_signed_vec(&RustCryptoProvider, &message(&aad, &payload), &sk, 512).unwrap();
            prop_assert!(verify_signed(&RustCryptoProvider, &wire, &vk, &aad).unwrap());
        }
    }
}

#[cfg(test)]
mod tests {
    use cose_core::cbor::{self, Value};
    use cose_core::constants::{context, PROTECTED_AES_CCM_64_64_128, PROTECTED_ES256};
    use cose_core::structures::*;
    use cose_core::types::{CoseAlgorithm, CoseError};
    use proptest::prelude::*;

    #[test]
    fn enc_structure_exact_bytes() {
        let bytes = build_enc_structure_vec(&PROTECTED_AES_CCM_64_64_128, &[]).unwrap();
        assert_eq!(hex::encode(bytes), "8368456e63727970743043a1010c40");
    }

    #[test]
    fn sig_structure_exact_bytes() {
        let bytes = build_sig_structure_vec(context::SIGNATURE1, &PROTECTED_ES256, &[0xaa], b"hi").unwrap();
        // ["Signature1", h'a10126', h'aa', h'6869']
        assert_eq!(
            hex::encode(bytes),
            "846a5369676e61747572653143a1012641aa426869"
        );
    }

    #[test]
    fn kdf_context_exact_bytes() {
        let bytes = build_kdf_context_vec("A", 128, &[0x01, 0x02]).unwrap();
        assert_eq!(
            hex::encode(bytes),
            "846141 83f6f6f6 83f6f6f6 83188040420102".replace(' ', "")
        );
    }

    #[test]
    fn kdf_context_decodes_back() {
        let bytes = build_kdf_context_vec("AES-CCM-16-64-128", 128, b"transcript").unwrap();
        let value = cbor::decode_value(&bytes).unwrap();
        let items = cbor::expect_array(&value, 4).unwrap();

        assert_eq!(cbor::as_tstr(&items[0], "alg").unwrap(), "AES-CCM-16-64-128");
        for party in &items[1..3] {
            let nulls = cbor::expect_array(party, 3).unwrap();
            assert!(nulls.iter().all(|v| matches!(v, Value::Null)));
        }

        let supp = cbor::expect_array(&items[3], 3).unwrap();
        assert_eq!(cbor::as_int(&supp[0], "keylen").unwrap(), 128);
        assert!(cbor::as_bstr(&supp[1], "protected").unwrap().is_empty());
        assert_eq!(cbor::as_bstr(&supp[2], "other").unwrap(), b"transcript");
    }

    #[test]
    fn undersized_buffer_is_overflow() {
        let mut out = [0u8; 8];
        let err = build_enc_structure(&PROTECTED_AES_CCM_64_64_128, &[], &mut out).unwrap_err();
        assert_eq!(err, CoseError::EncodingOverflow { capacity: 8 });

        let mut out = [0u8; 17];
        assert!(matches!(
            build_kdf_context("A", 128, &[1, 2], &mut out),
            Err(CoseError::EncodingOverflow { .. })
        ));

        // Exactly enough room succeeds.
        let mut out = [0u8; 18];
        assert_eq!(build_kdf_context("A", 128, &[1, 2], &mut out).unwrap(), 18);
    }

    #[test]
    fn protected_header_constants_match_encoder() {
        assert_eq!(protected_header(CoseAlgorithm::AesCcm64_64_128).unwrap(), PROTECTED_AES_CCM_64_64_128);
        assert_eq!(protected_header(CoseAlgorithm::Es256).unwrap(), PROTECTED_ES256);
    }

    #[test]
    fn header_algorithm_reads_label() {
        assert_eq!(header_algorithm(&PROTECTED_ES256).unwrap(), CoseAlgorithm::Es256);
        assert_eq!(
            header_algorithm(&PROTECTED_AES_CCM_64_64_128).unwrap(),
            CoseAlgorithm::AesCcm64_64_128
        );

        // {1: 1} is A128GCM, not supported here.
        assert!(matches!(header_algorithm(&[0xa1, 0x01, 0x01]), Err(CoseError::DecodingMalformed(_))));
        // empty map
        assert!(header_algorithm(&[0xa0]).is_err());
        // not a map
        assert!(header_algorithm(&[0x40]).is_err());
    }

    proptest! {
        #[test]
        fn prop_kdf_context_embeds_other_verbatim(
            alg in "[A-Za-z0-9-]{1,24}",
            key_len in 1u32..=4096,
            other in proptest::collection::vec(any::<u8>(), 0..128),
        ) {
            let bytes = build_kdf_context_vec(&alg, key_len, &other).unwrap();
            prop_assert!(bytes.ends_with(&other));

            let value = cbor::decode_value(&bytes).unwrap();
            let items = cbor::expect_array(&value, 4).unwrap();
            prop_assert_eq!(cbor::as_tstr(&items[0], "alg").unwrap(), alg.as_str());
            let supp = cbor::expect_array(&items[3], 3).unwrap();
            prop_assert_eq!(cbor::as_int(&supp[0], "keylen").unwrap(), i128::from(key_len));
            prop_assert_eq!(cbor::as_bstr(&supp[2], "other").unwrap(), other.as_slice());
        }

        #[test]
        fn prop_sig_structure_is_deterministic(
            aad in proptest::collection::vec(any::<u8>(), 0..64),
            payload in proptest::collection::vec(any::<u8>(), 0..256),
        ) {
            let a = build_sig_structure_vec(context::SIGNATURE1, &PROTECTED_ES256, &aad, &payload).unwrap();
            let b = build_sig_structure_vec(context::SIGNATURE1, &PROTECTED_ES256, &aad, &payload).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}

//! Property-based tests.

use proptest::prelude::*;
use rsa_keyconv::{encoding, pem, xml, Envelope, KeyMaterial};

prop_compose! {
    /// Arbitrary field bytes, leading zeroes allowed.
    fn field_bytes()(bytes in proptest::collection::vec(any::<u8>(), 1..48)) -> Vec<u8> {
        bytes
    }
}

prop_compose! {
    /// Arbitrary field bytes in canonical form (no leading zero).
    fn canonical_field_bytes()(mut bytes in proptest::collection::vec(any::<u8>(), 1..48)) -> Vec<u8> {
        if bytes[0] == 0 {
            bytes[0] = 1;
        }
        bytes
    }
}

prop_compose! {
    fn private_material()(
        n in field_bytes(),
        e in field_bytes(),
        d in field_bytes(),
        p in field_bytes(),
        q in field_bytes(),
        dp in field_bytes(),
        dq in field_bytes(),
        qinv in field_bytes(),
    ) -> KeyMaterial {
        KeyMaterial::private(n, e, d, p, q, dp, dq, qinv)
    }
}

prop_compose! {
    fn canonical_private_material()(
        n in canonical_field_bytes(),
        e in canonical_field_bytes(),
        d in canonical_field_bytes(),
        p in canonical_field_bytes(),
        q in canonical_field_bytes(),
        dp in canonical_field_bytes(),
        dq in canonical_field_bytes(),
        qinv in canonical_field_bytes(),
    ) -> KeyMaterial {
        KeyMaterial::private(n, e, d, p, q, dp, dq, qinv)
    }
}

proptest! {
    #[test]
    fn xml_private_round_trip(material in private_material()) {
        let encoded = xml::encode_private(&material).unwrap();
        prop_assert_eq!(xml::decode(&encoded).unwrap(), material);
    }

    #[test]
    fn xml_public_round_trip(n in field_bytes(), e in field_bytes()) {
        let material = KeyMaterial::public(n, e);
        let encoded = xml::encode_public(&material);
        prop_assert_eq!(xml::decode(&encoded).unwrap(), material);
    }

    // The container codec canonicalizes on encode, so round trips are exact
    // for material whose fields carry no leading zero bytes.
    #[test]
    fn pkcs1_round_trip(material in canonical_private_material()) {
        let encoded = encoding::encode_pkcs1_private(&material).unwrap();
        prop_assert_eq!(encoding::decode_pkcs1_private(&encoded).unwrap(), material);
    }

    #[test]
    fn pkcs8_round_trip(material in canonical_private_material()) {
        let encoded = encoding::encode_pkcs8_private(&material).unwrap();
        prop_assert_eq!(encoding::decode_pkcs8_private(&encoded).unwrap(), material);
    }

    #[test]
    fn public_container_round_trip(
        n in canonical_field_bytes(),
        e in canonical_field_bytes(),
    ) {
        let material = KeyMaterial::public(n, e);
        let encoded = encoding::encode_public(&material).unwrap();
        prop_assert_eq!(encoding::decode_public(&encoded).unwrap(), material);
    }

    #[test]
    fn pem_wrap_unwrap_round_trip(payload in "[A-Za-z0-9+/]{0,300}") {
        for kind in [Envelope::Pkcs1Private, Envelope::Pkcs8Private, Envelope::Public] {
            let wrapped = pem::wrap(&payload, kind);
            prop_assert_eq!(pem::unwrap(&wrapped, kind), payload.clone());
            prop_assert_eq!(pem::wrap(&pem::unwrap(&wrapped, kind), kind), wrapped.clone());
        }
    }

    #[test]
    fn unwrap_is_idempotent(payload in "[A-Za-z0-9+/]{0,300}") {
        let wrapped = pem::wrap(&payload, Envelope::Public);
        let once = pem::unwrap(&wrapped, Envelope::Public);
        prop_assert_eq!(pem::unwrap(&once, Envelope::Public), once.clone());
    }
}

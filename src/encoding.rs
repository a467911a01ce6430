//! PKCS#1 and PKCS#8 container encoding support.
//!
//! The ASN.1 structures themselves are delegated to the `pkcs1`, `pkcs8` and
//! `spki` crates; this module owns the field mapping in and out of
//! [`KeyMaterial`], the base64 payload handling and the envelope checks.

use base64ct::{Base64, Encoding};
use pkcs1::der::{
    asn1::{AnyRef, BitStringRef},
    Decode, Encode,
};
use pkcs8::{AlgorithmIdentifierRef, ObjectIdentifier, PrivateKeyInfo};
use spki::SubjectPublicKeyInfoRef;
use zeroize::Zeroizing;

use crate::errors::{Error, Result};
use crate::material::KeyMaterial;
use crate::pem::{self, Envelope};

/// ObjectID for the RSA PSS keys
pub const ID_RSASSA_PSS: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.10");

/// Verify that the `AlgorithmIdentifier` for a key is correct.
fn verify_algorithm_id(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<()> {
    match algorithm.oid {
        pkcs1::ALGORITHM_OID => match algorithm.parameters {
            None => Ok(()),
            Some(params) if params == AnyRef::NULL => Ok(()),
            Some(_) => Err(spki::Error::KeyMalformed.into()),
        },
        ID_RSASSA_PSS => {
            if algorithm.parameters.is_some() {
                return Err(spki::Error::KeyMalformed.into());
            }
            Ok(())
        }
        oid => Err(spki::Error::OidUnknown { oid }.into()),
    }
}

/// Decodes a PKCS#1 private key from PEM-wrapped or raw-base64 text.
pub fn decode_pkcs1_private(text: &str) -> Result<KeyMaterial> {
    let der = payload(text, Envelope::Pkcs1Private)?;
    let key = pkcs1::RsaPrivateKey::from_der(&der)?;
    material_from_pkcs1(&key)
}

/// Decodes a PKCS#8 private key from PEM-wrapped or raw-base64 text.
///
/// The PKCS#8 wrapper is unpacked via the external decoder; the PKCS1-shaped
/// key inside it supplies all eight fields.
pub fn decode_pkcs8_private(text: &str) -> Result<KeyMaterial> {
    let der = payload(text, Envelope::Pkcs8Private)?;
    let info = PrivateKeyInfo::from_der(&der)?;
    verify_algorithm_id(&info.algorithm)?;

    let key = pkcs1::RsaPrivateKey::from_der(info.private_key)?;
    material_from_pkcs1(&key)
}

/// Decodes a SubjectPublicKeyInfo public key from PEM-wrapped or raw-base64
/// text.
pub fn decode_public(text: &str) -> Result<KeyMaterial> {
    let der = payload(text, Envelope::Public)?;
    let info = SubjectPublicKeyInfoRef::from_der(&der)?;
    verify_algorithm_id(&info.algorithm)?;

    let raw = info
        .subject_public_key
        .as_bytes()
        .ok_or(spki::Error::KeyMalformed)?;
    let key = pkcs1::RsaPublicKey::from_der(raw)?;

    Ok(KeyMaterial::public(
        key.modulus.as_bytes().to_vec(),
        key.public_exponent.as_bytes().to_vec(),
    ))
}

/// Encodes private material as a PEM-wrapped PKCS#1 key.
pub fn encode_pkcs1_private(material: &KeyMaterial) -> Result<String> {
    let der = Zeroizing::new(pkcs1_private_der(material)?);
    Ok(pem::wrap(
        &Base64::encode_string(&der),
        Envelope::Pkcs1Private,
    ))
}

/// Encodes private material as a PEM-wrapped PKCS#8 key.
pub fn encode_pkcs8_private(material: &KeyMaterial) -> Result<String> {
    let pkcs1_der = Zeroizing::new(pkcs1_private_der(material)?);
    let info = PrivateKeyInfo {
        algorithm: pkcs1::ALGORITHM_ID,
        private_key: pkcs1_der.as_slice(),
        public_key: None,
    };
    let der = Zeroizing::new(info.to_der()?);
    Ok(pem::wrap(
        &Base64::encode_string(&der),
        Envelope::Pkcs8Private,
    ))
}

/// Encodes the public fields as a PEM-wrapped SubjectPublicKeyInfo key.
pub fn encode_public(material: &KeyMaterial) -> Result<String> {
    let key = pkcs1::RsaPublicKey {
        modulus: uint(material.n())?,
        public_exponent: uint(material.e())?,
    };
    let raw = key.to_der()?;

    let info = SubjectPublicKeyInfoRef {
        algorithm: pkcs1::ALGORITHM_ID,
        subject_public_key: BitStringRef::new(0, &raw)?,
    };
    Ok(pem::wrap(&Base64::encode_string(&info.to_der()?), Envelope::Public))
}

/// Rebuilds key material from PKCS#1 DER bytes, as produced by the external
/// key-pair generation primitive.
pub(crate) fn material_from_pkcs1_der(der: &[u8]) -> Result<KeyMaterial> {
    let key = pkcs1::RsaPrivateKey::from_der(der)?;
    material_from_pkcs1(&key)
}

fn material_from_pkcs1(key: &pkcs1::RsaPrivateKey<'_>) -> Result<KeyMaterial> {
    // Multi-prime RSA keys not currently supported
    if key.version() != pkcs1::Version::TwoPrime {
        return Err(pkcs1::Error::Version.into());
    }

    Ok(KeyMaterial::private(
        key.modulus.as_bytes().to_vec(),
        key.public_exponent.as_bytes().to_vec(),
        key.private_exponent.as_bytes().to_vec(),
        key.prime1.as_bytes().to_vec(),
        key.prime2.as_bytes().to_vec(),
        key.exponent1.as_bytes().to_vec(),
        key.exponent2.as_bytes().to_vec(),
        key.coefficient.as_bytes().to_vec(),
    ))
}

fn pkcs1_private_der(material: &KeyMaterial) -> Result<Vec<u8>> {
    let parts = material.private_parts()?;

    let key = pkcs1::RsaPrivateKey {
        modulus: uint(material.n())?,
        public_exponent: uint(material.e())?,
        private_exponent: uint(&parts.d)?,
        prime1: uint(&parts.p)?,
        prime2: uint(&parts.q)?,
        exponent1: uint(&parts.dp)?,
        exponent2: uint(&parts.dq)?,
        coefficient: uint(&parts.qinv)?,
        other_prime_infos: None,
    };
    Ok(key.to_der()?)
}

/// Builds a DER unsigned integer, canonicalizing leading zero bytes away the
/// way an unsigned big-integer constructor would.
fn uint(bytes: &[u8]) -> Result<pkcs1::UintRef<'_>> {
    let mut bytes = bytes;
    while bytes.len() > 1 && bytes[0] == 0 {
        bytes = &bytes[1..];
    }
    Ok(pkcs1::UintRef::new(bytes)?)
}

/// Strips the envelope (when present) and base64-decodes the payload.
///
/// Input beginning with a different envelope than requested is rejected
/// rather than silently decoded.
fn payload(text: &str, kind: Envelope) -> Result<Vec<u8>> {
    let text = text.trim();
    if text.starts_with("-----BEGIN ") && !kind.matches(text) {
        return Err(Error::EnvelopeMismatch {
            expected: kind.label(),
        });
    }
    Ok(Base64::decode_vec(&pem::unwrap(text, kind))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_strips_leading_zeroes() {
        assert_eq!(uint(&[0x00, 0x00, 0xc4]).unwrap().as_bytes(), &[0xc4]);
        assert_eq!(uint(&[0xc4, 0x00]).unwrap().as_bytes(), &[0xc4, 0x00]);
    }

    #[test]
    fn wrong_envelope_is_rejected() {
        let pem = pem::wrap("AQAB", Envelope::Public);
        assert!(matches!(
            payload(&pem, Envelope::Pkcs1Private),
            Err(Error::EnvelopeMismatch {
                expected: "RSA PRIVATE KEY"
            })
        ));
    }

    #[test]
    fn bare_base64_payload_is_accepted() {
        assert_eq!(
            payload("AQAB", Envelope::Pkcs8Private).unwrap(),
            vec![0x01, 0x00, 0x01]
        );
    }

    #[test]
    fn garbage_base64_is_format_invalid() {
        assert!(matches!(
            payload("not base64!", Envelope::Public),
            Err(Error::FormatInvalid(_))
        ));
    }
}

//! Pairwise conversions between the textual key representations.
//!
//! Each operation decodes the source format into [`KeyMaterial`] and
//! re-encodes it in the target format; no field is invented or dropped in
//! between, so converting between any two private formats is
//! information-preserving for the full CRT field set.
//!
//! [`KeyMaterial`]: crate::material::KeyMaterial

use crate::encoding;
use crate::errors::Result;
use crate::xml;

/// Converts a public key from PEM (SubjectPublicKeyInfo) to XML form.
///
/// Accepts PEM-wrapped or raw-base64 input.
pub fn public_pem_to_xml(public_key: &str) -> Result<String> {
    let material = encoding::decode_public(public_key)?;
    Ok(xml::encode_public(&material))
}

/// Converts a public key from XML to PEM (SubjectPublicKeyInfo) form.
pub fn public_xml_to_pem(public_key: &str) -> Result<String> {
    let material = xml::decode(public_key)?;
    encoding::encode_public(&material)
}

/// Converts a private key from PEM PKCS#1 to XML form.
pub fn private_pkcs1_to_xml(private_key: &str) -> Result<String> {
    let material = encoding::decode_pkcs1_private(private_key)?;
    xml::encode_private(&material)
}

/// Converts a private key from XML to PEM PKCS#1 form.
pub fn private_xml_to_pkcs1(private_key: &str) -> Result<String> {
    let material = xml::decode(private_key)?;
    encoding::encode_pkcs1_private(&material)
}

/// Converts a private key from PEM PKCS#8 to XML form.
pub fn private_pkcs8_to_xml(private_key: &str) -> Result<String> {
    let material = encoding::decode_pkcs8_private(private_key)?;
    xml::encode_private(&material)
}

/// Converts a private key from XML to PEM PKCS#8 form.
pub fn private_xml_to_pkcs8(private_key: &str) -> Result<String> {
    let material = xml::decode(private_key)?;
    encoding::encode_pkcs8_private(&material)
}

/// Converts a private key from PEM PKCS#1 to PEM PKCS#8 form.
pub fn private_pkcs1_to_pkcs8(private_key: &str) -> Result<String> {
    let material = encoding::decode_pkcs1_private(private_key)?;
    encoding::encode_pkcs8_private(&material)
}

/// Converts a private key from PEM PKCS#8 to PEM PKCS#1 form.
pub fn private_pkcs8_to_pkcs1(private_key: &str) -> Result<String> {
    let material = encoding::decode_pkcs8_private(private_key)?;
    encoding::encode_pkcs1_private(&material)
}

//! Key pair generation in any of the supported textual representations.

use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::rand_core::CryptoRngCore;
use rsa::RsaPrivateKey;

use crate::encoding;
use crate::errors::{Error, Result};
use crate::pem::{self, Envelope};
use crate::xml;

/// Target representation for a generated key pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFormat {
    /// `<RSAKeyValue>` element trees.
    Xml,
    /// PKCS#1 private key, SubjectPublicKeyInfo public key.
    Pkcs1,
    /// PKCS#8 private key, SubjectPublicKeyInfo public key.
    Pkcs8,
}

/// Generates a fresh RSA key pair and encodes it in the requested format.
///
/// The modulus length is passed straight to the underlying primitive, which
/// rejects unsupported sizes ([`Error::InvalidKeySize`]); typical values are
/// 1024, 2048 and 4096. With `wrapped == false` the PEM envelopes of the
/// PKCS#1/PKCS#8 representations are stripped; XML output is never wrapped.
///
/// Returns `(private_key, public_key)` in that order. The public key is
/// emitted in SubjectPublicKeyInfo form for both PKCS formats.
pub fn generate_key_pair<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    format: KeyFormat,
    bits: usize,
    wrapped: bool,
) -> Result<(String, String)> {
    let key = RsaPrivateKey::new(rng, bits).map_err(|source| Error::InvalidKeySize { bits, source })?;

    // The fresh key re-enters through the external PKCS#1 encoder, so the
    // container codec is the single source of field extraction.
    let der = key.to_pkcs1_der()?;
    let material = encoding::material_from_pkcs1_der(der.as_bytes())?;
    let public = material.public_half();

    match format {
        KeyFormat::Xml => Ok((xml::encode_private(&material)?, xml::encode_public(&public))),
        KeyFormat::Pkcs1 => {
            let private_text = encoding::encode_pkcs1_private(&material)?;
            let public_text = encoding::encode_public(&public)?;
            Ok(strip_envelopes(
                private_text,
                public_text,
                Envelope::Pkcs1Private,
                wrapped,
            ))
        }
        KeyFormat::Pkcs8 => {
            let private_text = encoding::encode_pkcs8_private(&material)?;
            let public_text = encoding::encode_public(&public)?;
            Ok(strip_envelopes(
                private_text,
                public_text,
                Envelope::Pkcs8Private,
                wrapped,
            ))
        }
    }
}

fn strip_envelopes(
    private_text: String,
    public_text: String,
    private_kind: Envelope,
    wrapped: bool,
) -> (String, String) {
    if wrapped {
        (private_text, public_text)
    } else {
        (
            pem::unwrap(&private_text, private_kind),
            pem::unwrap(&public_text, Envelope::Public),
        )
    }
}

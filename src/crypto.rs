//! RSA runtime operations over loaded key material.
//!
//! Everything cryptographic is delegated to the `rsa` crate; this module
//! only turns [`KeyMaterial`] into runtime key handles and shuttles strings
//! in and out as base64.

use base64ct::{Base64, Encoding};
use rsa::rand_core::CryptoRngCore;
use rsa::sha2::Sha256;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::{pkcs1v15, pss, BigUint, Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};

use crate::errors::{Error, Result};
use crate::material::KeyMaterial;

/// Padding schemes for encryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionPadding {
    /// PKCS#1 v1.5 encryption padding.
    Pkcs1v15,
    /// OAEP with SHA-256.
    OaepSha256,
}

/// Padding schemes for signatures. The message digest is SHA-256.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignaturePadding {
    /// PKCS#1 v1.5 signature padding.
    Pkcs1v15Sha256,
    /// RSASSA-PSS.
    PssSha256,
}

/// Builds a runtime public-key handle from key material.
pub fn to_public_key(material: &KeyMaterial) -> Result<RsaPublicKey> {
    let n = BigUint::from_bytes_be(material.n());
    let e = BigUint::from_bytes_be(material.e());
    Ok(RsaPublicKey::new(n, e)?)
}

/// Builds a runtime private-key handle from key material.
///
/// Fails with [`Error::MaterialIncomplete`] on public-only material. The
/// primitive re-derives its CRT precomputation; consistency of the supplied
/// fields beyond that is its concern, not re-checked here.
pub fn to_private_key(material: &KeyMaterial) -> Result<RsaPrivateKey> {
    let parts = material.private_parts()?;

    let mut key = RsaPrivateKey::from_components(
        BigUint::from_bytes_be(material.n()),
        BigUint::from_bytes_be(material.e()),
        BigUint::from_bytes_be(&parts.d),
        vec![
            BigUint::from_bytes_be(&parts.p),
            BigUint::from_bytes_be(&parts.q),
        ],
    )?;
    key.precompute()?;
    Ok(key)
}

/// Encrypt/decrypt/sign/verify over a loaded key pair.
///
/// Either half may be absent; operations needing the missing half fail with
/// [`Error::MaterialIncomplete`]. When only private material is supplied the
/// public half is derived from it.
pub struct RsaCrypto {
    public: Option<RsaPublicKey>,
    private: Option<RsaPrivateKey>,
}

impl RsaCrypto {
    /// Loads runtime keys from the supplied material.
    pub fn new(public: Option<&KeyMaterial>, private: Option<&KeyMaterial>) -> Result<Self> {
        let private_key = private.map(to_private_key).transpose()?;
        let public_key = match public {
            Some(material) => Some(to_public_key(material)?),
            None => private_key.as_ref().map(RsaPublicKey::from),
        };

        if public_key.is_none() && private_key.is_none() {
            return Err(Error::MaterialIncomplete("Modulus"));
        }

        Ok(Self {
            public: public_key,
            private: private_key,
        })
    }

    /// Encrypts a UTF-8 string with the public key, returning base64.
    pub fn encrypt<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        data: &str,
        padding: EncryptionPadding,
    ) -> Result<String> {
        let key = self.public_key()?;
        let ciphertext = match padding {
            EncryptionPadding::Pkcs1v15 => key.encrypt(rng, Pkcs1v15Encrypt, data.as_bytes())?,
            EncryptionPadding::OaepSha256 => {
                key.encrypt(rng, Oaep::new::<Sha256>(), data.as_bytes())?
            }
        };
        Ok(Base64::encode_string(&ciphertext))
    }

    /// Decrypts base64 ciphertext with the private key, returning the UTF-8
    /// plaintext.
    pub fn decrypt(&self, data: &str, padding: EncryptionPadding) -> Result<String> {
        let key = self.private_key()?;
        let ciphertext = Base64::decode_vec(data)?;
        let plaintext = match padding {
            EncryptionPadding::Pkcs1v15 => key.decrypt(Pkcs1v15Encrypt, &ciphertext)?,
            EncryptionPadding::OaepSha256 => key.decrypt(Oaep::new::<Sha256>(), &ciphertext)?,
        };
        Ok(String::from_utf8(plaintext)?)
    }

    /// Signs a UTF-8 string with the private key, returning the signature as
    /// base64.
    pub fn sign<R: CryptoRngCore>(
        &self,
        rng: &mut R,
        data: &str,
        padding: SignaturePadding,
    ) -> Result<String> {
        let key = self.private_key()?.clone();
        let signature = match padding {
            SignaturePadding::Pkcs1v15Sha256 => pkcs1v15::SigningKey::<Sha256>::new(key)
                .try_sign_with_rng(rng, data.as_bytes())?
                .to_vec(),
            SignaturePadding::PssSha256 => pss::BlindedSigningKey::<Sha256>::new(key)
                .try_sign_with_rng(rng, data.as_bytes())?
                .to_vec(),
        };
        Ok(Base64::encode_string(&signature))
    }

    /// Verifies a base64 signature over a UTF-8 string with the public key.
    ///
    /// A signature that parses but does not match yields `Ok(false)`.
    pub fn verify(&self, data: &str, signature: &str, padding: SignaturePadding) -> Result<bool> {
        let key = self.public_key()?.clone();
        let raw = Base64::decode_vec(signature)?;

        let accepted = match padding {
            SignaturePadding::Pkcs1v15Sha256 => {
                let signature = pkcs1v15::Signature::try_from(raw.as_slice())?;
                pkcs1v15::VerifyingKey::<Sha256>::new(key)
                    .verify(data.as_bytes(), &signature)
                    .is_ok()
            }
            SignaturePadding::PssSha256 => {
                let signature = pss::Signature::try_from(raw.as_slice())?;
                pss::VerifyingKey::<Sha256>::new(key)
                    .verify(data.as_bytes(), &signature)
                    .is_ok()
            }
        };
        Ok(accepted)
    }

    fn public_key(&self) -> Result<&RsaPublicKey> {
        self.public
            .as_ref()
            .ok_or(Error::MaterialIncomplete("Modulus"))
    }

    fn private_key(&self) -> Result<&RsaPrivateKey> {
        self.private.as_ref().ok_or(Error::MaterialIncomplete("D"))
    }
}

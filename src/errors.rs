//! Error types.

use std::string::FromUtf8Error;

/// Alias for [`core::result::Result`] with the `rsa-keyconv` [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while converting, generating or using RSA key material.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A mandatory key field is absent: a private-key encode was requested on
    /// public-only material, or a required XML element is missing.
    #[error("incomplete key material: missing `{0}`")]
    MaterialIncomplete(&'static str),

    /// The input could not be parsed as a key of the requested format.
    #[error("invalid key format: {0}")]
    FormatInvalid(#[from] FormatError),

    /// The input carries a PEM envelope, but not the one the requested
    /// decoder expects.
    #[error("envelope label mismatch: expected `{expected}`")]
    EnvelopeMismatch {
        /// Label of the envelope the decoder was asked to remove.
        expected: &'static str,
    },

    /// The underlying primitive rejected the requested modulus length.
    #[error("unsupported key size: {bits} bits")]
    InvalidKeySize {
        /// Requested modulus length.
        bits: usize,
        /// Rejection reported by the key-generation primitive.
        #[source]
        source: rsa::Error,
    },

    /// An encrypt/decrypt operation failed in the RSA primitive.
    #[error(transparent)]
    Crypto(#[from] rsa::Error),

    /// A sign/verify operation failed in the signature primitive.
    #[error(transparent)]
    Signature(#[from] rsa::signature::Error),

    /// Decrypted plaintext was not valid UTF-8.
    #[error("plaintext is not valid UTF-8")]
    Utf8(#[from] FromUtf8Error),
}

/// Concrete parse failure behind [`Error::FormatInvalid`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// Payload is not valid base64.
    #[error("malformed base64: {0}")]
    Base64(#[from] base64ct::Error),

    /// The DER structure could not be decoded.
    #[error("malformed DER: {0}")]
    Der(#[from] pkcs1::der::Error),

    /// The PKCS#1 structure is not a usable two-prime RSA key.
    #[error("malformed PKCS#1 key: {0}")]
    Pkcs1(#[from] pkcs1::Error),

    /// The decoded object does not identify an RSA key.
    #[error("unexpected key algorithm: {0}")]
    Algorithm(#[from] spki::Error),

    /// The XML element tree is not a well-formed `RSAKeyValue`.
    #[error("malformed XML key value: {0}")]
    Xml(&'static str),
}

impl From<base64ct::Error> for Error {
    fn from(err: base64ct::Error) -> Self {
        Error::FormatInvalid(err.into())
    }
}

impl From<pkcs1::der::Error> for Error {
    fn from(err: pkcs1::der::Error) -> Self {
        Error::FormatInvalid(err.into())
    }
}

impl From<pkcs1::Error> for Error {
    fn from(err: pkcs1::Error) -> Self {
        Error::FormatInvalid(err.into())
    }
}

impl From<spki::Error> for Error {
    fn from(err: spki::Error) -> Self {
        Error::FormatInvalid(err.into())
    }
}

//! Canonical in-memory representation of RSA key fields.

use zeroize::Zeroize;

use crate::errors::{Error, Result};

/// RSA key fields, independent of any textual representation.
///
/// All fields are unsigned big-endian byte sequences, kept exactly as the
/// decoder produced them. A value is either public-only (`n`, `e`) or carries
/// the full private CRT set; a partial private half cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMaterial {
    /// `n`: RSA modulus.
    n: Vec<u8>,
    /// `e`: RSA public exponent.
    e: Vec<u8>,
    private: Option<PrivateMaterial>,
}

/// Private half of a [`KeyMaterial`]. All six fields are always present.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct PrivateMaterial {
    /// `d`: private exponent.
    pub(crate) d: Vec<u8>,
    /// `p`: first prime factor of `n`.
    pub(crate) p: Vec<u8>,
    /// `q`: second prime factor of `n`.
    pub(crate) q: Vec<u8>,
    /// `d mod (p-1)`.
    pub(crate) dp: Vec<u8>,
    /// `d mod (q-1)`.
    pub(crate) dq: Vec<u8>,
    /// `q^-1 mod p`.
    pub(crate) qinv: Vec<u8>,
}

impl KeyMaterial {
    /// Builds public-only material from modulus and public exponent.
    pub fn public(n: Vec<u8>, e: Vec<u8>) -> Self {
        Self {
            n,
            e,
            private: None,
        }
    }

    /// Builds private material from the full CRT field set.
    #[allow(clippy::too_many_arguments)]
    pub fn private(
        n: Vec<u8>,
        e: Vec<u8>,
        d: Vec<u8>,
        p: Vec<u8>,
        q: Vec<u8>,
        dp: Vec<u8>,
        dq: Vec<u8>,
        qinv: Vec<u8>,
    ) -> Self {
        Self {
            n,
            e,
            private: Some(PrivateMaterial {
                d,
                p,
                q,
                dp,
                dq,
                qinv,
            }),
        }
    }

    /// Returns the modulus.
    pub fn n(&self) -> &[u8] {
        &self.n
    }

    /// Returns the public exponent.
    pub fn e(&self) -> &[u8] {
        &self.e
    }

    /// Whether this material carries the private field set.
    pub fn is_private(&self) -> bool {
        self.private.is_some()
    }

    /// Returns the private exponent, if present.
    pub fn d(&self) -> Option<&[u8]> {
        self.private.as_ref().map(|parts| parts.d.as_slice())
    }

    /// Returns the first prime factor, if present.
    pub fn p(&self) -> Option<&[u8]> {
        self.private.as_ref().map(|parts| parts.p.as_slice())
    }

    /// Returns the second prime factor, if present.
    pub fn q(&self) -> Option<&[u8]> {
        self.private.as_ref().map(|parts| parts.q.as_slice())
    }

    /// Returns `d mod (p-1)`, if present.
    pub fn dp(&self) -> Option<&[u8]> {
        self.private.as_ref().map(|parts| parts.dp.as_slice())
    }

    /// Returns `d mod (q-1)`, if present.
    pub fn dq(&self) -> Option<&[u8]> {
        self.private.as_ref().map(|parts| parts.dq.as_slice())
    }

    /// Returns `q^-1 mod p`, if present.
    pub fn qinv(&self) -> Option<&[u8]> {
        self.private.as_ref().map(|parts| parts.qinv.as_slice())
    }

    /// Extracts the public half, dropping the private fields.
    pub fn public_half(&self) -> KeyMaterial {
        KeyMaterial::public(self.n.clone(), self.e.clone())
    }

    pub(crate) fn private_parts(&self) -> Result<&PrivateMaterial> {
        self.private.as_ref().ok_or(Error::MaterialIncomplete("D"))
    }
}

impl core::fmt::Debug for PrivateMaterial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        // Private components are intentionally skipped
        f.debug_struct("PrivateMaterial").finish_non_exhaustive()
    }
}

impl Zeroize for PrivateMaterial {
    fn zeroize(&mut self) {
        self.d.zeroize();
        self.p.zeroize();
        self.q.zeroize();
        self.dp.zeroize();
        self.dq.zeroize();
        self.qinv.zeroize();
    }
}

impl Drop for PrivateMaterial {
    fn drop(&mut self) {
        self.zeroize();
    }
}

//! XML `<RSAKeyValue>` codec.
//!
//! The element tree mirrors the layout emitted by .NET's
//! `RSA.ToXmlString`: a fixed `RSAKeyValue` root whose children hold the
//! base64 encoding of each unsigned big-endian field. Child order on encode
//! is `Modulus, Exponent, P, Q, DP, DQ, InverseQ, D`; decode ignores order.

use base64ct::{Base64, Encoding};

use crate::errors::{Error, FormatError, Result};
use crate::material::KeyMaterial;

const ROOT_OPEN: &str = "<RSAKeyValue>";
const ROOT_CLOSE: &str = "</RSAKeyValue>";

/// Encodes the public fields as an `RSAKeyValue` element.
pub fn encode_public(material: &KeyMaterial) -> String {
    let mut out = String::new();
    out.push_str(ROOT_OPEN);
    out.push_str("\r\n");
    push_element(&mut out, "Modulus", material.n());
    push_element(&mut out, "Exponent", material.e());
    out.push_str(ROOT_CLOSE);
    out
}

/// Encodes the full private field set as an `RSAKeyValue` element.
///
/// Fails with [`Error::MaterialIncomplete`] when `material` is public-only.
pub fn encode_private(material: &KeyMaterial) -> Result<String> {
    let parts = material.private_parts()?;

    let mut out = String::new();
    out.push_str(ROOT_OPEN);
    out.push_str("\r\n");
    push_element(&mut out, "Modulus", material.n());
    push_element(&mut out, "Exponent", material.e());
    push_element(&mut out, "P", &parts.p);
    push_element(&mut out, "Q", &parts.q);
    push_element(&mut out, "DP", &parts.dp);
    push_element(&mut out, "DQ", &parts.dq);
    push_element(&mut out, "InverseQ", &parts.qinv);
    push_element(&mut out, "D", &parts.d);
    out.push_str(ROOT_CLOSE);
    Ok(out)
}

/// Decodes an `RSAKeyValue` element into key material.
///
/// `Modulus` and `Exponent` are mandatory. When none of the private elements
/// are present the result is public-only; when some are present, all six
/// must be. Decoded bytes are kept verbatim, leading zeroes included.
pub fn decode(xml: &str) -> Result<KeyMaterial> {
    let doc = xml.trim();
    if !doc.starts_with(ROOT_OPEN) || !doc.ends_with(ROOT_CLOSE) {
        return Err(FormatError::Xml("missing RSAKeyValue root element").into());
    }

    let n = require(doc, "Modulus")?;
    let e = require(doc, "Exponent")?;

    let p = child(doc, "P")?;
    let q = child(doc, "Q")?;
    let dp = child(doc, "DP")?;
    let dq = child(doc, "DQ")?;
    let qinv = child(doc, "InverseQ")?;
    let d = child(doc, "D")?;

    if [&p, &q, &dp, &dq, &qinv, &d].iter().all(|f| f.is_none()) {
        return Ok(KeyMaterial::public(n, e));
    }

    Ok(KeyMaterial::private(
        n,
        e,
        d.ok_or(Error::MaterialIncomplete("D"))?,
        p.ok_or(Error::MaterialIncomplete("P"))?,
        q.ok_or(Error::MaterialIncomplete("Q"))?,
        dp.ok_or(Error::MaterialIncomplete("DP"))?,
        dq.ok_or(Error::MaterialIncomplete("DQ"))?,
        qinv.ok_or(Error::MaterialIncomplete("InverseQ"))?,
    ))
}

fn push_element(out: &mut String, name: &str, value: &[u8]) {
    out.push_str("  <");
    out.push_str(name);
    out.push('>');
    out.push_str(&Base64::encode_string(value));
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\r\n");
}

/// Returns the base64-decoded text of `<name>...</name>`, or `None` when the
/// element is absent. Whitespace inside the value is ignored.
fn child(doc: &str, name: &str) -> Result<Option<Vec<u8>>> {
    let open = format!("<{name}>");
    let close = format!("</{name}>");

    let Some(start) = doc.find(&open) else {
        return Ok(None);
    };
    let value_start = start + open.len();
    let value_end = doc[value_start..]
        .find(&close)
        .ok_or(FormatError::Xml("unterminated element"))?
        + value_start;

    let value: String = doc[value_start..value_end]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    Ok(Some(Base64::decode_vec(&value)?))
}

fn require(doc: &str, name: &'static str) -> Result<Vec<u8>> {
    child(doc, name)?.ok_or(Error::MaterialIncomplete(name))
}

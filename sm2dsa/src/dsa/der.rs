//! ASN.1 DER encoding for SM2 signatures.
//!
//! ```text
//! SM2Signature ::= SEQUENCE {
//!     r INTEGER,
//!     s INTEGER
//! }
//! ```

use super::Signature;
use crate::{CurveParams, Error, FIELD_SIZE, Result};
use ::der::{
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Writer,
    asn1::UintRef,
};
use num_bigint::BigUint;

impl Signature {
    /// Parse a signature from ASN.1 DER.
    ///
    /// Trailing data, integers wider than 32 bytes and values outside
    /// `[1, n-1]` are rejected with [`Error::InvalidSignatureEncoding`].
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let SignatureRef { r, s } =
            SignatureRef::from_der(bytes).map_err(|_| Error::InvalidSignatureEncoding)?;

        if r.as_bytes().len() > FIELD_SIZE || s.as_bytes().len() > FIELD_SIZE {
            return Err(Error::InvalidSignatureEncoding);
        }

        Self::from_scalars(
            BigUint::from_bytes_be(r.as_bytes()),
            BigUint::from_bytes_be(s.as_bytes()),
        )
    }

    /// Serialize this signature as ASN.1 DER.
    ///
    /// Returns [`Error::InvalidSignatureEncoding`] for unchecked signatures
    /// whose `r` or `s` lies outside `[1, n-1]`.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let order = CurveParams::sm2().order();
        if !order.contains_nonzero(self.r()) || !order.contains_nonzero(self.s()) {
            return Err(Error::InvalidSignatureEncoding);
        }

        let (r, s) = (self.r_bytes(), self.s_bytes());

        SignatureRef::from_components(&r, &s)
            .and_then(|signature| signature.to_der())
            .map_err(|_| Error::InvalidSignatureEncoding)
    }
}

struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl<'a> SignatureRef<'a> {
    fn from_components(r: &'a [u8], s: &'a [u8]) -> ::der::Result<Self> {
        Ok(Self {
            r: UintRef::new(r)?,
            s: UintRef::new(s)?,
        })
    }
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> ::der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, encoder: &mut impl Writer) -> ::der::Result<()> {
        self.r.encode(encoder)?;
        self.s.encode(encoder)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, _header: Header) -> ::der::Result<Self> {
        Ok(Self {
            r: UintRef::decode(reader)?,
            s: UintRef::decode(reader)?,
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}

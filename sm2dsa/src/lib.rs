#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod dsa;

mod arithmetic;
mod distid;
mod error;
mod public_key;
mod secret_key;

pub use crate::{
    arithmetic::{AffinePoint, CurveParams, field::Modulus},
    error::{Error, Result},
    public_key::PublicKey,
    secret_key::SecretKey,
};
pub use num_bigint::{self, BigUint};
pub use rand_core;

/// Size of a serialized field element or scalar in bytes.
pub const FIELD_SIZE: usize = 32;

/// SM2 field element serialized as bytes.
///
/// Byte array containing a big endian serialized field element value (base
/// field or scalar).
pub type FieldBytes = [u8; FIELD_SIZE];

/// Upper bound on random draws when sampling a scalar, shared by key
/// generation and signing.
///
/// Each draw is rejected with probability below 2⁻³², so reaching this bound
/// means the random number generator is broken.
const MAX_ATTEMPTS: usize = 256;

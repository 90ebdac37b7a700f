//! Canonical signing for trust envelopes.
//!
//! Signature validity is equivalent to payload-field integrity: the signer
//! and verifier both serialize the signable field set into byte-exact
//! canonical JSON, so any mutation to a signed field - including reordering
//! the citation list - makes verification fail.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod canonical;
mod error;
mod hex;
mod identity;

pub use canonical::{verify_signature, SignableFields};
pub use error::{SignerError, SignerResult};
pub use identity::SigningIdentity;

//! URL codec and identifier generator
//!
//! An object url is `SCHEME_PREFIX + percent_encode(actor) + SEPARATOR +
//! percent_encode(id)`. Encoding is total: any `(actor, id)` pair
//! produces a url. Decoding fails with `Error::InvalidUrl` unless the
//! scheme prefix is present and the remainder contains exactly one
//! separator.

use base64::Engine;
use rand::RngCore;

use crate::error::{Error, Result};

/// Fixed scheme prefix for every object url minted by this crate.
pub const SCHEME_PREFIX: &str = "graffiti:object/";

/// The single unreserved separator between the encoded actor and id.
const SEPARATOR: char = '/';

/// A decoded `(actor, id)` pair, as recovered from an object url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrl {
    /// The owning actor.
    pub actor: String,
    /// The object's random identifier.
    pub id: String,
}

/// Encode `(actor, id)` into an opaque object url.
///
/// Total function: every `(actor, id)` pair, including ones containing
/// the raw separator or scheme-prefix-like substrings, round-trips
/// through [`decode_object_url`] because both pieces are percent-encoded
/// before concatenation.
pub fn encode_object_url(actor: &str, id: &str) -> String {
    format!(
        "{SCHEME_PREFIX}{}{SEPARATOR}{}",
        urlencoding::encode(actor),
        urlencoding::encode(id)
    )
}

/// Decode an object url minted by [`encode_object_url`].
///
/// Fails with [`Error::InvalidUrl`] when the scheme prefix is missing or
/// the remainder does not contain exactly one separator.
pub fn decode_object_url(url: &str) -> Result<ObjectUrl> {
    let rest = url
        .strip_prefix(SCHEME_PREFIX)
        .ok_or_else(|| Error::invalid_url(format!("missing scheme prefix: {url}")))?;

    let mut parts = rest.split(SEPARATOR);
    let (Some(actor_enc), Some(id_enc), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::invalid_url(format!(
            "expected exactly one separator after the scheme prefix: {url}"
        )));
    };

    let actor = urlencoding::decode(actor_enc)
        .map_err(|e| Error::invalid_url(format!("invalid percent-encoding in actor: {e}")))?
        .into_owned();
    let id = urlencoding::decode(id_enc)
        .map_err(|e| Error::invalid_url(format!("invalid percent-encoding in id: {e}")))?
        .into_owned();

    Ok(ObjectUrl { actor, id })
}

/// Mint a fresh, cryptographically random identifier: 24-32 random bytes
/// (the exact length chosen per call) encoded with URL-safe, unpadded
/// base64.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    let len = 24 + (rng.next_u32() as usize % 9); // 24..=32
    let mut bytes = vec![0u8; len];
    rng.fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

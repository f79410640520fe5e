//! Domain Services
//!
//! Auth-code computation for in-room beacons.

use platform::crypto::chain_keyed_hash;

use crate::domain::value_objects::BeaconPayload;
use crate::error::HeartbeatResult;

/// Chain the keyed hashes named by `rules` over `payload_text`
///
/// Unknown rule codes leave the accumulator unchanged.
pub fn compute_auth_code(payload_text: &str, secret_key: &str, rules: &[i64]) -> String {
    chain_keyed_hash(payload_text, secret_key, rules)
}

/// Serialize the payload and compute its auth code
pub fn sign_beacon(
    payload: &BeaconPayload<'_>,
    secret_key: &str,
    rules: &[i64],
) -> HeartbeatResult<String> {
    let text = payload.to_canonical_json()?;
    Ok(compute_auth_code(&text, secret_key, rules))
}

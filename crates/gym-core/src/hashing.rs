//! Hash estable del plan de pasos.
//!
//! El plan se serializa con serde (orden de campos fijo) y se hashea con
//! blake3 junto a `ENGINE_VERSION`. El resultado sirve como clave de
//! memoización del progreso y aparece en el evento `SessionStarted`.

use blake3::Hasher;

use crate::constants::ENGINE_VERSION;
use crate::step::Step;

/// Hashea bytes arbitrarios y devuelve hex.
pub(crate) fn hash_bytes(input: &[u8]) -> String {
    let mut h = Hasher::new();
    h.update(input);
    h.finalize().to_hex().to_string()
}

/// Hash determinista de una lista de pasos.
pub fn plan_hash(steps: &[Step]) -> String {
    let mut payload = ENGINE_VERSION.as_bytes().to_vec();
    payload.extend(serde_json::to_vec(steps).unwrap_or_default());
    hash_bytes(&payload)
}

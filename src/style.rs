//! Stable hash-derived style assignment.
//!
//! Renderers want the same job to get the same color and emoji on every
//! run, with no shared state between runs. [`assign`] hashes the key with
//! a fixed salt and uses the digest to seed a single pseudo-random draw,
//! so the mapping is a pure function of the key. Not a security
//! primitive; only stability and a reasonable spread matter.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Fixed salt mixed into every key before hashing.
const STYLE_SALT: &str = "testgrid-triage-style-salt-v1";

/// Bootstrap-style color classes handed to renderers.
const COLOR_CLASSES: [&str; 8] = [
    "primary", "secondary", "success", "danger", "warning", "info", "light", "dark",
];

/// Emoji badges handed to renderers.
const EMOJI: [&str; 8] = [
    ":grimacing:",
    ":kiss:",
    ":eyes:",
    ":v:",
    ":dizzy_face:",
    ":whale:",
    ":mailbox_with_no_mail:",
    ":basketball:",
];

/// Map `key` onto `[0, modulus)`, stably across invocations and runs.
///
/// The first eight digest bytes seed one [`StdRng`] draw; identical
/// arguments always produce the identical result.
///
/// # Panics
///
/// Panics if `modulus` is 0.
pub fn assign(key: &str, modulus: usize) -> usize {
    assert!(modulus >= 1, "modulus must be positive");
    let digest = Sha256::new()
        .chain_update(key)
        .chain_update(STYLE_SALT)
        .finalize();
    let mut seed = [0u8; 8];
    seed.copy_from_slice(&digest[..8]);
    let mut rng = StdRng::seed_from_u64(u64::from_be_bytes(seed));
    rng.random_range(0..modulus)
}

/// Stable color class for an attribution.
///
/// Only the job part (before any `/revision` suffix) feeds the hash, so
/// every attribution of one job shares a color.
pub fn color_class(attribution: &str) -> &'static str {
    COLOR_CLASSES[assign(job_part(attribution), COLOR_CLASSES.len())]
}

/// Stable emoji badge for an attribution, keyed like [`color_class`].
pub fn emoji(attribution: &str) -> &'static str {
    EMOJI[assign(job_part(attribution), EMOJI.len())]
}

fn job_part(attribution: &str) -> &str {
    attribution.split('/').next().unwrap_or(attribution)
}

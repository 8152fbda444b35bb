//! Content digests for placement plans.
//!
//! A plan digest is the SHA-256 of the JSON encoding of a recorded call
//! sequence. Generation is deterministic, so two runs with the same inputs
//! must produce the same digest.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::Result;

/// A 32-byte SHA-256 digest of a placement plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanDigest([u8; 32]);

impl PlanDigest {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for PlanDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Compute the digest of any serializable plan.
pub fn plan_digest<T: Serialize + ?Sized>(plan: &T) -> Result<PlanDigest> {
    let json = serde_json::to_vec(plan)?;
    let mut hasher = Sha256::new();
    hasher.update(&json);
    Ok(PlanDigest(hasher.finalize().into()))
}

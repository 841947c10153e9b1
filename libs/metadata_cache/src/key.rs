//! Cache keys and their on-disk namespace
//!
//! A key names one cacheable build: which protocol and product it belongs to,
//! which chain it was built for, and which payload of that adapter it is.
//! Keys map to `<protocol>/<product>/<chain>.<scope>.json` under the store root.
//! Segments are restricted to `[a-z0-9_-]`, so no segment can contain a path
//! separator or the `.` joining chain and scope, and two distinct keys never
//! share a location.

use crate::error::{Result, StorageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

const MAX_SEGMENT_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheKey {
    protocol_id: String,
    product_id: String,
    chain_id: String,
    scope_id: String,
}

impl CacheKey {
    pub fn new(
        protocol_id: impl Into<String>,
        product_id: impl Into<String>,
        chain_id: impl Into<String>,
        scope_id: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            protocol_id: segment(protocol_id.into())?,
            product_id: segment(product_id.into())?,
            chain_id: segment(chain_id.into())?,
            scope_id: segment(scope_id.into())?,
        })
    }

    pub fn protocol_id(&self) -> &str {
        &self.protocol_id
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn scope_id(&self) -> &str {
        &self.scope_id
    }

    /// Location of this key relative to a store root
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(&self.protocol_id)
            .join(&self.product_id)
            .join(format!("{}.{}.json", self.chain_id, self.scope_id))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.protocol_id, self.product_id, self.chain_id, self.scope_id
        )
    }
}

fn segment(value: String) -> Result<String> {
    let reason = if value.is_empty() {
        Some("empty")
    } else if value.len() > MAX_SEGMENT_LEN {
        Some("longer than 64 bytes")
    } else if !value
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_')
    {
        Some("only [a-z0-9_-] allowed")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StorageError::InvalidKey {
            segment: value,
            reason,
        }),
        None => Ok(value),
    }
}

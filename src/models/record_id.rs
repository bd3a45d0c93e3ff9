use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};

/// Length of the hex form of a record id (12 bytes).
pub const RECORD_ID_LEN: usize = 24;

static PROCESS_BYTES: Lazy<[u8; 5]> = Lazy::new(rand::random);
static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::random::<u32>() & 0x00ff_ffff));

/// Storage-assigned identifier of a stored record.
///
/// Laid out as 4 bytes of big-endian unix seconds, 5 bytes of per-process
/// randomness and a 3 byte counter, always rendered as 24 lowercase hex digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or_default();
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_BYTES);
        bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);

        RecordId(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Returns None unless `raw` is exactly 24 hex digits.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.len() != RECORD_ID_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        Some(RecordId(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RecordId::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid record id: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_hex_and_unique() {
        let ids: HashSet<RecordId> = (0..1000).map(|_| RecordId::generate()).collect();
        assert_eq!(ids.len(), 1000);
        for id in ids.iter() {
            assert_eq!(id.as_str().len(), RECORD_ID_LEN);
            assert_eq!(RecordId::parse(id.as_str()).as_ref(), Some(id));
        }
    }

    #[test]
    fn parses_only_24_hex_digits() {
        assert!(RecordId::parse("ffffffffffffffffffffffff").is_some());
        assert_eq!(
            RecordId::parse("5F1D7C3A9B2E4D6F8A0B1C2D").unwrap().as_str(),
            "5f1d7c3a9b2e4d6f8a0b1c2d"
        );

        assert!(RecordId::parse("not-an-id").is_none());
        assert!(RecordId::parse("").is_none());
        assert!(RecordId::parse("fffffffffffffffffffffff").is_none());
        assert!(RecordId::parse("fffffffffffffffffffffffff").is_none());
        assert!(RecordId::parse("gggggggggggggggggggggggg").is_none());
    }

    #[test]
    fn rejects_malformed_ids_when_deserializing() {
        assert!(serde_json::from_str::<RecordId>("\"123\"").is_err());
        let id: RecordId = serde_json::from_str("\"aaaaaaaaaaaaaaaaaaaaaaaa\"").unwrap();
        assert_eq!(id.to_string(), "aaaaaaaaaaaaaaaaaaaaaaaa");
    }
}

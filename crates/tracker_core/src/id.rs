use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Placeholder identity for an entity that the server has not confirmed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TempId(u64);

impl TempId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "temp-{}", self.0)
    }
}

/// Monotonic source of temporary ids. Never yields the same id twice.
#[derive(Debug)]
pub struct TempIdSource {
    next: AtomicU64,
}

impl TempIdSource {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    pub fn next_id(&self) -> TempId {
        TempId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TempIdSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifier of a record in a collection.
///
/// `Server` ids come from the backing store and `Temp` ids are handed out
/// locally while a create is in flight. The variants never compare equal, so
/// a temporary id cannot shadow a persisted one whatever the store's id format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordId {
    Server(String),
    Temp(TempId),
}

impl RecordId {
    pub fn server(id: impl Into<String>) -> Self {
        RecordId::Server(id.into())
    }

    pub fn is_temp(&self) -> bool {
        matches!(self, RecordId::Temp(_))
    }

    /// The persisted id, if the server has assigned one.
    pub fn as_server(&self) -> Option<&str> {
        match self {
            RecordId::Server(id) => Some(id),
            RecordId::Temp(_) => None,
        }
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        RecordId::Server(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Server(value.to_string())
    }
}

impl From<TempId> for RecordId {
    fn from(value: TempId) -> Self {
        RecordId::Temp(value)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Server(id) => f.write_str(id),
            RecordId::Temp(temp) => temp.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_ids_are_monotonic() {
        let source = TempIdSource::new();
        let first = source.next_id();
        let second = source.next_id();
        assert!(second > first);
        assert_ne!(first, second);
    }

    #[test]
    fn temp_id_never_equals_server_id_with_same_text() {
        let temp = RecordId::from(TempIdSource::new().next_id());
        let lookalike = RecordId::server(temp.to_string());
        assert_eq!(temp.to_string(), "temp-1");
        assert_ne!(temp, lookalike);
    }

    #[test]
    fn server_ids_round_trip_through_plain_strings() {
        let id: RecordId = serde_json::from_str("\"clx42\"").unwrap();
        assert_eq!(id, RecordId::server("clx42"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"clx42\"");
    }
}

//! Session identity for correlating turns server-side.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Opaque correlation token shared with the assistant service.
///
/// Generated locally at mount, no server round-trip. The id is a
/// client-assigned default the server is free to confirm or override in a
/// reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Generate a fresh session id: a millisecond timestamp plus a random
    /// component, unique within a client with overwhelming probability.
    pub fn generate() -> Self {
        let created_at = Utc::now();
        let id = format!(
            "session_{}_{}",
            created_at.timestamp_millis(),
            Uuid::new_v4().simple()
        );
        tracing::debug!(session_id = %id, "Session: generated");
        Self { id, created_at }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Adopt a server-supplied id (server-led session continuation).
    pub fn adopt(&mut self, server_id: impl Into<String>) {
        let server_id = server_id.into();
        if server_id != self.id {
            tracing::debug!(
                from = %self.id,
                to = %server_id,
                "Session: adopting server-supplied id"
            );
            self.id = server_id;
        }
    }
}

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::types::internal::session::SessionConnection;

/// Tracks the single active device connection per user session.
///
/// Connections are ephemeral bookkeeping: they live only in this process
/// and vanish on restart. `set` overwrites any prior connection, so
/// connecting to device B while connected to device A silently replaces A
/// without a disconnect event. That is the documented contract, not an
/// accident.
#[derive(Default)]
pub struct SessionTracker {
    connections: RwLock<HashMap<String, SessionConnection>>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the connection for a session, replacing any prior one
    pub fn set(&self, user_id: &str, connection: SessionConnection) {
        self.connections
            .write()
            .insert(user_id.to_string(), connection);
    }

    /// The session's current connection, if any
    pub fn get(&self, user_id: &str) -> Option<SessionConnection> {
        self.connections.read().get(user_id).cloned()
    }

    /// Remove and return the session's connection
    pub fn clear(&self, user_id: &str) -> Option<SessionConnection> {
        self.connections.write().remove(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conn(device_id: i32) -> SessionConnection {
        SessionConnection {
            device_id,
            device_name: format!("device-{}", device_id),
            device_type: "camera".to_string(),
            location: "lab".to_string(),
            connected_at: 1_700_000_000,
        }
    }

    #[test]
    fn test_set_get_clear() {
        let tracker = SessionTracker::new();
        assert!(tracker.get("u-1").is_none());

        tracker.set("u-1", conn(1));
        assert_eq!(tracker.get("u-1").unwrap().device_id, 1);

        let cleared = tracker.clear("u-1").unwrap();
        assert_eq!(cleared.device_id, 1);
        assert!(tracker.get("u-1").is_none());
        assert!(tracker.clear("u-1").is_none());
    }

    #[test]
    fn test_set_overwrites_prior_connection() {
        let tracker = SessionTracker::new();
        tracker.set("u-1", conn(1));
        tracker.set("u-1", conn(2));

        // One connection per session: the second connect replaced the first
        assert_eq!(tracker.get("u-1").unwrap().device_id, 2);
    }

    #[test]
    fn test_sessions_are_independent() {
        let tracker = SessionTracker::new();
        tracker.set("u-1", conn(1));
        tracker.set("u-2", conn(2));

        tracker.clear("u-1");
        assert!(tracker.get("u-1").is_none());
        assert_eq!(tracker.get("u-2").unwrap().device_id, 2);
    }
}

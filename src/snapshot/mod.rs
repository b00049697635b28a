//! Snapshot and resume functionality for vending sessions.
//!
//! This module provides serialization and deserialization capabilities for sessions,
//! enabling an in-flight interaction to survive process restarts.

use crate::core::{transition, SessionHistory, SessionState};
use crate::session::{SessionId, SessionMachine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::SnapshotError;

/// Version identifier for snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Identifier of the captured session
    pub session: SessionId,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// State the session was in
    pub state: SessionState,

    /// Complete transition history
    pub history: SessionHistory,
}

impl Snapshot {
    /// Capture the current state of a session.
    pub fn capture(session: &SessionMachine) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            session: session.id().clone(),
            taken_at: Utc::now(),
            state: session.state(),
            history: session.history().clone(),
        }
    }

    /// Rebuild a session from this snapshot.
    ///
    /// The snapshot is validated first; a tampered or incompatible snapshot
    /// is rejected rather than producing a session in an impossible state.
    pub fn restore(self) -> Result<SessionMachine, SnapshotError> {
        self.validate()?;
        Ok(SessionMachine::from_parts(
            self.session,
            self.state,
            self.history,
        ))
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from JSON and validate.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Serialize to a compact binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Deserialize from the binary format and validate.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: Self = bincode::deserialize(bytes)
            .map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let records = self.history.records();
        if records.is_empty() {
            if !self.state.is_initial() {
                return Err(SnapshotError::ValidationFailed(
                    "empty history must leave the session in its initial state".to_string(),
                ));
            }
            return Ok(());
        }

        if let Some(first) = records.first() {
            if !first.from.is_initial() {
                return Err(SnapshotError::ValidationFailed(
                    "history must start from the initial state".to_string(),
                ));
            }
        }

        for record in records {
            let step = transition(record.from, record.event);
            if step.effect.is_rejection() {
                return Err(SnapshotError::ValidationFailed(
                    "history contains a rejection the machine never records".to_string(),
                ));
            }
            if step.next != record.to {
                return Err(SnapshotError::ValidationFailed(
                    "history contains a transition the machine cannot make".to_string(),
                ));
            }
        }

        for pair in records.windows(2) {
            if pair[0].to != pair[1].from {
                return Err(SnapshotError::ValidationFailed(
                    "history records do not chain".to_string(),
                ));
            }
        }

        if let Some(last) = records.last() {
            if last.to != self.state {
                return Err(SnapshotError::ValidationFailed(
                    "history does not end at the captured state".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Effect, SessionEvent, TransitionRecord};

    fn session_mid_purchase() -> SessionMachine {
        let mut session = SessionMachine::new();
        session.insert_token();
        session.press_select();
        session
    }

    #[test]
    fn capture_reflects_the_session() {
        let session = session_mid_purchase();
        let snapshot = Snapshot::capture(&session);

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(&snapshot.session, session.id());
        assert_eq!(snapshot.state, SessionState::Dispensing);
        assert_eq!(snapshot.history, *session.history());
    }

    #[test]
    fn json_round_trip_restores_the_session() {
        let session = session_mid_purchase();
        let snapshot = Snapshot::capture(&session);

        let json = snapshot.to_json().unwrap();
        let restored = Snapshot::from_json(&json).unwrap().restore().unwrap();

        assert_eq!(restored.id(), session.id());
        assert_eq!(restored.state(), session.state());
        assert_eq!(restored.history(), session.history());
    }

    #[test]
    fn binary_round_trip_restores_the_session() {
        let session = session_mid_purchase();
        let snapshot = Snapshot::capture(&session);

        let bytes = snapshot.to_bytes().unwrap();
        let restored = Snapshot::from_bytes(&bytes).unwrap().restore().unwrap();

        assert_eq!(restored.id(), session.id());
        assert_eq!(restored.state(), session.state());
        assert_eq!(restored.history(), session.history());
    }

    #[test]
    fn restored_session_keeps_working() {
        let session = session_mid_purchase();
        let mut restored = Snapshot::capture(&session).restore().unwrap();

        assert_eq!(restored.dispense_output(), Effect::OutputDispensed);
        assert_eq!(restored.state(), SessionState::AwaitingInput);
        assert_eq!(restored.history().len(), 3);
    }

    #[test]
    fn snapshot_of_a_fresh_session_restores() {
        let session = SessionMachine::new();
        let restored = Snapshot::capture(&session).restore().unwrap();

        assert_eq!(restored.state(), SessionState::AwaitingInput);
        assert!(restored.history().is_empty());
    }

    #[test]
    fn unsupported_version_is_rejected() {
        let mut snapshot = Snapshot::capture(&SessionMachine::new());
        snapshot.version = 99;

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::UnsupportedVersion {
                found: 99,
                supported: SNAPSHOT_VERSION,
            })
        ));
    }

    #[test]
    fn state_that_contradicts_history_is_rejected() {
        let mut snapshot = Snapshot::capture(&session_mid_purchase());
        snapshot.state = SessionState::AwaitingInput;

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }

    #[test]
    fn tampered_history_is_rejected() {
        let mut snapshot = Snapshot::capture(&session_mid_purchase());
        // Claims a selection was accepted without any token inserted.
        snapshot.history = SessionHistory::new().record(TransitionRecord {
            from: SessionState::AwaitingInput,
            to: SessionState::Dispensing,
            event: SessionEvent::PressSelect,
            timestamp: Utc::now(),
        });
        snapshot.state = SessionState::Dispensing;

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }

    #[test]
    fn history_containing_a_stay_is_rejected() {
        let mut snapshot = Snapshot::capture(&SessionMachine::new());
        // Claims the machine wrote down an eject that bounced. Rejections
        // leave no record, so the ends line up but the record is forged.
        snapshot.history = SessionHistory::new().record(TransitionRecord {
            from: SessionState::AwaitingInput,
            to: SessionState::AwaitingInput,
            event: SessionEvent::EjectToken,
            timestamp: Utc::now(),
        });

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }

    #[test]
    fn empty_history_requires_the_initial_state() {
        let mut snapshot = Snapshot::capture(&SessionMachine::new());
        snapshot.state = SessionState::Dispensing;

        assert!(matches!(
            snapshot.restore(),
            Err(SnapshotError::ValidationFailed(_))
        ));
    }

    #[test]
    fn from_json_validates_before_returning() {
        let mut snapshot = Snapshot::capture(&session_mid_purchase());
        snapshot.version = 2;
        let json = snapshot.to_json().unwrap();

        assert!(matches!(
            Snapshot::from_json(&json),
            Err(SnapshotError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(matches!(
            Snapshot::from_bytes(&[0xff, 0x00, 0x13]),
            Err(SnapshotError::DeserializationFailed(_))
        ));
    }
}

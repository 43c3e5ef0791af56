//! Pipeline state machine and transition observation
//!
//! A run moves through
//! `Idle → CheckingVersion → {UpToDate | Resolving} → Downloading → Verifying
//! → Extracting → Applying → {Done | Failed}`, entering each working stage at
//! most once. Observers see every transition in order.

use std::fmt;

/// A working stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CheckingVersion,
    Resolving,
    Downloading,
    Verifying,
    Extracting,
    Applying,
}

impl Stage {
    /// Lowercase stage name used in logs and error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::CheckingVersion => "checking-version",
            Stage::Resolving => "resolving",
            Stage::Downloading => "downloading",
            Stage::Verifying => "verifying",
            Stage::Extracting => "extracting",
            Stage::Applying => "applying",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full state of one pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateState {
    Idle,
    CheckingVersion,
    UpToDate,
    Resolving,
    Downloading,
    Verifying,
    Extracting,
    Applying,
    Done,
    Failed { stage: Stage },
}

impl UpdateState {
    /// Terminal states end the run
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UpdateState::UpToDate | UpdateState::Done | UpdateState::Failed { .. }
        )
    }

    /// The working stage this state represents, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            UpdateState::CheckingVersion => Some(Stage::CheckingVersion),
            UpdateState::Resolving => Some(Stage::Resolving),
            UpdateState::Downloading => Some(Stage::Downloading),
            UpdateState::Verifying => Some(Stage::Verifying),
            UpdateState::Extracting => Some(Stage::Extracting),
            UpdateState::Applying => Some(Stage::Applying),
            _ => None,
        }
    }
}

impl From<Stage> for UpdateState {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::CheckingVersion => UpdateState::CheckingVersion,
            Stage::Resolving => UpdateState::Resolving,
            Stage::Downloading => UpdateState::Downloading,
            Stage::Verifying => UpdateState::Verifying,
            Stage::Extracting => UpdateState::Extracting,
            Stage::Applying => UpdateState::Applying,
        }
    }
}

impl fmt::Display for UpdateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateState::Idle => f.write_str("idle"),
            UpdateState::UpToDate => f.write_str("up-to-date"),
            UpdateState::Done => f.write_str("done"),
            UpdateState::Failed { stage } => write!(f, "failed ({})", stage),
            other => match other.stage() {
                Some(stage) => f.write_str(stage.as_str()),
                None => Ok(()),
            },
        }
    }
}

/// Observer for pipeline state transitions
///
/// Implement this to drive progress displays or collect metrics. Calls are
/// made synchronously from the pipeline, so implementations should be quick.
pub trait StateObserver: Send + Sync {
    /// Called once per transition, in order
    fn on_transition(&self, from: UpdateState, to: UpdateState);
}

/// Observer that ignores every transition
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl StateObserver for NoOpObserver {
    fn on_transition(&self, _from: UpdateState, _to: UpdateState) {}
}

/// Observer that logs transitions using the `tracing` crate
///
/// # Log Levels
///
/// - entering a working stage: DEBUG
/// - `UpToDate`, `Done`: INFO
/// - `Failed`: WARN
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StateObserver for TracingObserver {
    fn on_transition(&self, from: UpdateState, to: UpdateState) {
        match to {
            UpdateState::Failed { stage } => {
                tracing::warn!(from = %from, stage = %stage, "update pipeline failed");
            }
            UpdateState::UpToDate | UpdateState::Done => {
                tracing::info!(from = %from, to = %to, "update pipeline finished");
            }
            _ => {
                tracing::debug!(from = %from, to = %to, "update pipeline transition");
            }
        }
    }
}

impl<T: StateObserver + ?Sized> StateObserver for std::sync::Arc<T> {
    fn on_transition(&self, from: UpdateState, to: UpdateState) {
        (**self).on_transition(from, to)
    }
}

impl<T: StateObserver + ?Sized> StateObserver for Box<T> {
    fn on_transition(&self, from: UpdateState, to: UpdateState) {
        (**self).on_transition(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(UpdateState, UpdateState)>>);

    impl StateObserver for Recorder {
        fn on_transition(&self, from: UpdateState, to: UpdateState) {
            self.0.lock().unwrap().push((from, to));
        }
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::CheckingVersion.to_string(), "checking-version");
        assert_eq!(Stage::Resolving.to_string(), "resolving");
        assert_eq!(Stage::Downloading.to_string(), "downloading");
        assert_eq!(Stage::Verifying.to_string(), "verifying");
        assert_eq!(Stage::Extracting.to_string(), "extracting");
        assert_eq!(Stage::Applying.to_string(), "applying");
    }

    #[test]
    fn test_terminal_states() {
        assert!(UpdateState::UpToDate.is_terminal());
        assert!(UpdateState::Done.is_terminal());
        assert!(UpdateState::Failed {
            stage: Stage::Verifying
        }
        .is_terminal());
        assert!(!UpdateState::Idle.is_terminal());
        assert!(!UpdateState::Applying.is_terminal());
    }

    #[test]
    fn test_stage_state_conversion() {
        for stage in [
            Stage::CheckingVersion,
            Stage::Resolving,
            Stage::Downloading,
            Stage::Verifying,
            Stage::Extracting,
            Stage::Applying,
        ] {
            assert_eq!(UpdateState::from(stage).stage(), Some(stage));
        }
        assert_eq!(UpdateState::Done.stage(), None);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(UpdateState::Idle.to_string(), "idle");
        assert_eq!(UpdateState::Extracting.to_string(), "extracting");
        assert_eq!(
            UpdateState::Failed {
                stage: Stage::Applying
            }
            .to_string(),
            "failed (applying)"
        );
    }

    #[test]
    fn test_observer_through_arc() {
        let recorder = Arc::new(Recorder::default());
        let observer: Arc<dyn StateObserver> = recorder.clone();

        observer.on_transition(UpdateState::Idle, UpdateState::CheckingVersion);
        NoOpObserver.on_transition(UpdateState::Idle, UpdateState::Done);
        TracingObserver.on_transition(UpdateState::Applying, UpdateState::Done);

        let seen = recorder.0.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[(UpdateState::Idle, UpdateState::CheckingVersion)]
        );
    }
}

//! Helpers for pipeline testing

use selfup_update::state::{StateObserver, UpdateState};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

/// Observer that keeps every state it was moved into
#[derive(Debug, Default)]
pub struct RecordingObserver {
    states: Mutex<Vec<UpdateState>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<UpdateState> {
        self.states.lock().unwrap().clone()
    }
}

impl StateObserver for RecordingObserver {
    fn on_transition(&self, from: UpdateState, to: UpdateState) {
        let mut states = self.states.lock().unwrap();
        if let Some(last) = states.last() {
            assert_eq!(*last, from, "transition did not start from the previous state");
        }
        states.push(to);
    }
}

/// Number of entries directly inside `dir`
pub fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// Create a file with the given content, executable on Unix
pub fn create_fake_binary(path: &Path, content: &[u8]) -> std::io::Result<()> {
    fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }

    Ok(())
}

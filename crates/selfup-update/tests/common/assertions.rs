//! Assertion helpers for pipeline results

use selfup_update::error::{ErrorKind, StageError};
use selfup_update::state::Stage;
use selfup_update::updater::UpdateOutcome;

/// Assert that a run failed in `stage` with an error of `kind`
pub fn assert_failed_at<T: std::fmt::Debug>(
    result: Result<T, StageError>,
    stage: Stage,
    kind: ErrorKind,
) -> StageError {
    let err = result.expect_err("expected the pipeline to fail");
    assert_eq!(err.stage, stage, "failed in the wrong stage: {}", err);
    assert_eq!(err.kind(), kind, "unexpected error kind: {}", err);
    err
}

/// Assert that a run replaced the binary with release `to`
pub fn assert_updated(outcome: &UpdateOutcome, to: &str) {
    match outcome {
        UpdateOutcome::Updated { to: actual, .. } => assert_eq!(actual, to),
        other => panic!("Expected an update to {} but got {:?}", to, other),
    }
}

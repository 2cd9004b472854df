use crate::api::control::status_for;

use botctl_core::{ControlAction, ControlReport, Outcome, ProcessId, SupervisorError};

use std::path::Path;

use http::StatusCode;

#[test]
fn test_successful_reports_map_to_200() {
    for outcome in [Outcome::Started, Outcome::NotRunning, Outcome::Dead] {
        let report =
            ControlReport::success(ControlAction::Start, outcome, ProcessId::new(9), "Bot");
        assert_eq!(status_for(&report), StatusCode::OK);
    }
}

#[test]
fn test_state_problems_map_to_409() {
    let missing = SupervisorError::executable_missing(Path::new("/nope/bot.py"));
    let corrupt = SupervisorError::corrupt_record(Path::new("bot.pid"), "xyz");

    for error in [missing, corrupt] {
        let report = ControlReport::failure(ControlAction::Start, &error, "Bot");
        assert_eq!(status_for(&report), StatusCode::CONFLICT);
    }
}

#[test]
fn test_os_failures_map_to_500() {
    let error = SupervisorError::spawn_failure(
        "python3",
        std::io::Error::from(std::io::ErrorKind::NotFound),
    );

    let report = ControlReport::failure(ControlAction::Start, &error, "Bot");

    assert_eq!(status_for(&report), StatusCode::INTERNAL_SERVER_ERROR);
}

use std::process::ExitCode;

/// Exit status for the makepot CLI.
///
/// - `Success` (0): template generated; warnings may have been printed
/// - `Error` (1): the run aborted on a fatal condition
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_values() {
        // ExitCode has no PartialEq; compare the debug form.
        assert_eq!(
            format!("{:?}", ExitCode::from(ExitStatus::Success)),
            format!("{:?}", ExitCode::from(0))
        );
        assert_eq!(
            format!("{:?}", ExitCode::from(ExitStatus::Error)),
            format!("{:?}", ExitCode::from(1))
        );
    }
}

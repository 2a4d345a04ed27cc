//! Process exit codes, distinct per failure class for CI triage

use mlprobe_common::ProbeError;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_GENERIC_FAIL: i32 = 1;
/// A check ran and reported a failure.
pub const EXIT_CHECK_FAILED: i32 = 3;
pub const EXIT_EXTENSION: i32 = 4;
pub const EXIT_DEVICE: i32 = 5;
pub const EXIT_CONFIG: i32 = 6;

/// Exit code for an error that escaped a command.
pub fn code_for_error(err: &anyhow::Error) -> i32 {
    let probe = err.chain().find_map(|cause| cause.downcast_ref::<ProbeError>());
    match probe {
        Some(ProbeError::ExtensionLoad { .. })
        | Some(ProbeError::SymbolNotFound { .. })
        | Some(ProbeError::KernelFailed { .. }) => EXIT_EXTENSION,
        Some(ProbeError::DeviceUnavailable(_)) => EXIT_DEVICE,
        Some(ProbeError::Config(_)) => EXIT_CONFIG,
        Some(ProbeError::TensorMismatch(_)) | Some(ProbeError::ShapeMismatch { .. }) => {
            EXIT_CHECK_FAILED
        }
        _ => EXIT_GENERIC_FAIL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn wrapped_errors_keep_their_class() {
        let err: anyhow::Result<()> =
            Err(ProbeError::DeviceUnavailable("no gpu".into())).context("selecting device");
        assert_eq!(code_for_error(&err.unwrap_err()), EXIT_DEVICE);
    }

    #[test]
    fn extension_errors_map_to_extension_code() {
        let err = anyhow::Error::new(ProbeError::KernelFailed { name: "k".into(), code: 7 });
        assert_eq!(code_for_error(&err), EXIT_EXTENSION);
    }

    #[test]
    fn foreign_errors_are_generic() {
        assert_eq!(code_for_error(&anyhow::anyhow!("boom")), EXIT_GENERIC_FAIL);
    }
}

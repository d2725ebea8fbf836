//! Error handling and exit codes.

use clui_core::constants::exit_codes;
use clui_core::error::UiError;

use crate::config::ConfigError;

/// Exit code for a failed run.
pub fn handle_error(err: &UiError) -> i32 {
    match err {
        UiError::Cancelled => exit_codes::ERROR_CANCELED,
        UiError::Timeout(_) => exit_codes::ERROR_TIMEOUT,
        UiError::InvalidMode(_) | UiError::InvalidAlignment(_) => exit_codes::ERROR_CONFIG,
        _ => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for any application error.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(ui) = err.downcast_ref::<UiError>() {
        handle_error(ui)
    } else if err.downcast_ref::<ConfigError>().is_some() {
        exit_codes::ERROR_CONFIG
    } else {
        exit_codes::ERROR_GENERIC
    }
}

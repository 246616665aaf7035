//! Exit codes for the CLI

use relnotes_core::RelnotesError;
use relnotes_github::GitHubError;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Version error
pub const VERSION_ERROR: i32 = 4;

/// Template error
pub const TEMPLATE_ERROR: i32 = 5;

/// Provider error (milestone lookup, API request)
pub const PROVIDER_ERROR: i32 = 6;

/// User cancelled
pub const CANCELLED: i32 = 130;

/// Map a command failure to its exit code
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<RelnotesError>() {
        return match err {
            RelnotesError::Config(_) => CONFIG_ERROR,
            RelnotesError::Version(_) => VERSION_ERROR,
            RelnotesError::Template(_) => TEMPLATE_ERROR,
            RelnotesError::Provider(_) => PROVIDER_ERROR,
        };
    }

    if let Some(err) = err.downcast_ref::<GitHubError>() {
        return match err {
            GitHubError::InvalidRepository(_) => CONFIG_ERROR,
            _ => PROVIDER_ERROR,
        };
    }

    if let Some(dialoguer::Error::IO(io)) = err.downcast_ref::<dialoguer::Error>() {
        if io.kind() == std::io::ErrorKind::Interrupted {
            return CANCELLED;
        }
    }

    ERROR
}

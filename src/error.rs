//! Presentable error taxonomy.
//!
//! Loaders fail with whatever [`anyhow::Error`] they like. Before anything is
//! shown to the user the failure goes through [`AppError::from_failure`],
//! which picks the closest user-facing category.

use thiserror::Error;

use crate::loader::http::ResponseError;

/// A failure in a form the user can act on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("no connection to the oracle")]
    Offline,

    #[error("the oracle took too long to answer")]
    Timeout,

    #[error("the oracle answered with status {status}")]
    Server { status: u16 },

    #[error("the oracle's answer could not be understood")]
    InvalidResponse,

    #[error("{0}")]
    Unknown(String),
}

impl AppError {
    /// Map a raw failure onto the taxonomy. Never fails.
    pub fn from_failure(error: &anyhow::Error) -> Self {
        for cause in error.chain() {
            if let Some(e) = cause.downcast_ref::<ResponseError>() {
                return match e {
                    ResponseError::Status(status) => AppError::Server { status: *status },
                    ResponseError::Incomplete => AppError::InvalidResponse,
                };
            }
            if let Some(e) = cause.downcast_ref::<reqwest::Error>() {
                if e.is_timeout() {
                    return AppError::Timeout;
                }
                if e.is_connect() {
                    return AppError::Offline;
                }
                if e.is_decode() {
                    return AppError::InvalidResponse;
                }
                if let Some(status) = e.status() {
                    return AppError::Server {
                        status: status.as_u16(),
                    };
                }
            }
            if cause.downcast_ref::<serde_json::Error>().is_some() {
                return AppError::InvalidResponse;
            }
            if let Some(e) = cause.downcast_ref::<std::io::Error>() {
                use std::io::ErrorKind;
                match e.kind() {
                    ErrorKind::TimedOut => return AppError::Timeout,
                    ErrorKind::ConnectionRefused
                    | ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::NotConnected => return AppError::Offline,
                    _ => {}
                }
            }
        }
        AppError::Unknown(error.to_string())
    }

    /// Short heading for the alert.
    pub fn title(&self) -> &'static str {
        match self {
            AppError::Offline => "You're offline",
            AppError::Timeout => "Timed out",
            AppError::Server { .. } => "Oracle unavailable",
            AppError::InvalidResponse => "Garbled answer",
            AppError::Unknown(_) => "Something went wrong",
        }
    }

    /// Body text for the alert, including what dismissing it does.
    pub fn message(&self) -> String {
        format!("{}. Dismiss to try again.", capitalize_first(&self.to_string()))
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn status_error_maps_to_server() {
        let err = anyhow::Error::new(ResponseError::Status(503));
        assert_eq!(AppError::from_failure(&err), AppError::Server { status: 503 });
    }

    #[test]
    fn incomplete_maps_to_invalid_response() {
        let err = anyhow::Error::new(ResponseError::Incomplete);
        assert_eq!(AppError::from_failure(&err), AppError::InvalidResponse);
    }

    #[test]
    fn mapping_looks_through_context() {
        let err: anyhow::Result<()> =
            Err(ResponseError::Status(500)).context("failed to fetch answer");
        assert_eq!(
            AppError::from_failure(&err.unwrap_err()),
            AppError::Server { status: 500 }
        );
    }

    #[test]
    fn io_refused_maps_to_offline() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = anyhow::Error::new(io);
        assert_eq!(AppError::from_failure(&err), AppError::Offline);
    }

    #[test]
    fn io_timeout_maps_to_timeout() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow");
        assert_eq!(AppError::from_failure(&anyhow::Error::new(io)), AppError::Timeout);
    }

    #[test]
    fn json_error_maps_to_invalid_response() {
        let json = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert_eq!(
            AppError::from_failure(&anyhow::Error::new(json)),
            AppError::InvalidResponse
        );
    }

    #[test]
    fn anything_else_is_unknown_with_message() {
        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(
            AppError::from_failure(&err),
            AppError::Unknown("disk on fire".to_string())
        );
    }

    #[test]
    fn message_mentions_retry() {
        let msg = AppError::Offline.message();
        assert_eq!(msg, "No connection to the oracle. Dismiss to try again.");
    }

    #[test]
    fn titles_are_non_empty() {
        for e in [
            AppError::Offline,
            AppError::Timeout,
            AppError::Server { status: 500 },
            AppError::InvalidResponse,
            AppError::Unknown(String::new()),
        ] {
            assert!(!e.title().is_empty());
        }
    }
}

//! Error types for RoomFit

use crate::anchor::AnchorId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoomFitError {
    #[error("Anchor {0} has no volume bounds")]
    MissingVolume(AnchorId),

    #[error("Anchor {0} has no plane rect")]
    MissingPlaneRect(AnchorId),

    #[error("Custom {0} mode selected but no custom fit policy was supplied")]
    CustomPolicyRequired(&'static str),

    #[error("Built-in {0} policy cannot handle the custom mode")]
    CustomModeNotHandled(&'static str),

    #[error("Random prefab selection requires an initialized random generator")]
    RandomGeneratorMissing,

    #[error("Unknown {kind} value: {value}")]
    UnknownPolicy { kind: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Room query error: {0}")]
    RoomQuery(String),
}

pub type Result<T> = std::result::Result<T, RoomFitError>;

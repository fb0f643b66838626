//! Error types for animator composition.
//!
//! Only structural problems surface as errors; everything recoverable is
//! written to the [`Report`](crate::report::Report) instead.

use serde::{Deserialize, Serialize};

use crate::controller::ParameterType;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ComposeError {
    /// A parameter name is already used by a parameter of another type
    #[error("Parameter type mismatch for {name}: expected {expected:?}, found {actual:?}")]
    ParameterTypeMismatch {
        name: String,
        expected: ParameterType,
        actual: ParameterType,
    },

    /// The wearable is not below the avatar root
    #[error("Wearable object {object} is not inside avatar {avatar}")]
    NotInsideAvatar { object: String, avatar: String },

    /// A dynamics component lives outside the avatar hierarchy
    #[error("Dynamics on {object} is not inside avatar {avatar}")]
    DynamicsOutsideAvatar { object: String, avatar: String },

    /// Container-bone avoidance reached the avatar root
    #[error("Unable to remap {path}: root is tagged as container bone")]
    ContainerBoneRoot { path: String },
}

impl ComposeError {
    /// Coarse category for diagnostics grouping.
    pub fn category(&self) -> &'static str {
        match self {
            ComposeError::ParameterTypeMismatch { .. } => "parameter",
            ComposeError::NotInsideAvatar { .. }
            | ComposeError::DynamicsOutsideAvatar { .. }
            | ComposeError::ContainerBoneRoot { .. } => "hierarchy",
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_category() {
        let err = ComposeError::ParameterTypeMismatch {
            name: "Hat".into(),
            expected: ParameterType::Bool,
            actual: ParameterType::Float,
        };
        assert_eq!(
            err.to_string(),
            "Parameter type mismatch for Hat: expected Bool, found Float"
        );
        assert_eq!(err.category(), "parameter");
        let err = ComposeError::NotInsideAvatar {
            object: "Wearable".into(),
            avatar: "Avatar".into(),
        };
        assert_eq!(err.category(), "hierarchy");
    }
}

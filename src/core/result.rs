//! Optimize result and its wire representation.

use serde::{Deserialize, Serialize};

/// Message used when a failure carries no text of its own.
pub const FALLBACK_ERROR: &str = "Unknown error occurred";

/// Outcome of one pipeline run: exactly one of success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "WireResult", try_from = "WireResult")]
pub enum OptimizeResult {
    Success {
        optimized_svg: String,
        component_code: String,
    },
    Failure {
        message: String,
    },
}

impl OptimizeResult {
    pub fn success(optimized_svg: String, component_code: String) -> Self {
        Self::Success {
            optimized_svg,
            component_code,
        }
    }

    /// Failure with `message`, or the fallback text when it is blank.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        };
        Self::Failure { message }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn optimized_svg(&self) -> Option<&str> {
        match self {
            Self::Success { optimized_svg, .. } => Some(optimized_svg),
            Self::Failure { .. } => None,
        }
    }

    pub fn component_code(&self) -> Option<&str> {
        match self {
            Self::Success { component_code, .. } => Some(component_code),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { message } => Some(message),
        }
    }
}

/// `{ success, optimizedSvg, componentCode }` or `{ success, error }`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResult {
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    optimized_svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    component_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<OptimizeResult> for WireResult {
    fn from(result: OptimizeResult) -> Self {
        match result {
            OptimizeResult::Success {
                optimized_svg,
                component_code,
            } => Self {
                success: true,
                optimized_svg: Some(optimized_svg),
                component_code: Some(component_code),
                error: None,
            },
            OptimizeResult::Failure { message } => Self {
                success: false,
                optimized_svg: None,
                component_code: None,
                error: Some(message),
            },
        }
    }
}

impl TryFrom<WireResult> for OptimizeResult {
    type Error = String;

    fn try_from(wire: WireResult) -> Result<Self, Self::Error> {
        match wire {
            WireResult {
                success: true,
                optimized_svg: Some(optimized_svg),
                component_code: Some(component_code),
                error: None,
            } => Ok(Self::success(optimized_svg, component_code)),
            WireResult {
                success: false,
                optimized_svg: None,
                component_code: None,
                error,
            } => Ok(Self::failure(error.unwrap_or_default())),
            _ => Err("result mixes success and failure fields".to_string()),
        }
    }
}

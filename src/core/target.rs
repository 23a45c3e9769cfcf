//! Target framework and generation shape.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported component frameworks.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    React,
    Vue,
}

impl Framework {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::React => "react",
            Self::Vue => "vue",
        }
    }

    /// Attribute spliced into the root `<svg>` to forward caller attributes.
    pub const fn spread_marker(self) -> &'static str {
        match self {
            Self::React => "{...props}",
            Self::Vue => r#"v-bind="$attrs""#,
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of generation shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    ReactTyped,
    ReactUntyped,
    Vue,
    /// Bare spliced SVG fragment, no wrapper or imports.
    MarkupOnly(Framework),
}

impl Target {
    /// `markup_only` wins over framework; `typescript` only matters for React.
    pub const fn new(framework: Framework, typescript: bool, markup_only: bool) -> Self {
        match (framework, typescript, markup_only) {
            (framework, _, true) => Self::MarkupOnly(framework),
            (Framework::React, true, false) => Self::ReactTyped,
            (Framework::React, false, false) => Self::ReactUntyped,
            (Framework::Vue, _, false) => Self::Vue,
        }
    }

    pub const fn framework(self) -> Framework {
        match self {
            Self::ReactTyped | Self::ReactUntyped => Framework::React,
            Self::Vue => Framework::Vue,
            Self::MarkupOnly(framework) => framework,
        }
    }

    /// File extension for a written component.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::ReactTyped | Self::MarkupOnly(Framework::React) => "tsx",
            Self::ReactUntyped => "jsx",
            Self::Vue | Self::MarkupOnly(Framework::Vue) => "vue",
        }
    }
}

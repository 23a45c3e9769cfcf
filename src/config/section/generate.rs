//! `[generate]` section configuration.
//!
//! Defaults for requests built by the CLI.
//!
//! # Example
//!
//! ```toml
//! [generate]
//! framework = "react"     # react | vue
//! typescript = true       # typed React output (ignored for vue)
//! markup_only = false     # emit only the <svg> fragment
//! file_name = "Icon"      # component name for stdin input
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_FILE_NAME, Framework, OptimizeRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    pub framework: Framework,
    pub typescript: bool,
    pub markup_only: bool,
    /// Used when the input has no file name of its own.
    pub file_name: String,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            framework: Framework::React,
            typescript: true,
            markup_only: false,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl GenerateConfig {
    /// Build a request for `raw_svg` using these defaults.
    pub fn request(&self, raw_svg: String, file_name: Option<&str>) -> OptimizeRequest {
        OptimizeRequest::new(raw_svg)
            .with_file_name(file_name.unwrap_or(&self.file_name))
            .with_framework(self.framework)
            .with_typescript(self.typescript)
            .with_markup_only(self.markup_only)
    }
}

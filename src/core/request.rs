//! Optimize request: the validated input of one pipeline run.
//!
//! Field names on the wire follow the original JSON contract
//! (`rawSvg`, `fileName`, `framework`, `typescript`, `jsxOnly`).

use serde::{Deserialize, Serialize};

use super::{ComponentIdentifier, Framework, Target};

/// Default file name when the caller supplies none.
pub const DEFAULT_FILE_NAME: &str = "Icon";

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

const fn default_true() -> bool {
    true
}

/// Input of a single optimize-and-generate run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    /// Literal SVG markup to process.
    pub raw_svg: String,

    /// Used only to derive the component identifier.
    #[serde(default = "default_file_name")]
    pub file_name: String,

    #[serde(default)]
    pub framework: Framework,

    /// Typed (TypeScript) vs untyped emission. React only.
    #[serde(default = "default_true", alias = "languageVariant")]
    pub typescript: bool,

    /// Emit only the SVG fragment, no component wrapper.
    #[serde(default, rename = "jsxOnly", alias = "markupOnly")]
    pub markup_only: bool,
}

impl OptimizeRequest {
    /// Create a request with default options.
    pub fn new(raw_svg: impl Into<String>) -> Self {
        Self {
            raw_svg: raw_svg.into(),
            file_name: default_file_name(),
            framework: Framework::default(),
            typescript: true,
            markup_only: false,
        }
    }

    /// Parse and validate an untyped JSON value against the request schema.
    pub fn from_json(value: serde_json::Value) -> Result<Self, String> {
        let request: Self = serde_json::from_value(value).map_err(|e| e.to_string())?;
        request.validate()?;
        Ok(request)
    }

    /// Check constraints serde cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.raw_svg.trim().is_empty() {
            return Err("`rawSvg` must not be empty".to_string());
        }
        Ok(())
    }

    pub fn with_raw_svg(self, raw_svg: impl Into<String>) -> Self {
        Self {
            raw_svg: raw_svg.into(),
            ..self
        }
    }

    pub fn with_file_name(self, file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..self
        }
    }

    pub fn with_framework(self, framework: Framework) -> Self {
        Self { framework, ..self }
    }

    pub fn with_typescript(self, typescript: bool) -> Self {
        Self { typescript, ..self }
    }

    pub fn with_markup_only(self, markup_only: bool) -> Self {
        Self {
            markup_only,
            ..self
        }
    }

    /// Generation shape selected by this request.
    pub fn target(&self) -> Target {
        Target::new(self.framework, self.typescript, self.markup_only)
    }

    /// Component identifier derived from the file name.
    pub fn identifier(&self) -> ComponentIdentifier {
        ComponentIdentifier::from_file_name(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_applied() {
        let request = OptimizeRequest::from_json(json!({ "rawSvg": "<svg/>" })).unwrap();
        assert_eq!(request.file_name, "Icon");
        assert_eq!(request.framework, Framework::React);
        assert!(request.typescript);
        assert!(!request.markup_only);
    }

    #[test]
    fn test_wire_field_names() {
        let request = OptimizeRequest::from_json(json!({
            "rawSvg": "<svg/>",
            "fileName": "bell",
            "framework": "vue",
            "typescript": false,
            "jsxOnly": true,
        }))
        .unwrap();
        assert_eq!(request.file_name, "bell");
        assert_eq!(request.framework, Framework::Vue);
        assert!(!request.typescript);
        assert!(request.markup_only);
    }

    #[test]
    fn test_aliases() {
        let request = OptimizeRequest::from_json(json!({
            "rawSvg": "<svg/>",
            "languageVariant": false,
            "markupOnly": true,
        }))
        .unwrap();
        assert!(!request.typescript);
        assert!(request.markup_only);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let request =
            OptimizeRequest::from_json(json!({ "rawSvg": "<svg/>", "theme": "dark" })).unwrap();
        assert_eq!(request.raw_svg, "<svg/>");
    }

    #[test]
    fn test_invalid_framework_rejected() {
        let err = OptimizeRequest::from_json(json!({ "rawSvg": "<svg/>", "framework": "svelte" }))
            .unwrap_err();
        assert!(err.contains("svelte"));
    }

    #[test]
    fn test_missing_raw_svg_rejected() {
        let err = OptimizeRequest::from_json(json!({ "fileName": "x" })).unwrap_err();
        assert!(err.contains("rawSvg"));
    }

    #[test]
    fn test_blank_raw_svg_rejected() {
        assert!(OptimizeRequest::from_json(json!({ "rawSvg": "  \n" })).is_err());
    }

    #[test]
    fn test_wrong_type_rejected() {
        assert!(
            OptimizeRequest::from_json(json!({ "rawSvg": "<svg/>", "typescript": "yes" }))
                .is_err()
        );
    }

    #[test]
    fn test_with_updates_replace_one_field() {
        let base = OptimizeRequest::new("<svg/>").with_file_name("bell");
        let vue = base.clone().with_framework(Framework::Vue);
        assert_eq!(vue.framework, Framework::Vue);
        assert_eq!(vue.file_name, "bell");
        assert_eq!(base.framework, Framework::React);

        let updated = vue.with_markup_only(true).with_typescript(false).with_raw_svg("<svg></svg>");
        assert!(updated.markup_only);
        assert!(!updated.typescript);
        assert_eq!(updated.raw_svg, "<svg></svg>");
    }

    #[test]
    fn test_target_selection() {
        let request = OptimizeRequest::new("<svg/>");
        assert_eq!(request.target(), Target::ReactTyped);
        assert_eq!(request.clone().with_typescript(false).target(), Target::ReactUntyped);
        assert_eq!(request.clone().with_framework(Framework::Vue).target(), Target::Vue);
        assert_eq!(
            request.with_markup_only(true).target(),
            Target::MarkupOnly(Framework::React)
        );
    }
}

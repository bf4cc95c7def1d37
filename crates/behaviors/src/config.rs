use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Element ids, class names and constants the behaviors look up on the page.
///
/// Every field has a default matching the converter page templates, so a TOML file only
/// needs to name what differs:
///
/// ```
/// use behaviors::BehaviorConfig;
///
/// let config = BehaviorConfig::from_toml_str("[textarea]\nmin_height = 320.0\n").unwrap();
/// assert_eq!(config.textarea.min_height, 320.0);
/// assert_eq!(config.elements.json_input, "json-input");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    pub elements: ElementIds,
    pub classes: ClassNames,
    pub validation: ValidationColors,
    pub textarea: TextareaConfig,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElementIds {
    pub convert_button: String,
    pub json_input: String,
    pub progress_overlay: String,
    pub json_output: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            convert_button: "convert-text-btn".to_string(),
            json_input: "json-input".to_string(),
            progress_overlay: "progress-modal".to_string(),
            json_output: "json-output".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassNames {
    pub file_wrapper: String,
    pub file_label: String,
    pub drag_highlight: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            file_wrapper: "file-input-wrapper".to_string(),
            file_label: "file-input-label".to_string(),
            drag_highlight: "drag-highlight".to_string(),
        }
    }
}

/// Border colours for the JSON input, written verbatim into its inline style.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationColors {
    pub valid: String,
    pub invalid: String,
    pub neutral: String,
}

impl Default for ValidationColors {
    fn default() -> Self {
        Self {
            valid: "#38a169".to_string(),
            invalid: "#e53e3e".to_string(),
            neutral: "#cbd5e0".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextareaConfig {
    /// Lower bound in px for auto-resized textareas.
    pub min_height: f32,
}

impl Default for TextareaConfig {
    fn default() -> Self {
        Self { min_height: 200.0 }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl BehaviorConfig {
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: BehaviorConfig = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&src)?;
        log::debug!(target: "behaviors.config", "loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the page could not use: unparsable colours, class names with
    /// whitespace, negative or non-finite heights.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let colors = [
            ("validation.valid", &self.validation.valid),
            ("validation.invalid", &self.validation.invalid),
            ("validation.neutral", &self.validation.neutral),
        ];
        for (field, value) in colors {
            if css::parse_color(value).is_none() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("`{value}` is not a colour"),
                });
            }
        }

        let classes = [
            ("classes.file_wrapper", &self.classes.file_wrapper),
            ("classes.file_label", &self.classes.file_label),
            ("classes.drag_highlight", &self.classes.drag_highlight),
        ];
        for (field, value) in classes {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("`{value}` is not a single class name"),
                });
            }
        }

        let min = self.textarea.min_height;
        if !min.is_finite() || min < 0.0 {
            return Err(ConfigError::Invalid {
                field: "textarea.min_height",
                reason: format!("{min} is not a non-negative length"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_page_defaults() {
        let config = BehaviorConfig::from_toml_str("").unwrap();
        assert_eq!(config, BehaviorConfig::default());
        assert_eq!(config.elements.convert_button, "convert-text-btn");
        assert_eq!(config.elements.progress_overlay, "progress-modal");
        assert_eq!(config.classes.drag_highlight, "drag-highlight");
        assert_eq!(config.validation.invalid, "#e53e3e");
        assert_eq!(config.textarea.min_height, 200.0);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = BehaviorConfig::from_toml_str(
            r##"
[elements]
json_input = "payload"

[validation]
valid = "green"
"##,
        )
        .unwrap();
        assert_eq!(config.elements.json_input, "payload");
        assert_eq!(config.elements.json_output, "json-output");
        assert_eq!(config.validation.valid, "green");
        assert_eq!(config.validation.neutral, "#cbd5e0");
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let err = BehaviorConfig::from_toml_str("[elements]\nbutton = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_unusable_values() {
        let err = BehaviorConfig::from_toml_str("[validation]\ninvalid = \"reddish\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "validation.invalid",
                ..
            }
        ));

        let err = BehaviorConfig::from_toml_str("[classes]\ndrag_highlight = \"a b\"\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "classes.drag_highlight",
                ..
            }
        ));

        let err = BehaviorConfig::from_toml_str("[textarea]\nmin_height = -1.0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "textarea.min_height",
                ..
            }
        ));
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let err = BehaviorConfig::load("/definitely/not/here.toml").unwrap_err();
        match err {
            ConfigError::Io { path, .. } => assert!(path.ends_with("here.toml")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

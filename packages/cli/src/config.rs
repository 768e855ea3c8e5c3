use pagekit_compiler_html::CompileOptions;
use pagekit_editor::{PluginOptions, CUSTOM_BUTTON};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "pagekit.config.json";

/// PageKit configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Options passed to the button plugin
    #[serde(default)]
    pub plugin: PluginOptions,

    /// HTML output options
    #[serde(default)]
    pub output: CompileOptions,

    /// Component type used when a snapshot file names none
    #[serde(default = "default_component_type")]
    pub component_type: String,

    /// Where rendered files are written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
}

fn default_component_type() -> String {
    CUSTOM_BUTTON.to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plugin: PluginOptions::default(),
            output: CompileOptions::default(),
            component_type: default_component_type(),
            out_dir: default_out_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "plugin": { "category": "Buttons", "includeCallToAction": false },
            "output": { "document": true, "indent": "\t" },
            "componentType": "cta-button"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.plugin.category, "Buttons");
        assert!(!config.plugin.include_call_to_action);
        assert_eq!(config.plugin.button_label, "Custom Button");
        assert!(config.output.document);
        assert_eq!(config.output.indent, "\t");
        assert_eq!(config.component_type, "cta-button");
        assert_eq!(config.out_dir, "dist");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.component_type, "custom-button");
        assert!(config.output.pretty);
        assert!(!config.output.document);
    }

    #[test]
    fn test_missing_config_falls_back_to_default() {
        let dir = std::env::temp_dir().join("pagekit-config-missing");
        let config = Config::load(&dir.display().to_string()).unwrap();
        assert_eq!(config, Config::default());
    }
}

//! 脚本配置管理：设置项、属性面板描述、强类型配置

pub mod settings;
pub mod properties;

pub use self::settings::Settings;
pub use self::properties::{Properties, Property, PropertyKind, TextType};

use crate::compiler::PatternCompiler;
use crate::error::PpsResult;

/// 设置项键名
pub const PROPERTIES_REGEX_PATTERN: &str = "regex_pattern";

/// 属性面板显示名
pub const REGEX_PATTERN_LABEL: &str = "Regex Pattern";

/// 默认模板
pub const DEFAULT_REGEX_PATTERN: &str = "[profile:{}]";

/// 模板输入框的帮助说明
pub const REGEX_PATTERN_HELP_TEXT: &str = "Put {} where you want to have the profile name be

ℹ For example
- [profile:{}]
- [p:{}]";

/// 脚本配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptConfig {
    // Profile标签模板
    pub regex_pattern: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            regex_pattern: DEFAULT_REGEX_PATTERN.to_string(),
        }
    }
}

impl ScriptConfig {
    /// 从宿主设置中读取（未设置时取默认层）
    pub fn from_settings(settings: &Settings) -> Self {
        let regex_pattern = settings
            .get_string(PROPERTIES_REGEX_PATTERN)
            .unwrap_or(DEFAULT_REGEX_PATTERN)
            .to_string();
        Self { regex_pattern }
    }

    /// 写回宿主设置
    pub fn write_to(&self, settings: &mut Settings) {
        settings.set_string(PROPERTIES_REGEX_PATTERN, &self.regex_pattern);
    }

    /// 模板是否合法
    pub fn validate(&self) -> PpsResult<()> {
        PatternCompiler::validate(&self.regex_pattern)
    }
}

/// 配置管理器
pub struct ConfigManager;

impl ConfigManager {
    /// 获取默认配置
    pub fn get_default() -> ScriptConfig {
        ScriptConfig::default()
    }

    /// 自定义配置
    pub fn custom() -> CustomConfigBuilder {
        CustomConfigBuilder::new()
    }

    /// 写入默认值层
    pub fn apply_defaults(settings: &mut Settings) {
        settings.set_default_string(PROPERTIES_REGEX_PATTERN, DEFAULT_REGEX_PATTERN);
    }

    /// 设置面板描述
    pub fn properties() -> Properties {
        let mut props = Properties::new();
        props
            .add_text(PROPERTIES_REGEX_PATTERN, REGEX_PATTERN_LABEL, TextType::Default)
            .set_long_description(REGEX_PATTERN_HELP_TEXT);
        props
    }
}

/// 配置构建器
#[derive(Debug, Clone, Default)]
pub struct CustomConfigBuilder {
    config: ScriptConfig,
}

impl CustomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regex_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.config.regex_pattern = pattern.into();
        self
    }

    pub fn build(self) -> ScriptConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_falls_back_to_default() {
        let mut settings = Settings::new();
        assert_eq!(ScriptConfig::from_settings(&settings).regex_pattern, DEFAULT_REGEX_PATTERN);

        ConfigManager::apply_defaults(&mut settings);
        settings.set_string(PROPERTIES_REGEX_PATTERN, "[p:{}]");
        assert_eq!(ScriptConfig::from_settings(&settings).regex_pattern, "[p:{}]");
    }

    #[test]
    fn test_builder_and_write_back() {
        let config = ConfigManager::custom().regex_pattern("<{}>").build();
        let mut settings = Settings::new();
        config.write_to(&mut settings);
        assert_eq!(ScriptConfig::from_settings(&settings), config);
        assert!(config.validate().is_ok());
        assert!(ConfigManager::custom().regex_pattern("<>").build().validate().is_err());
    }

    #[test]
    fn test_properties_describe_pattern_field() {
        let props = ConfigManager::properties();
        let prop = props.get(PROPERTIES_REGEX_PATTERN).unwrap();
        assert_eq!(prop.description, REGEX_PATTERN_LABEL);
        assert_eq!(prop.kind, PropertyKind::Text(TextType::Default));
        assert!(prop.long_description.as_deref().unwrap().starts_with("Put {} where"));
    }
}

//! 宿主持久化设置（JSON对象，默认值层 + 用户值层）

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PerProfileError, PpsResult};

/// 设置数据
/// 读取时优先用户值，其次默认值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    values: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    defaults: Map<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从宿主导出的JSON构造（仅用户值层）
    pub fn from_json(json: &str) -> PpsResult<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(values) => Ok(Self {
                values,
                defaults: Map::new(),
            }),
            other => Err(PerProfileError::SettingsError(format!(
                "settings must be a JSON object, got {}",
                other
            ))),
        }
    }

    /// 导出用户值层
    pub fn to_json(&self) -> PpsResult<String> {
        Ok(serde_json::to_string(&self.values)?)
    }

    pub fn set_default_string(&mut self, key: &str, value: &str) {
        self.defaults.insert(key.to_string(), Value::String(value.to_string()));
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), Value::String(value.to_string()));
    }

    /// 读取字符串，非字符串类型视为未设置
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .or_else(|| self.defaults.get(key).and_then(Value::as_str))
    }

    pub fn get_default_string(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).and_then(Value::as_str)
    }

    /// 清除用户值，回落到默认值
    pub fn erase(&mut self, key: &str) {
        self.values.remove(key);
    }
}

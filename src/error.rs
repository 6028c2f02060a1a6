//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;

#[derive(Error, Debug)]
pub enum PerProfileError {
    // 模板相关错误
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),

    // 编译相关错误
    #[error("Regex compilation failed: {0}")]
    RegexCompileError(#[from] RegexError),

    // 配置相关错误
    #[error("Settings error: {0}")]
    SettingsError(String),
    #[error("Scene collection error: {0}")]
    SceneCollectionError(String),

    // 序列化/反序列化错误
    #[error("JSON parse failed: {0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PerProfileError {
    /// 是否属于配置错误（模板写错，运维可修复，不应中断宿主）
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PerProfileError::InvalidPattern(_) | PerProfileError::RegexCompileError(_)
        )
    }
}

// 全局Result类型
pub type PpsResult<T> = Result<T, PerProfileError>;

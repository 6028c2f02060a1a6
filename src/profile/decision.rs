//! 可见性判定结果

use std::fmt;

/// 对单个源名称的判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// 带有当前Profile标签
    Show,
    /// 带有其他Profile标签
    Hide,
    /// 没有任何Profile标签，保持原可见性
    Abstain,
}

impl Visibility {
    /// 需要写入宿主的可见性；Abstain 不写
    pub fn target(self) -> Option<bool> {
        match self {
            Visibility::Show => Some(true),
            Visibility::Hide => Some(false),
            Visibility::Abstain => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Show => "show",
            Visibility::Hide => "hide",
            Visibility::Abstain => "abstain",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

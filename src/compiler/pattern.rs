//! 编译后匹配器模型
//! 每个Profile对应一个字面量正则

use std::fmt;
use regex::Regex;

/// 单个Profile的编译结果
#[derive(Debug, Clone)]
pub struct ProfileMatcher {
    /// Profile名称（宿主提供，原样保存）
    pub profile: String,
    /// 代入模板后的标签，如 `[profile:Streaming]`
    pub tag: String,
    pub regex: Regex,
}

impl ProfileMatcher {
    /// 名称中是否包含该Profile的标签（子串匹配）
    #[inline]
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl fmt::Display for ProfileMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {:?}", self.profile, self.tag)
    }
}

/// 一次完整编译的产物：当前Profile + 全部Profile
#[derive(Debug, Clone)]
pub struct CompiledProfileSet {
    pub template: String,
    pub current: ProfileMatcher,
    pub all: Vec<ProfileMatcher>,
}

impl CompiledProfileSet {
    /// 名称是否带有任一已知Profile的标签
    pub fn is_tagged(&self, name: &str) -> bool {
        self.all.iter().any(|m| m.is_match(name))
    }

    /// 名称是否带有当前Profile的标签
    pub fn is_current(&self, name: &str) -> bool {
        self.current.is_match(name)
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.all.iter().map(|m| m.profile.as_str())
    }
}

//! Profile注册表
//! 持有当前Profile与全部Profile的编译结果，只能整体替换

use tracing::{debug, info, warn};

use super::decision::Visibility;
use crate::compiler::{CompiledProfileSet, PatternCompiler};
use crate::config::DEFAULT_REGEX_PATTERN;
use crate::error::PpsResult;
use crate::host::Host;

/// Profile注册表
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    template: String,
    compiled: Option<CompiledProfileSet>,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGEX_PATTERN)
    }
}

impl ProfileRegistry {
    /// 空注册表；首次重建前所有名称都判定为 Abstain
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            compiled: None,
        }
    }

    /// 下次重建使用的模板
    pub fn template(&self) -> &str {
        &self.template
    }

    /// 更换模板，不触发重建
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    /// 最近一次成功重建的产物
    pub fn compiled(&self) -> Option<&CompiledProfileSet> {
        self.compiled.as_ref()
    }

    pub fn is_built(&self) -> bool {
        self.compiled.is_some()
    }

    /// 用给定的Profile数据重建，失败时保留旧状态
    pub fn rebuild_with(&mut self, current_profile: &str, profile_names: &[String]) -> PpsResult<()> {
        let compiled = PatternCompiler::compile_set(&self.template, current_profile, profile_names)?;
        self.compiled = Some(compiled);
        Ok(())
    }

    /// 向宿主查询Profile后重建
    pub fn rebuild<H: Host + ?Sized>(&mut self, host: &H) -> PpsResult<()> {
        let current = host.current_profile();
        let profiles = host.profiles();
        self.rebuild_with(&current, &profiles)?;
        info!(
            "profile registry rebuilt: current={:?}, profiles={}",
            current,
            profiles.len()
        );
        Ok(())
    }

    /// 重建并记录配置错误，不向上传播
    pub fn refresh<H: Host + ?Sized>(&mut self, host: &H) -> bool {
        match self.rebuild(host) {
            Ok(()) => true,
            Err(e) => {
                warn!("failed to set regex, keeping previous profile matchers: {}", e);
                false
            }
        }
    }

    /// 判定名称可见性
    pub fn decide(&self, name: &str) -> Visibility {
        let Some(compiled) = &self.compiled else {
            return Visibility::Abstain;
        };

        if !compiled.is_tagged(name) {
            return Visibility::Abstain;
        }

        let current = compiled.is_current(name);
        debug!("found some profile string in {:?}, current profile: {}", name, current);
        if current {
            Visibility::Show
        } else {
            Visibility::Hide
        }
    }
}

//! 事件分发：宿主事件 → 重建注册表 / 重新遍历场景

use tracing::debug;

use crate::host::{FrontendEvent, Host};
use crate::profile::ProfileRegistry;
use crate::walker::{SceneWalker, WalkReport};

/// 事件对应的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 仅重新遍历当前场景
    Walk,
    /// 重建注册表后再遍历
    RebuildAndWalk,
    Ignore,
}

impl Action {
    /// 静态路由表
    pub fn route(event: &FrontendEvent) -> Self {
        match event {
            FrontendEvent::PreviewSceneChanged => Action::Walk,
            e if e.affects_profiles() => Action::RebuildAndWalk,
            _ => Action::Ignore,
        }
    }
}

/// 事件分发器，独占注册表
#[derive(Debug, Clone, Default)]
pub struct EventDispatcher {
    registry: ProfileRegistry,
}

impl EventDispatcher {
    pub fn new(registry: ProfileRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// 更换模板（下次重建生效）
    pub fn set_template(&mut self, template: &str) {
        self.registry.set_template(template);
    }

    /// 处理一条事件；被忽略的事件返回 None
    pub fn dispatch<H: Host + ?Sized>(&mut self, host: &mut H, event: &FrontendEvent) -> Option<WalkReport> {
        match Action::route(event) {
            Action::Walk => {
                debug!("the scene has changed ({}), updating all sources", event);
                Some(self.walk(host))
            }
            Action::RebuildAndWalk => {
                debug!("profiles have changed ({}), rebuilding matchers", event);
                Some(self.rebuild_and_walk(host))
            }
            Action::Ignore => None,
        }
    }

    /// 重建（失败只记录）后遍历；遍历总是执行
    pub fn rebuild_and_walk<H: Host + ?Sized>(&mut self, host: &mut H) -> WalkReport {
        self.registry.refresh(&*host);
        self.walk(host)
    }

    pub fn walk<H: Host + ?Sized>(&self, host: &mut H) -> WalkReport {
        SceneWalker::new(&self.registry).apply_current(host)
    }
}

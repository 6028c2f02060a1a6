//! 宿主抽象：脚本可用的宿主能力、句柄类型、前端事件
//!
//! 宿主（直播制作软件）拥有场景图、Profile与事件循环，脚本只能通过
//! 这里声明的窄接口观察和修改它。场景与条目列表句柄带引用计数，
//! 必须经 [`guard`] 中的守卫类型获取，保证任何退出路径都会释放。

pub mod guard;
pub mod memory;

pub use self::guard::{ItemListGuard, SceneGuard};
pub use self::memory::{ItemDesc, MemoryHost, SceneCollection, SceneDesc};

use std::fmt;
use std::str::FromStr;

use crate::error::PerProfileError;

/// 源标识（场景本身也是一种源）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceId(pub u64);

/// 已获取的场景引用，需要 `release_scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

/// 场景条目标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u64);

/// 已获取的条目列表引用，需要 `release_item_list`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListHandle(pub u64);

/// 一次条目枚举的结果
#[derive(Debug)]
pub struct ItemList {
    pub handle: ListHandle,
    pub items: Vec<ItemId>,
}

/// 前端事件
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrontendEvent {
    SceneChanged,
    PreviewSceneChanged,
    SceneListChanged,
    ProfileChanging,
    ProfileChanged,
    ProfileListChanged,
    ProfileRenamed,
    /// 脚本不关心的其他事件（保留宿主事件名）
    Other(String),
}

impl FrontendEvent {
    pub fn name(&self) -> &str {
        match self {
            FrontendEvent::SceneChanged => "scene_changed",
            FrontendEvent::PreviewSceneChanged => "preview_scene_changed",
            FrontendEvent::SceneListChanged => "scene_list_changed",
            FrontendEvent::ProfileChanging => "profile_changing",
            FrontendEvent::ProfileChanged => "profile_changed",
            FrontendEvent::ProfileListChanged => "profile_list_changed",
            FrontendEvent::ProfileRenamed => "profile_renamed",
            FrontendEvent::Other(name) => name.as_str(),
        }
    }

    /// Profile集合或当前Profile发生变化
    pub fn affects_profiles(&self) -> bool {
        matches!(
            self,
            FrontendEvent::ProfileChanged
                | FrontendEvent::ProfileListChanged
                | FrontendEvent::ProfileRenamed
        )
    }
}

impl fmt::Display for FrontendEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrontendEvent {
    type Err = PerProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(PerProfileError::InvalidInput("empty event name".to_string()));
        }
        Ok(match name.to_ascii_lowercase().as_str() {
            "scene_changed" => FrontendEvent::SceneChanged,
            "preview_scene_changed" => FrontendEvent::PreviewSceneChanged,
            "scene_list_changed" => FrontendEvent::SceneListChanged,
            "profile_changing" => FrontendEvent::ProfileChanging,
            "profile_changed" => FrontendEvent::ProfileChanged,
            "profile_list_changed" => FrontendEvent::ProfileListChanged,
            "profile_renamed" => FrontendEvent::ProfileRenamed,
            _ => FrontendEvent::Other(name.to_string()),
        })
    }
}

/// 脚本消费的宿主能力
pub trait Host {
    /// 当前Profile名称
    fn current_profile(&self) -> String;

    /// 全部Profile名称
    fn profiles(&self) -> Vec<String>;

    /// 当前预览场景对应的源；没有场景时为 None
    fn current_scene(&self) -> Option<SourceId>;

    /// 由源获取场景引用；源不是场景时为 None
    fn scene_from_source(&mut self, source: SourceId) -> Option<SceneHandle>;

    fn release_scene(&mut self, scene: SceneHandle);

    /// 枚举场景直接包含的条目（宿主原生顺序）
    fn enum_scene_items(&mut self, scene: SceneHandle) -> ItemList;

    /// 枚举分组直接包含的条目
    fn enum_group_items(&mut self, group: ItemId) -> ItemList;

    fn release_item_list(&mut self, list: ListHandle);

    fn is_group(&self, item: ItemId) -> bool;

    /// 条目所引用源的显示名
    fn source_name(&self, item: ItemId) -> String;

    fn is_visible(&self, item: ItemId) -> bool;

    fn set_visible(&mut self, item: ItemId, visible: bool);

    /// 订阅前端事件
    fn subscribe_events(&mut self);

    /// 取出下一条待投递事件
    fn poll_event(&mut self) -> Option<FrontendEvent> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_round_trip() {
        let events = [
            FrontendEvent::SceneChanged,
            FrontendEvent::PreviewSceneChanged,
            FrontendEvent::ProfileChanged,
            FrontendEvent::ProfileListChanged,
            FrontendEvent::ProfileRenamed,
        ];
        for event in events {
            assert_eq!(event.name().parse::<FrontendEvent>().unwrap(), event);
        }
        assert_eq!(
            "Streaming_Started".parse::<FrontendEvent>().unwrap(),
            FrontendEvent::Other("Streaming_Started".to_string())
        );
        assert!("  ".parse::<FrontendEvent>().is_err());
    }

    #[test]
    fn test_affects_profiles() {
        assert!(FrontendEvent::ProfileRenamed.affects_profiles());
        assert!(!FrontendEvent::ProfileChanging.affects_profiles());
        assert!(!FrontendEvent::PreviewSceneChanged.affects_profiles());
    }
}

//! 内存宿主
//! 由JSON场景集合构造，实现完整的 [`Host`] 能力，并记录句柄引用计数与可见性写入，
//! 供测试断言与命令行试运行使用

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FrontendEvent, Host, ItemId, ItemList, ListHandle, SceneHandle, SourceId};
use crate::error::{PerProfileError, PpsResult};

fn default_visible() -> bool {
    true
}

/// 场景集合描述（JSON）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneCollection {
    pub profiles: Vec<String>,
    pub current_profile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_scene: Option<String>,
    #[serde(default)]
    pub scenes: Vec<SceneDesc>,
}

/// 场景描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDesc {
    pub name: String,
    #[serde(default)]
    pub items: Vec<ItemDesc>,
}

/// 条目描述；带 children 即为分组
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDesc {
    pub name: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ItemDesc>>,
}

#[derive(Debug, Clone)]
struct SceneNode {
    name: String,
    items: Vec<ItemId>,
}

#[derive(Debug, Clone)]
struct ItemNode {
    name: String,
    visible: bool,
    children: Option<Vec<ItemId>>,
}

/// 内存宿主
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    profiles: Vec<String>,
    current_profile: String,
    current_scene: Option<usize>,
    scenes: Vec<SceneNode>,
    items: Vec<ItemNode>,

    next_handle: u64,
    open_scenes: HashSet<u64>,
    open_lists: HashSet<u64>,

    subscribed: bool,
    pending: VecDeque<FrontendEvent>,
    visibility_writes: Vec<(ItemId, bool)>,
}

impl MemoryHost {
    pub fn from_json(json: &str) -> PpsResult<Self> {
        let collection: SceneCollection = serde_json::from_str(json)?;
        Self::from_collection(collection)
    }

    pub fn from_collection(collection: SceneCollection) -> PpsResult<Self> {
        if !collection.profiles.contains(&collection.current_profile) {
            return Err(PerProfileError::SceneCollectionError(format!(
                "current profile {:?} is not in the profile list",
                collection.current_profile
            )));
        }

        let mut host = MemoryHost {
            profiles: collection.profiles,
            current_profile: collection.current_profile,
            ..Default::default()
        };

        for scene in &collection.scenes {
            if host.scene_index(&scene.name).is_some() {
                return Err(PerProfileError::SceneCollectionError(format!(
                    "duplicate scene name {:?}",
                    scene.name
                )));
            }
            let items: Vec<ItemId> = scene.items.iter().map(|item| host.insert_item(item)).collect();
            host.scenes.push(SceneNode {
                name: scene.name.clone(),
                items,
            });
        }

        if let Some(name) = &collection.current_scene {
            let idx = host.scene_index(name).ok_or_else(|| {
                PerProfileError::SceneCollectionError(format!("current scene {:?} does not exist", name))
            })?;
            host.current_scene = Some(idx);
        }

        debug!(
            "memory host loaded: profiles={}, scenes={}, items={}",
            host.profiles.len(),
            host.scenes.len(),
            host.items.len()
        );
        Ok(host)
    }

    fn insert_item(&mut self, desc: &ItemDesc) -> ItemId {
        let children: Option<Vec<ItemId>> = desc
            .children
            .as_ref()
            .map(|children| children.iter().map(|child| self.insert_item(child)).collect());
        self.items.push(ItemNode {
            name: desc.name.clone(),
            visible: desc.visible,
            children,
        });
        ItemId((self.items.len() - 1) as u64)
    }

    fn scene_index(&self, name: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.name == name)
    }

    fn item(&self, item: ItemId) -> Option<&ItemNode> {
        self.items.get(item.0 as usize)
    }

    fn alloc_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    fn open_list(&mut self, items: Vec<ItemId>) -> ItemList {
        let handle = self.alloc_handle();
        self.open_lists.insert(handle);
        ItemList {
            handle: ListHandle(handle),
            items,
        }
    }

    /// 导出当前状态
    pub fn to_collection(&self) -> SceneCollection {
        SceneCollection {
            profiles: self.profiles.clone(),
            current_profile: self.current_profile.clone(),
            current_scene: self.current_scene.map(|idx| self.scenes[idx].name.clone()),
            scenes: self
                .scenes
                .iter()
                .map(|scene| SceneDesc {
                    name: scene.name.clone(),
                    items: scene.items.iter().map(|&id| self.describe_item(id)).collect(),
                })
                .collect(),
        }
    }

    fn describe_item(&self, id: ItemId) -> ItemDesc {
        let node = &self.items[id.0 as usize];
        ItemDesc {
            name: node.name.clone(),
            visible: node.visible,
            children: node
                .children
                .as_ref()
                .map(|children| children.iter().map(|&child| self.describe_item(child)).collect()),
        }
    }

    /// 投递事件；未订阅时宿主直接丢弃
    pub fn emit(&mut self, event: FrontendEvent) {
        if self.subscribed {
            self.pending.push_back(event);
        } else {
            debug!("event {} dropped: no subscriber", event);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    /// 切换当前Profile
    pub fn set_current_profile(&mut self, name: &str) -> PpsResult<()> {
        if !self.profiles.iter().any(|p| p == name) {
            return Err(PerProfileError::InvalidInput(format!("unknown profile {:?}", name)));
        }
        self.current_profile = name.to_string();
        self.emit(FrontendEvent::ProfileChanged);
        Ok(())
    }

    /// 新增Profile
    pub fn add_profile(&mut self, name: &str) -> PpsResult<()> {
        if self.profiles.iter().any(|p| p == name) {
            return Err(PerProfileError::InvalidInput(format!("profile {:?} already exists", name)));
        }
        self.profiles.push(name.to_string());
        self.emit(FrontendEvent::ProfileListChanged);
        Ok(())
    }

    /// 重命名Profile（当前Profile同步改名）
    pub fn rename_profile(&mut self, old: &str, new: &str) -> PpsResult<()> {
        if self.profiles.iter().any(|p| p == new) {
            return Err(PerProfileError::InvalidInput(format!("profile {:?} already exists", new)));
        }
        let slot = self
            .profiles
            .iter_mut()
            .find(|p| p.as_str() == old)
            .ok_or_else(|| PerProfileError::InvalidInput(format!("unknown profile {:?}", old)))?;
        *slot = new.to_string();
        if self.current_profile == old {
            self.current_profile = new.to_string();
        }
        self.emit(FrontendEvent::ProfileRenamed);
        Ok(())
    }

    /// 切换预览场景
    pub fn set_preview_scene(&mut self, name: &str) -> PpsResult<()> {
        let idx = self
            .scene_index(name)
            .ok_or_else(|| PerProfileError::InvalidInput(format!("unknown scene {:?}", name)))?;
        self.current_scene = Some(idx);
        self.emit(FrontendEvent::PreviewSceneChanged);
        Ok(())
    }

    /// 用户手动修改源名称（宿主不会为此发出事件）
    pub fn rename_source(&mut self, item: ItemId, name: &str) {
        if let Some(node) = self.items.get_mut(item.0 as usize) {
            node.name = name.to_string();
        }
    }

    /// 按显示名查找条目（含任意深度的分组）
    pub fn find_item(&self, name: &str) -> Option<ItemId> {
        self.items
            .iter()
            .position(|node| node.name == name)
            .map(|idx| ItemId(idx as u64))
    }

    /// 按显示名读取可见性
    pub fn visibility_of(&self, name: &str) -> Option<bool> {
        self.find_item(name).map(|id| self.items[id.0 as usize].visible)
    }

    /// 尚未释放的场景与列表句柄数
    pub fn outstanding_handles(&self) -> usize {
        self.open_scenes.len() + self.open_lists.len()
    }

    /// 所有可见性写入记录
    pub fn visibility_writes(&self) -> &[(ItemId, bool)] {
        &self.visibility_writes
    }

    pub fn clear_visibility_writes(&mut self) {
        self.visibility_writes.clear();
    }
}

impl Host for MemoryHost {
    fn current_profile(&self) -> String {
        self.current_profile.clone()
    }

    fn profiles(&self) -> Vec<String> {
        self.profiles.clone()
    }

    fn current_scene(&self) -> Option<SourceId> {
        self.current_scene.map(|idx| SourceId(idx as u64))
    }

    fn scene_from_source(&mut self, source: SourceId) -> Option<SceneHandle> {
        if source.0 as usize >= self.scenes.len() {
            return None;
        }
        // 句柄高位记录场景下标
        let handle = (source.0 << 32) | self.alloc_handle();
        self.open_scenes.insert(handle);
        Some(SceneHandle(handle))
    }

    fn release_scene(&mut self, scene: SceneHandle) {
        if !self.open_scenes.remove(&scene.0) {
            tracing::warn!("release of unknown scene handle {}", scene.0);
        }
    }

    fn enum_scene_items(&mut self, scene: SceneHandle) -> ItemList {
        let items = if self.open_scenes.contains(&scene.0) {
            self.scenes
                .get((scene.0 >> 32) as usize)
                .map(|node| node.items.clone())
                .unwrap_or_default()
        } else {
            tracing::warn!("enumeration on unknown scene handle {}", scene.0);
            Vec::new()
        };
        self.open_list(items)
    }

    fn enum_group_items(&mut self, group: ItemId) -> ItemList {
        let items = self
            .item(group)
            .and_then(|node| node.children.clone())
            .unwrap_or_default();
        self.open_list(items)
    }

    fn release_item_list(&mut self, list: ListHandle) {
        if !self.open_lists.remove(&list.0) {
            tracing::warn!("release of unknown item list handle {}", list.0);
        }
    }

    fn is_group(&self, item: ItemId) -> bool {
        self.item(item).is_some_and(|node| node.children.is_some())
    }

    fn source_name(&self, item: ItemId) -> String {
        self.item(item).map(|node| node.name.clone()).unwrap_or_default()
    }

    fn is_visible(&self, item: ItemId) -> bool {
        self.item(item).is_some_and(|node| node.visible)
    }

    fn set_visible(&mut self, item: ItemId, visible: bool) {
        if let Some(node) = self.items.get_mut(item.0 as usize) {
            node.visible = visible;
            self.visibility_writes.push((item, visible));
        }
    }

    fn subscribe_events(&mut self) {
        self.subscribed = true;
    }

    fn poll_event(&mut self) -> Option<FrontendEvent> {
        self.pending.pop_front()
    }
}

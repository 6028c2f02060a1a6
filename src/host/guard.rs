//! 宿主句柄守卫
//! 获取后立即使用，离开作用域（含panic展开）时释放

use super::{Host, ItemId, ItemList, ListHandle, SceneHandle, SourceId};

/// 场景引用守卫
pub struct SceneGuard<'h, H: Host + ?Sized> {
    host: &'h mut H,
    scene: SceneHandle,
}

impl<'h, H: Host + ?Sized> SceneGuard<'h, H> {
    /// 由源获取场景；源不是场景时返回 None，无需释放
    pub fn acquire(host: &'h mut H, source: SourceId) -> Option<Self> {
        let scene = host.scene_from_source(source)?;
        Some(Self { host, scene })
    }

    /// 枚举场景条目，列表守卫先于场景守卫释放
    pub fn items(&mut self) -> ItemListGuard<'_, H> {
        let scene = self.scene;
        ItemListGuard::scene_items(&mut *self.host, scene)
    }
}

impl<H: Host + ?Sized> Drop for SceneGuard<'_, H> {
    fn drop(&mut self) {
        self.host.release_scene(self.scene);
    }
}

/// 条目列表守卫
pub struct ItemListGuard<'h, H: Host + ?Sized> {
    host: &'h mut H,
    handle: ListHandle,
    items: Vec<ItemId>,
}

impl<'h, H: Host + ?Sized> ItemListGuard<'h, H> {
    pub fn scene_items(host: &'h mut H, scene: SceneHandle) -> Self {
        let list = host.enum_scene_items(scene);
        Self::wrap(host, list)
    }

    pub fn group_items(host: &'h mut H, group: ItemId) -> Self {
        let list = host.enum_group_items(group);
        Self::wrap(host, list)
    }

    fn wrap(host: &'h mut H, list: ItemList) -> Self {
        let ItemList { handle, items } = list;
        Self { host, handle, items }
    }

    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 同时借出宿主与条目，便于遍历时修改条目
    pub fn split(&mut self) -> (&mut H, &[ItemId]) {
        (&mut *self.host, &self.items)
    }
}

impl<H: Host + ?Sized> Drop for ItemListGuard<'_, H> {
    fn drop(&mut self) {
        self.host.release_item_list(self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    const COLLECTION: &str = r#"{
        "profiles": ["A"],
        "current_profile": "A",
        "current_scene": "Main",
        "scenes": [
            { "name": "Main", "items": [
                { "name": "Cam" },
                { "name": "Group", "children": [ { "name": "Logo" } ] }
            ]}
        ]
    }"#;

    #[test]
    fn test_guards_release_in_order() {
        let mut host = MemoryHost::from_json(COLLECTION).unwrap();
        let source = host.current_scene().unwrap();
        {
            let mut scene = SceneGuard::acquire(&mut host, source).unwrap();
            let mut list = scene.items();
            assert_eq!(list.len(), 2);
            let (host, items) = list.split();
            let group = items[1];
            assert!(host.is_group(group));
            let nested = ItemListGuard::group_items(host, group);
            assert_eq!(nested.len(), 1);
        }
        assert_eq!(host.outstanding_handles(), 0);
    }

    #[test]
    fn test_guards_release_on_panic() {
        let mut host = MemoryHost::from_json(COLLECTION).unwrap();
        let source = host.current_scene().unwrap();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut scene = SceneGuard::acquire(&mut host, source).unwrap();
            let _list = scene.items();
            panic!("traversal failed");
        }));
        assert!(result.is_err());
        assert_eq!(host.outstanding_handles(), 0);
    }
}

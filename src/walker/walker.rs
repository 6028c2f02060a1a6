//! 场景遍历器：对当前场景的每个条目应用可见性判定
//!
//! 只展开一层分组。分组内的分组与作为源嵌套的场景只判定自身名称，
//! 其内部条目保持原可见性。

use tracing::debug;

use super::report::{ItemOutcome, WalkReport};
use crate::host::{Host, ItemId, ItemListGuard, SceneGuard, SourceId};
use crate::profile::ProfileRegistry;

/// 场景遍历器
#[derive(Debug, Clone, Copy)]
pub struct SceneWalker<'r> {
    registry: &'r ProfileRegistry,
}

impl<'r> SceneWalker<'r> {
    pub fn new(registry: &'r ProfileRegistry) -> Self {
        Self { registry }
    }

    /// 遍历宿主当前场景
    pub fn apply_current<H: Host + ?Sized>(&self, host: &mut H) -> WalkReport {
        match host.current_scene() {
            Some(scene) => self.apply(host, scene),
            None => {
                debug!("no current scene, nothing to update");
                WalkReport::default()
            }
        }
    }

    /// 遍历指定场景
    pub fn apply<H: Host + ?Sized>(&self, host: &mut H, scene_source: SourceId) -> WalkReport {
        let Some(mut scene) = SceneGuard::acquire(host, scene_source) else {
            debug!("source #{} is not a scene, skipped", scene_source.0);
            return WalkReport::default();
        };

        let mut report = WalkReport::for_scene(scene_source);
        let mut list = scene.items();
        let (host, items) = list.split();
        for &item in items {
            if host.is_group(item) {
                self.update_group(host, item, &mut report);
            } else {
                self.update_item(host, item, false, &mut report);
            }
        }

        debug!("scene walk finished: {}", report);
        report
    }

    /// 分组：先判定分组本身，再判定其直接子条目
    fn update_group<H: Host + ?Sized>(&self, host: &mut H, group: ItemId, report: &mut WalkReport) {
        self.update_item(host, group, false, report);

        let mut children = ItemListGuard::group_items(host, group);
        let (host, items) = children.split();
        for &child in items {
            self.update_item(host, child, true, report);
        }
    }

    /// 判定单个条目并写入宿主，返回处理后的可见性
    fn update_item<H: Host + ?Sized>(
        &self,
        host: &mut H,
        item: ItemId,
        in_group: bool,
        report: &mut WalkReport,
    ) -> bool {
        let name = host.source_name(item);
        let decision = self.registry.decide(&name);

        let visible = match decision.target() {
            Some(visible) => {
                host.set_visible(item, visible);
                debug!("  {} {:?}", if visible { "showing" } else { "hiding" }, name);
                visible
            }
            None => host.is_visible(item),
        };

        report.push(ItemOutcome {
            item,
            name,
            decision,
            visible,
            in_group,
        });
        visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::profile::Visibility;

    const SCENARIO: &str = r#"{
        "profiles": ["Streaming", "Recording"],
        "current_profile": "Streaming",
        "current_scene": "Main",
        "scenes": [
            { "name": "Main", "items": [
                { "name": "Webcam [profile:Streaming]", "visible": false },
                { "name": "Webcam [profile:Recording]", "visible": true },
                { "name": "Webcam", "visible": false },
                { "name": "Overlays [profile:Recording]", "visible": true, "children": [
                    { "name": "Logo [profile:Recording]", "visible": true },
                    { "name": "Chat [profile:Streaming]", "visible": false },
                    { "name": "Inner", "children": [
                        { "name": "Deep [profile:Recording]", "visible": true }
                    ]}
                ]},
                { "name": "Nested Scene [profile:Streaming]", "visible": false }
            ]},
            { "name": "Nested Scene [profile:Streaming]", "items": [
                { "name": "Inside [profile:Recording]", "visible": true }
            ]}
        ]
    }"#;

    fn setup() -> (MemoryHost, ProfileRegistry) {
        let host = MemoryHost::from_json(SCENARIO).unwrap();
        let mut registry = ProfileRegistry::default();
        registry.rebuild(&host).unwrap();
        (host, registry)
    }

    #[test]
    fn test_scenario_visibility() {
        let (mut host, registry) = setup();
        let report = SceneWalker::new(&registry).apply_current(&mut host);

        assert_eq!(host.visibility_of("Webcam [profile:Streaming]"), Some(true));
        assert_eq!(host.visibility_of("Webcam [profile:Recording]"), Some(false));
        assert_eq!(host.visibility_of("Webcam"), Some(false));

        // 分组与子条目各自判定
        assert_eq!(host.visibility_of("Overlays [profile:Recording]"), Some(false));
        assert_eq!(host.visibility_of("Logo [profile:Recording]"), Some(false));
        assert_eq!(host.visibility_of("Chat [profile:Streaming]"), Some(true));

        let webcam = report.outcome("Webcam").unwrap();
        assert_eq!(webcam.decision, Visibility::Abstain);
        assert!(!webcam.visible);
        assert!(report.outcome("Logo [profile:Recording]").unwrap().in_group);
        assert!(!report.outcome("Webcam [profile:Streaming]").unwrap().in_group);
    }

    #[test]
    fn test_abstain_does_not_write() {
        let (mut host, registry) = setup();
        SceneWalker::new(&registry).apply_current(&mut host);

        let webcam = host.find_item("Webcam").unwrap();
        assert!(host.visibility_writes().iter().all(|(item, _)| *item != webcam));
    }

    #[test]
    fn test_only_one_level_of_grouping() {
        let (mut host, registry) = setup();
        let report = SceneWalker::new(&registry).apply_current(&mut host);

        // 二级分组的子条目与嵌套场景的内部条目都不处理
        assert_eq!(host.visibility_of("Deep [profile:Recording]"), Some(true));
        assert_eq!(host.visibility_of("Inside [profile:Recording]"), Some(true));
        assert!(report.outcome("Deep [profile:Recording]").is_none());
        assert!(report.outcome("Inner").is_some());

        // 嵌套场景作为源时只判定自身名称
        let nested = report.outcome("Nested Scene [profile:Streaming]").unwrap();
        assert_eq!(nested.decision, Visibility::Show);
    }

    #[test]
    fn test_walk_is_idempotent() {
        let (mut host, registry) = setup();
        let walker = SceneWalker::new(&registry);

        let first = walker.apply_current(&mut host);
        let after_first = host.to_collection();
        let second = walker.apply_current(&mut host);

        assert_eq!(host.to_collection(), after_first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_handles_released_after_walk() {
        let (mut host, registry) = setup();
        let report = SceneWalker::new(&registry).apply_current(&mut host);
        assert_eq!(host.outstanding_handles(), 0);
        assert_eq!(report.outcomes.len(), 8);
        assert_eq!(report.untouched(), 2);
    }

    #[test]
    fn test_no_current_scene() {
        let mut host = MemoryHost::from_json(
            r#"{"profiles": ["A"], "current_profile": "A", "scenes": [{"name": "S"}]}"#,
        )
        .unwrap();
        let registry = ProfileRegistry::default();
        let report = SceneWalker::new(&registry).apply_current(&mut host);
        assert!(report.is_skipped());
        assert_eq!(host.outstanding_handles(), 0);
    }

    #[test]
    fn test_non_scene_source_is_skipped() {
        let (mut host, registry) = setup();
        let report = SceneWalker::new(&registry).apply(&mut host, SourceId(99));
        assert!(report.is_skipped());
        assert!(report.outcomes.is_empty());
        assert!(host.visibility_writes().is_empty());
        assert_eq!(host.outstanding_handles(), 0);
    }

    #[test]
    fn test_unbuilt_registry_touches_nothing() {
        let mut host = MemoryHost::from_json(SCENARIO).unwrap();
        let registry = ProfileRegistry::default();
        let report = SceneWalker::new(&registry).apply_current(&mut host);
        assert_eq!(report.untouched(), report.outcomes.len());
        assert!(host.visibility_writes().is_empty());
    }
}

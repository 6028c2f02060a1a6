//! 场景遍历结果

use std::fmt;

use crate::host::{ItemId, SourceId};
use crate::profile::Visibility;

/// 单个条目的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    pub item: ItemId,
    pub name: String,
    pub decision: Visibility,
    /// 处理后的可见性（Abstain 时为宿主原值）
    pub visible: bool,
    /// 是否位于分组内
    pub in_group: bool,
}

/// 一次场景遍历的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkReport {
    pub scene: Option<SourceId>,
    pub outcomes: Vec<ItemOutcome>,
}

impl WalkReport {
    pub fn for_scene(scene: SourceId) -> Self {
        Self {
            scene: Some(scene),
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: ItemOutcome) {
        self.outcomes.push(outcome);
    }

    fn count(&self, decision: Visibility) -> usize {
        self.outcomes.iter().filter(|o| o.decision == decision).count()
    }

    pub fn shown(&self) -> usize {
        self.count(Visibility::Show)
    }

    pub fn hidden(&self) -> usize {
        self.count(Visibility::Hide)
    }

    pub fn untouched(&self) -> usize {
        self.count(Visibility::Abstain)
    }

    /// 按名称查找结果
    pub fn outcome(&self, name: &str) -> Option<&ItemOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// 没有遍历任何场景
    pub fn is_skipped(&self) -> bool {
        self.scene.is_none()
    }
}

impl fmt::Display for WalkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scene {
            None => f.write_str("no scene"),
            Some(scene) => write!(
                f,
                "scene #{}: {} items, {} shown, {} hidden, {} untouched",
                scene.0,
                self.outcomes.len(),
                self.shown(),
                self.hidden(),
                self.untouched()
            ),
        }
    }
}

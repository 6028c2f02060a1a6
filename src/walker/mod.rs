//! 场景遍历模块
pub mod report;
pub mod walker;

pub use self::report::{ItemOutcome, WalkReport};
pub use self::walker::SceneWalker;

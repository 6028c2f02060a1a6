//! Profile模块：注册表与可见性判定
pub mod decision;
pub mod registry;

pub use self::decision::Visibility;
pub use self::registry::ProfileRegistry;

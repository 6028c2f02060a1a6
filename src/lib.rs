//! perprofile-sources - 按当前Profile自动显示/隐藏场景中的源

// 导出全局错误类型
pub use self::error::{PerProfileError, PpsResult};

// 导出配置模块
pub use self::config::{
    ConfigManager, CustomConfigBuilder, ScriptConfig, Settings, Properties, Property,
    PropertyKind, TextType, DEFAULT_REGEX_PATTERN, PROPERTIES_REGEX_PATTERN,
    REGEX_PATTERN_HELP_TEXT, REGEX_PATTERN_LABEL,
};

// 导出编译模块核心接口
pub use self::compiler::{CompiledProfileSet, ParsedTemplate, PatternCompiler, ProfileMatcher, PLACEHOLDER};

// 导出Profile模块核心接口
pub use self::profile::{ProfileRegistry, Visibility};

// 导出宿主抽象
pub use self::host::{
    FrontendEvent, Host, ItemDesc, ItemId, ItemList, ItemListGuard, ListHandle, MemoryHost, SceneCollection, SceneDesc,
    SceneGuard, SceneHandle, SourceId,
};

// 导出遍历与脚本入口
pub use self::walker::{ItemOutcome, SceneWalker, WalkReport};
pub use self::script::{Action, EventDispatcher, PerProfileScript, SCRIPT_DESCRIPTION};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod compiler;
pub mod profile;
pub mod host;
pub mod walker;
pub mod script;

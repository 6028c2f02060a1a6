//! 脚本模块：生命周期入口与事件分发
pub mod dispatcher;
pub mod script;

pub use self::dispatcher::{Action, EventDispatcher};
pub use self::script::{PerProfileScript, SCRIPT_DESCRIPTION};

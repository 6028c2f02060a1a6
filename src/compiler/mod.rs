//! 编译模块：将Profile模板编译为可执行的字面量正则
pub mod pattern;
pub mod compiler;

pub use self::pattern::{ProfileMatcher, CompiledProfileSet};
pub use self::compiler::{PatternCompiler, ParsedTemplate, PLACEHOLDER};

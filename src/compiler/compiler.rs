//! 模板编译器核心
//! 仅负责把 `[profile:{}]` 形式的模板代入Profile名并编译为字面量正则

use std::time::Instant;
use regex::Regex;
use once_cell::sync::Lazy;
use tracing::debug;

use super::pattern::{CompiledProfileSet, ProfileMatcher};
use crate::error::{PerProfileError, PpsResult};

/// 模板占位符
pub const PLACEHOLDER: &str = "{}";

/// 模板词法：转义花括号、占位符、孤立花括号
static TEMPLATE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{|\}\}|\{\}|\{|\}").unwrap()
});

/// 解析后的模板：占位符前后的字面量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTemplate {
    pub prefix: String,
    pub suffix: String,
}

impl ParsedTemplate {
    /// 代入Profile名
    pub fn substitute(&self, profile_name: &str) -> String {
        let mut tag = String::with_capacity(self.prefix.len() + profile_name.len() + self.suffix.len());
        tag.push_str(&self.prefix);
        tag.push_str(profile_name);
        tag.push_str(&self.suffix);
        tag
    }
}

/// 模板编译器
pub struct PatternCompiler;

impl PatternCompiler {
    /// 解析模板，要求恰好一个占位符；`{{` / `}}` 视为字面量花括号
    pub fn parse(template: &str) -> PpsResult<ParsedTemplate> {
        let mut prefix = String::with_capacity(template.len());
        let mut suffix = String::new();
        let mut placeholders = 0usize;
        let mut last = 0usize;

        for token in TEMPLATE_TOKEN.find_iter(template) {
            let target = if placeholders == 0 { &mut prefix } else { &mut suffix };
            target.push_str(&template[last..token.start()]);
            last = token.end();

            match token.as_str() {
                "{{" => target.push('{'),
                "}}" => target.push('}'),
                PLACEHOLDER => placeholders += 1,
                lone => {
                    return Err(PerProfileError::InvalidPattern(format!(
                        "unmatched '{}' at byte {} in {:?}",
                        lone,
                        token.start(),
                        template
                    )));
                }
            }
        }

        let target = if placeholders == 0 { &mut prefix } else { &mut suffix };
        target.push_str(&template[last..]);

        match placeholders {
            1 => Ok(ParsedTemplate { prefix, suffix }),
            0 => Err(PerProfileError::InvalidPattern(format!(
                "{:?} does not contain the {} placeholder",
                template, PLACEHOLDER
            ))),
            n => Err(PerProfileError::InvalidPattern(format!(
                "{:?} contains {} placeholders, expected exactly one",
                template, n
            ))),
        }
    }

    /// 校验模板
    pub fn validate(template: &str) -> PpsResult<()> {
        Self::parse(template).map(|_| ())
    }

    /// 编译单个Profile匹配器
    pub fn compile(template: &str, profile_name: &str) -> PpsResult<ProfileMatcher> {
        let parsed = Self::parse(template)?;
        Self::compile_parsed(&parsed, profile_name)
    }

    /// 编译当前Profile与全部Profile；任一失败则整体失败
    pub fn compile_set(
        template: &str,
        current_profile: &str,
        profile_names: &[String],
    ) -> PpsResult<CompiledProfileSet> {
        let start = Instant::now();
        let parsed = Self::parse(template)?;

        let current = Self::compile_parsed(&parsed, current_profile)?;
        let all = profile_names
            .iter()
            .map(|name| Self::compile_parsed(&parsed, name))
            .collect::<PpsResult<Vec<_>>>()?;

        debug!(
            "profile matchers compiled: template={:?}, current={:?}, total={}, elapsed={:?}",
            template,
            current_profile,
            all.len(),
            start.elapsed()
        );

        Ok(CompiledProfileSet {
            template: template.to_string(),
            current,
            all,
        })
    }

    fn compile_parsed(parsed: &ParsedTemplate, profile_name: &str) -> PpsResult<ProfileMatcher> {
        let tag = parsed.substitute(profile_name);
        // 转义后只做字面量子串搜索
        let regex = Regex::new(&regex::escape(&tag))?;
        let matcher = ProfileMatcher {
            profile: profile_name.to_string(),
            tag,
            regex,
        };
        debug!("  {}", matcher);
        Ok(matcher)
    }
}

// 单元测试
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_template() {
        let parsed = PatternCompiler::parse("[profile:{}]").unwrap();
        assert_eq!(parsed.prefix, "[profile:");
        assert_eq!(parsed.suffix, "]");
        assert_eq!(parsed.substitute("Streaming"), "[profile:Streaming]");
    }

    #[test]
    fn test_parse_missing_placeholder() {
        let err = PatternCompiler::parse("[profile:]").unwrap_err();
        assert!(matches!(err, PerProfileError::InvalidPattern(_)));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_parse_multiple_placeholders() {
        let err = PatternCompiler::parse("{}-{}").unwrap_err();
        assert!(matches!(err, PerProfileError::InvalidPattern(_)));
    }

    #[test]
    fn test_parse_escaped_braces() {
        // `{{{}}}` 代入后为 `{name}`
        let parsed = PatternCompiler::parse("{{{}}}").unwrap();
        assert_eq!(parsed.substitute("a"), "{a}");

        // 只有转义花括号，没有占位符
        assert!(PatternCompiler::parse("{{}}").is_err());
    }

    #[test]
    fn test_parse_lone_brace() {
        assert!(PatternCompiler::parse("[p:{}] {").is_err());
        assert!(PatternCompiler::parse("} [p:{}]").is_err());
        assert!(PatternCompiler::parse("[p:{x}]").is_err());
    }

    #[test]
    fn test_compile_matches_substring() {
        let matcher = PatternCompiler::compile("[p:{}]", "Recording").unwrap();
        assert!(matcher.is_match("Logo [p:Recording]"));
        assert!(matcher.is_match("[p:Recording] Logo"));
        assert!(!matcher.is_match("Logo [p:Streaming]"));
        assert!(!matcher.is_match("Logo p:Recording"));
        assert_eq!(matcher.tag, "[p:Recording]");
        assert_eq!(matcher.to_string(), "Recording => \"[p:Recording]\"");
    }

    #[test]
    fn test_compile_metacharacters_are_literal() {
        let matcher = PatternCompiler::compile("[profile:{}]", "a.b*c").unwrap();
        assert!(matcher.is_match("Cam [profile:a.b*c]"));
        assert!(!matcher.is_match("Cam [profile:aXbYc]"));
        assert!(!matcher.is_match("Cam [profile:abbbc]"));
        // 模板本身的 `[` `]` 同样是字面量
        assert!(!matcher.is_match("Cam p"));
    }

    #[test]
    fn test_compile_set_all_or_nothing() {
        let names = vec!["Streaming".to_string(), "Recording".to_string()];
        let set = PatternCompiler::compile_set("[profile:{}]", "Streaming", &names).unwrap();
        assert_eq!(set.all.len(), 2);
        assert_eq!(set.current.profile, "Streaming");
        assert_eq!(set.profile_names().collect::<Vec<_>>(), vec!["Streaming", "Recording"]);

        assert!(PatternCompiler::compile_set("[profile]", "Streaming", &names).is_err());
    }
}

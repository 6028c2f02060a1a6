//! 脚本生命周期：宿主依次调用 defaults → properties → load → update，
//! 之后按事件回调 on_event

use tracing::{debug, info};

use super::dispatcher::EventDispatcher;
use crate::config::{ConfigManager, Properties, ScriptConfig, Settings};
use crate::host::{FrontendEvent, Host};
use crate::profile::ProfileRegistry;
use crate::walker::WalkReport;

/// 脚本描述
pub const SCRIPT_DESCRIPTION: &str =
    "Automatically hides and shows Sources based on the currently selected Profile";

/// 按Profile显示/隐藏源的脚本
#[derive(Debug, Clone)]
pub struct PerProfileScript {
    config: ScriptConfig,
    dispatcher: EventDispatcher,
}

impl Default for PerProfileScript {
    fn default() -> Self {
        Self::new(ConfigManager::get_default())
    }
}

impl PerProfileScript {
    pub fn new(config: ScriptConfig) -> Self {
        let dispatcher = EventDispatcher::new(ProfileRegistry::new(config.regex_pattern.clone()));
        Self { config, dispatcher }
    }

    pub fn description() -> &'static str {
        SCRIPT_DESCRIPTION
    }

    /// 写入默认设置
    pub fn defaults(settings: &mut Settings) {
        ConfigManager::apply_defaults(settings);
    }

    /// 设置面板
    pub fn properties() -> Properties {
        debug!("script_properties");
        ConfigManager::properties()
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.config
    }

    pub fn registry(&self) -> &ProfileRegistry {
        self.dispatcher.registry()
    }

    /// 订阅事件；首次重建交给随后的 update
    pub fn load<H: Host + ?Sized>(&mut self, host: &mut H) {
        debug!("script_load");
        host.subscribe_events();
        info!("subscribed to frontend events");
    }

    /// 设置变更：读取模板，重建并遍历
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H, settings: &Settings) -> WalkReport {
        debug!("script_update");
        self.config = ScriptConfig::from_settings(settings);
        self.dispatcher.set_template(&self.config.regex_pattern);
        self.dispatcher.rebuild_and_walk(host)
    }

    /// 宿主事件回调
    pub fn on_event<H: Host + ?Sized>(&mut self, host: &mut H, event: &FrontendEvent) -> Option<WalkReport> {
        self.dispatcher.dispatch(host, event)
    }

    /// 逐条投递宿主积压的事件，返回已处理（未被忽略）的遍历结果
    pub fn pump<H: Host + ?Sized>(&mut self, host: &mut H) -> Vec<WalkReport> {
        let mut reports = Vec::new();
        while let Some(event) = host.poll_event() {
            if let Some(report) = self.on_event(host, &event) {
                reports.push(report);
            }
        }
        reports
    }
}

//! perprofile-sources 命令行试运行工具
//! 在内存宿主上跑完整的脚本生命周期，并输出各条目的最终可见性

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use perprofile_sources::{
    FrontendEvent, ItemDesc, MemoryHost, PerProfileScript, SceneCollection, Settings,
    WalkReport, PROPERTIES_REGEX_PATTERN,
};

#[derive(Parser, Debug)]
#[command(name = "perprofile-sources")]
#[command(version)]
#[command(about = "Dry-run the per-profile source visibility rules against a scene collection", long_about = None)]
struct Cli {
    /// Scene collection JSON file
    #[arg(short, long, value_name = "FILE")]
    collection: PathBuf,

    /// Settings JSON file (host-exported script settings)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Override the profile tag pattern, e.g. "[p:{}]"
    #[arg(short, long, value_name = "TEMPLATE")]
    pattern: Option<String>,

    /// Switch to this profile after loading (emits profile_changed)
    #[arg(long, value_name = "NAME")]
    profile: Option<String>,

    /// Switch the preview to this scene after loading (emits preview_scene_changed)
    #[arg(long, value_name = "NAME")]
    scene: Option<String>,

    /// Extra frontend events to deliver, by name (repeatable)
    #[arg(long = "emit", value_name = "EVENT")]
    emit: Vec<String>,

    /// Print the resulting collection as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging (debug level)
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read settings {}", path.display()))?;
            Settings::from_json(&raw)
                .with_context(|| format!("failed to parse settings {}", path.display()))?
        }
        None => Settings::new(),
    };
    PerProfileScript::defaults(&mut settings);
    if let Some(pattern) = &cli.pattern {
        settings.set_string(PROPERTIES_REGEX_PATTERN, pattern);
    }
    Ok(settings)
}

fn print_items(items: &[ItemDesc], depth: usize) {
    for item in items {
        let mark = if item.visible { "x" } else { " " };
        println!("{}[{}] {}", "  ".repeat(depth + 1), mark, item.name);
        if let Some(children) = &item.children {
            print_items(children, depth + 1);
        }
    }
}

fn print_table(collection: &SceneCollection, reports: &[WalkReport]) {
    println!("profile: {}", collection.current_profile);
    for scene in &collection.scenes {
        let current = collection.current_scene.as_deref() == Some(scene.name.as_str());
        println!("{}scene: {}", if current { "* " } else { "  " }, scene.name);
        print_items(&scene.items, 0);
    }
    for report in reports {
        println!("walk: {}", report);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let raw = fs::read_to_string(&cli.collection)
        .with_context(|| format!("failed to read scene collection {}", cli.collection.display()))?;
    let mut host = MemoryHost::from_json(&raw)
        .with_context(|| format!("invalid scene collection {}", cli.collection.display()))?;
    let settings = load_settings(&cli)?;

    let mut script = PerProfileScript::default();
    script.load(&mut host);
    let mut reports = vec![script.update(&mut host, &settings)];

    if let Some(scene) = &cli.scene {
        host.set_preview_scene(scene)?;
    }
    if let Some(profile) = &cli.profile {
        host.set_current_profile(profile)?;
    }
    for name in &cli.emit {
        let event: FrontendEvent = name.parse()?;
        host.emit(event);
    }
    reports.extend(script.pump(&mut host));
    info!("processed {} walks", reports.len());

    let collection = host.to_collection();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&collection)?);
    } else {
        print_table(&collection, &reports);
    }
    Ok(())
}

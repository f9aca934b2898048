use crate::config::ignore::load_ignore_file;
use crate::config::provenance::{ProvenanceMap, Source};
use crate::config::schema::FileConfig;
use crate::config::{ImportsConfig, ResolvedConfig};
use crate::errors::{CrawlError, Result};
use crate::parse::ExtractionStrategy;
use std::path::{Path, PathBuf};

pub const PROJECT_CONFIG_NAME: &str = ".importcrawl.toml";

const ENV_MAX_DEPTH: &str = "IMPORTCRAWL_MAX_DEPTH";
const ENV_ENABLED: &str = "IMPORTCRAWL_ENABLED";
const ENV_STRATEGY: &str = "IMPORTCRAWL_STRATEGY";

/// CLI overrides extracted from command arguments.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub max_depth: Option<usize>,
    pub strategy: Option<ExtractionStrategy>,
    pub no_imports: bool,
    pub ignore: Vec<String>,
}

/// Resolve configuration by applying layers bottom-up:
/// 1. Built-in defaults
/// 2. User config (~/.config/importcrawl/config.toml)
/// 3. Project config (nearest .importcrawl.toml walking up from working_dir)
/// 4. Environment variables
/// 5. CLI overrides
///
/// Patterns from `.importcrawlignore` are appended last.
pub fn resolve_config(working_dir: &Path, cli: &CliOverrides) -> Result<ResolvedConfig> {
    resolve_config_with(working_dir, cli, find_user_config(), |key| {
        std::env::var(key).ok()
    })
}

/// Same as [`resolve_config`] with the user config location and the
/// environment supplied by the caller.
pub fn resolve_config_with<E>(
    working_dir: &Path,
    cli: &CliOverrides,
    user_config: Option<PathBuf>,
    env: E,
) -> Result<ResolvedConfig>
where
    E: Fn(&str) -> Option<String>,
{
    let mut prov = ProvenanceMap::new();
    let mut loaded_files = Vec::new();

    // 1. Start with built-in defaults
    let mut imports = ImportsConfig::default();
    set_all_default_provenance(&mut prov);

    // 2. User config
    if let Some(user_config_path) = user_config.filter(|p| p.is_file()) {
        let file_config = read_file_config(&user_config_path, "user")?;
        apply_file_config(
            &mut imports,
            &file_config,
            Source::UserConfig(user_config_path.clone()),
            &mut prov,
        )?;
        loaded_files.push(user_config_path);
    }

    // 3. Project config (walk up from working_dir)
    if let Some(project_config_path) = find_project_config(working_dir) {
        let file_config = read_file_config(&project_config_path, "project")?;
        apply_file_config(
            &mut imports,
            &file_config,
            Source::ProjectConfig(project_config_path.clone()),
            &mut prov,
        )?;
        loaded_files.push(project_config_path);
    }

    // 4. Environment variables
    apply_env_vars(&mut imports, &env, &mut prov)?;

    // 5. CLI overrides
    apply_cli_overrides(&mut imports, cli, &mut prov)?;

    if let Some((ignore_path, patterns)) = load_ignore_file(working_dir) {
        if !patterns.is_empty() {
            imports.ignore_patterns.extend(patterns);
            prov.set("imports.ignore", Source::IgnoreFile(ignore_path.clone()));
        }
        loaded_files.push(ignore_path);
    }

    tracing::debug!(
        enabled = imports.enabled,
        max_depth = imports.max_depth,
        strategy = %imports.strategy,
        ignore = imports.ignore_patterns.len(),
        "resolved configuration"
    );

    Ok(ResolvedConfig {
        imports,
        provenance: prov,
        loaded_files,
    })
}

fn read_file_config(path: &Path, kind: &str) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|_| {
        CrawlError::Config(format!("Could not read {kind} config: {}", path.display()))
    })?;
    FileConfig::from_toml(&content).map_err(|e| {
        CrawlError::Config(format!("Invalid {kind} config {}: {e}", path.display()))
    })
}

fn find_user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("importcrawl").join("config.toml"))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(PROJECT_CONFIG_NAME);
        if config_path.is_file() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn set_all_default_provenance(prov: &mut ProvenanceMap) {
    let defaults = [
        "imports.enabled",
        "imports.max_depth",
        "imports.max_file_size",
        "imports.strategy",
        "imports.ignore",
    ];
    for key in defaults {
        prov.set(key, Source::Default);
    }
}

fn apply_file_config(
    config: &mut ImportsConfig,
    file: &FileConfig,
    source: Source,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    let imports = &file.imports;
    if let Some(enabled) = imports.enabled {
        config.enabled = enabled;
        prov.set("imports.enabled", source.clone());
    }
    if let Some(max_depth) = imports.max_depth {
        config.max_depth = check_max_depth(max_depth, &source)?;
        prov.set("imports.max_depth", source.clone());
    }
    if let Some(max_file_size) = imports.max_file_size {
        config.max_file_size = max_file_size;
        prov.set("imports.max_file_size", source.clone());
    }
    if let Some(ref strategy) = imports.strategy {
        config.strategy = parse_strategy(strategy, &source)?;
        prov.set("imports.strategy", source.clone());
    }
    if !imports.ignore.is_empty() {
        config.ignore_patterns.extend(imports.ignore.iter().cloned());
        prov.set("imports.ignore", source);
    }
    Ok(())
}

fn apply_env_vars<E>(config: &mut ImportsConfig, env: &E, prov: &mut ProvenanceMap) -> Result<()>
where
    E: Fn(&str) -> Option<String>,
{
    if let Some(val) = env(ENV_MAX_DEPTH) {
        let source = Source::EnvVar(ENV_MAX_DEPTH.into());
        let depth = val.trim().parse::<usize>().map_err(|_| {
            CrawlError::Config(format!("{source}: expected a positive integer, got {val:?}"))
        })?;
        config.max_depth = check_max_depth(depth, &source)?;
        prov.set("imports.max_depth", source);
    }
    if let Some(val) = env(ENV_ENABLED) {
        let source = Source::EnvVar(ENV_ENABLED.into());
        config.enabled = parse_flag(&val).ok_or_else(|| {
            CrawlError::Config(format!("{source}: expected true or false, got {val:?}"))
        })?;
        prov.set("imports.enabled", source);
    }
    if let Some(val) = env(ENV_STRATEGY) {
        let source = Source::EnvVar(ENV_STRATEGY.into());
        config.strategy = parse_strategy(&val, &source)?;
        prov.set("imports.strategy", source);
    }
    Ok(())
}

fn apply_cli_overrides(
    config: &mut ImportsConfig,
    cli: &CliOverrides,
    prov: &mut ProvenanceMap,
) -> Result<()> {
    if let Some(max_depth) = cli.max_depth {
        let source = Source::CliFlag("--max-depth".into());
        config.max_depth = check_max_depth(max_depth, &source)?;
        prov.set("imports.max_depth", source);
    }
    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
        prov.set("imports.strategy", Source::CliFlag("--strategy".into()));
    }
    if cli.no_imports {
        config.enabled = false;
        prov.set("imports.enabled", Source::CliFlag("--no-imports".into()));
    }
    if !cli.ignore.is_empty() {
        config.ignore_patterns.extend(cli.ignore.iter().cloned());
        prov.set("imports.ignore", Source::CliFlag("--ignore".into()));
    }
    Ok(())
}

fn check_max_depth(depth: usize, source: &Source) -> Result<usize> {
    if depth == 0 {
        return Err(CrawlError::Config(format!(
            "{source}: max_depth must be at least 1"
        )));
    }
    Ok(depth)
}

fn parse_strategy(value: &str, source: &Source) -> Result<ExtractionStrategy> {
    value
        .parse::<ExtractionStrategy>()
        .map_err(|e| CrawlError::Config(format!("{source}: {e}")))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

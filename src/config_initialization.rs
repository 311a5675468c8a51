//! Configuration initialization and hierarchy management
//!
//! Precedence: CLI > environment > file > defaults.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::adapters::toml_config::{GatewayConfig, TomlConfigAdapter};
use crate::cli::GlobalArgs;
use crate::utils::logging::LogFormat;

/// Files tried, in order, when no `--config` is given
pub const DEFAULT_CONFIG_PATHS: &[&str] = &["vidgate.toml", "config/vidgate.toml"];

/// Resolve configuration against the process environment
pub fn initialize_configuration_hierarchy(cli: &GlobalArgs) -> Result<GatewayConfig> {
    resolve_configuration(cli, |key| std::env::var(key).ok())
}

/// Resolve configuration with an explicit environment lookup
pub fn resolve_configuration<F>(cli: &GlobalArgs, env: F) -> Result<GatewayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    // Step 1 and 2: defaults, overlaid by the config file if any
    let mut config = match config_file(cli.config.as_deref())? {
        Some(path) => {
            debug!("Loading configuration from: {}", path.display());
            TomlConfigAdapter::load_file(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => GatewayConfig::default(),
    };

    // Step 3: environment
    let applied = TomlConfigAdapter::apply_env_overrides(&mut config, env)
        .context("Invalid environment override")?;
    if applied > 0 {
        debug!("Applied {} environment variable overrides", applied);
    }

    // Step 4: command line
    apply_cli_configuration_overrides(&mut config, cli)?;

    TomlConfigAdapter::validate(&config).context("Invalid configuration")?;
    Ok(config)
}

fn config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("Config file does not exist: {}", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    Ok(DEFAULT_CONFIG_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file()))
}

fn apply_cli_configuration_overrides(config: &mut GatewayConfig, cli: &GlobalArgs) -> Result<()> {
    let mut cli_overrides = 0;

    if let Some(ffmpeg) = &cli.ffmpeg {
        config.tools.ffmpeg = ffmpeg.clone();
        cli_overrides += 1;
    }
    if let Some(ffprobe) = &cli.ffprobe {
        config.tools.ffprobe = ffprobe.clone();
        cli_overrides += 1;
    }
    if let Some(native_lib) = &cli.native_lib {
        config.native.search_paths.insert(0, native_lib.clone());
        cli_overrides += 1;
    }
    if cli.no_native {
        config.native.enabled = false;
        cli_overrides += 1;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
        cli_overrides += 1;
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = LogFormat::parse(format)?;
        cli_overrides += 1;
    }

    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    Ok(())
}

use anyhow::{bail, Context, Result};
use cashlens_finance::AnalyzerConfig;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".cashlens";
const CONFIG_FILE: &str = "config.toml";

/// `~/.cashlens/config.toml`; not created until `config init` runs.
pub fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var_os("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Resolve the analyzer config: explicit path, then ~/.cashlens/config.toml, then defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<AnalyzerConfig> {
    if let Some(p) = explicit {
        if !p.exists() {
            bail!("config not found: {}", p.display());
        }
        return read_config(p);
    }

    let p = default_config_path()?;
    if !p.exists() {
        return Ok(AnalyzerConfig::default());
    }
    read_config(&p)
}

pub fn read_config(path: &Path) -> Result<AnalyzerConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn render_config(cfg: &AnalyzerConfig) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

/// Write the default config unless one already exists. Returns the path.
pub fn init_config() -> Result<PathBuf> {
    let p = default_config_path()?;
    if p.exists() {
        eprintln!("Config already exists: {}", p.display());
        return Ok(p);
    }
    if let Some(dir) = p.parent() {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = render_config(&AnalyzerConfig::default())?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    eprintln!("Wrote {}", p.display());
    Ok(p)
}

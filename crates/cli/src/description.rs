use anyhow::{Context, Result, bail};
use optkit_argparse::Options;
use optkit_metadata::CommandSpec;
use std::path::{Path, PathBuf};

pub const DEFAULT_SPEC_NAME: &str = "optkit.json";

/// A command description together with the registry built from it.
#[derive(Debug, Clone)]
pub struct LoadedSpec {
    pub path: PathBuf,
    pub spec: CommandSpec,
    pub options: Options,
}

pub fn load_spec(spec_path: &Path) -> Result<LoadedSpec> {
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    let path = resolve_against(&cwd, spec_path);

    if !path.exists() {
        bail!("command description not found: {}", path.display());
    }

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read command description: {}", path.display()))?;
    let spec = CommandSpec::from_json(&contents)
        .with_context(|| format!("failed to parse command description: {}", path.display()))?;
    let options = spec
        .to_options()
        .with_context(|| format!("invalid options in {}", path.display()))?;

    tracing::debug!(path = %path.display(), options = options.len(), "loaded command description");
    Ok(LoadedSpec {
        path,
        spec,
        options,
    })
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

//! Hand compiled artifacts to the filesystem

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::compiled::CompiledSchema;

/// Write the SDL document, creating parent directories as needed
pub fn write_sdl(schema: &CompiledSchema, path: impl AsRef<Path>) -> Result<()> {
    write_file(path.as_ref(), schema.sdl())
}

/// Write the type model as pretty-printed JSON
pub fn write_type_model(schema: &CompiledSchema, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(&schema.type_model())?;
    write_file(path.as_ref(), &json)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote schema artifact");
    Ok(())
}

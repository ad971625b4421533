use solbind_core::{BindgenError, CompilationUnit, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes rendered bindings to the unit's path under `out_dir`.
///
/// The text goes to a temporary file in the destination directory, which is then renamed into
/// place. A failure at any step leaves no partial file behind.
pub fn write_unit(unit: &CompilationUnit, source: &str, out_dir: &Path) -> Result<PathBuf> {
    let path = unit.output_path(out_dir);
    let dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| out_dir.to_path_buf());

    let emission = |source: std::io::Error| BindgenError::Emission {
        path: path.clone(),
        source,
    };

    std::fs::create_dir_all(&dir).map_err(emission)?;
    let mut file = NamedTempFile::new_in(&dir).map_err(emission)?;
    file.write_all(source.as_bytes()).map_err(emission)?;
    file.flush().map_err(emission)?;
    file.persist(&path).map_err(|e| emission(e.error))?;

    tracing::debug!(path = %path.display(), bytes = source.len(), "wrote bindings");
    Ok(path)
}

//! Token dump discovery.

use anyhow::{Context, Result};
use jsdoc_lint_core::is_dump_file;
use std::path::{Path, PathBuf};

/// Collects the token dumps named by `paths`.
///
/// Directories are walked (honouring `.gitignore`); files are taken as given
/// when they are dumps. The result is sorted and free of duplicates.
pub fn dump_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk(path, &mut files)?;
        } else if is_dump_file(path) {
            files.push(path.clone());
        } else if path.exists() {
            tracing::warn!("Not a token dump, skipping: {}", path.display());
        } else {
            anyhow::bail!("No such file or directory: {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk(root: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut builder = ignore::WalkBuilder::new(root);
    builder.hidden(false).git_ignore(true);

    for entry in builder.build() {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();
        if path.is_file() && is_dump_file(path) {
            files.push(path.to_path_buf());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn walks_directories_for_dumps() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/ui")).unwrap();
        fs::write(tmp.path().join("src/app.tokens.json"), "{}").unwrap();
        fs::write(tmp.path().join("src/ui/menu.tokens.json"), "{}").unwrap();
        fs::write(tmp.path().join("src/app.js"), "").unwrap();
        fs::write(tmp.path().join("package.json"), "{}").unwrap();

        let files = dump_files(&[tmp.path().to_path_buf()]).unwrap();
        assert_eq!(
            files,
            vec![
                tmp.path().join("src/app.tokens.json"),
                tmp.path().join("src/ui/menu.tokens.json"),
            ]
        );
    }

    #[test]
    fn explicit_files_and_duplicates() {
        let tmp = TempDir::new().unwrap();
        let dump = tmp.path().join("a.tokens.json");
        fs::write(&dump, "{}").unwrap();
        let other = tmp.path().join("a.js");
        fs::write(&other, "").unwrap();

        let files = dump_files(&[dump.clone(), other, tmp.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![dump]);
    }

    #[test]
    fn missing_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(dump_files(&[tmp.path().join("missing")]).is_err());
    }
}

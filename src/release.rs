// Release packaging: compile assets, build the linux binary, bundle artifacts
// Mirrors the deploy flow: sass -> clean-tree check -> webpack -> build -> archive

use crate::config::ReleaseConfig;
use crate::errors::{QnError, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use git2::{Repository, StatusOptions};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Command;

/// `style_main.sass` / `style_main.scss` -> `style.css`.
/// Returns None for files that are not top-level sass entry points.
pub fn sass_name_to_css(name: &str) -> Option<String> {
    let stem = name
        .strip_suffix("_main.sass")
        .or_else(|| name.strip_suffix("_main.scss"))?;
    Some(format!("{}.css", stem))
}

/// Drives the release steps from a project root directory
pub struct Packager<'a> {
    config: &'a ReleaseConfig,
    root: PathBuf,
}

impl<'a> Packager<'a> {
    pub fn new(config: &'a ReleaseConfig, root: &Path) -> Self {
        Self {
            config,
            root: root.to_path_buf(),
        }
    }

    /// Fail early with an install hint when sassc is missing
    pub fn ensure_sassc(&self) -> Result<()> {
        let ok = Command::new("sassc")
            .arg("-h")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false);
        if !ok {
            return Err(QnError::ReleaseError(
                "sassc doesn't seem to be installed (on mac: brew install sassc)".to_string(),
            ));
        }
        Ok(())
    }

    /// Compile every `*_main.sass` / `*_main.scss` entry point into the css
    /// output dir, which must already exist.
    pub fn compile_sass(&self) -> Result<()> {
        let out_dir = self.root.join(&self.config.css_out_dir);
        if !out_dir.exists() {
            return Err(QnError::ReleaseError(format!(
                "dir '{}' doesn't exist",
                out_dir.display()
            )));
        }

        let sass_dir = self.root.join(&self.config.sass_dir);
        for entry in fs::read_dir(&sass_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(css_name) = sass_name_to_css(&name) else {
                continue;
            };

            let src = entry.path();
            let dst = out_dir.join(css_name);
            let output = Command::new("sassc")
                .arg(&src)
                .arg(&dst)
                .output()
                .map_err(|e| QnError::CommandFailed(format!("sassc: {}", e)))?;
            if !output.status.success() {
                return Err(QnError::CommandFailed(format!(
                    "sassc {}: {}",
                    src.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }
        }
        Ok(())
    }

    /// Refuse to package from a tree with uncommitted or untracked changes
    pub fn ensure_clean(&self) -> Result<()> {
        let repo = Repository::discover(&self.root)?;
        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        let statuses = repo.statuses(Some(&mut opts))?;

        if !statuses.is_empty() {
            let listing = statuses
                .iter()
                .filter_map(|entry| entry.path().map(|p| p.to_string()))
                .collect::<Vec<_>>()
                .join("\n");
            return Err(QnError::DirtyRepository(listing));
        }
        Ok(())
    }

    /// Sha of HEAD; the artifact is named after it
    pub fn head_sha(&self) -> Result<String> {
        let repo = Repository::discover(&self.root)?;
        let commit = repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    /// Run one of the build scripts from the project root
    pub fn run_script(&self, script: &str) -> Result<()> {
        println!("cmd: {}", script);
        let output = Command::new(script)
            .current_dir(&self.root)
            .output()
            .map_err(|e| QnError::CommandFailed(format!("{}: {}", script, e)))?;
        if !output.status.success() {
            return Err(QnError::CommandFailed(format!(
                "{}: {}",
                script,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }

    /// Bundle the built binary (renamed), the extra files (by basename), and
    /// the asset tree into `<sha>.tar.gz` at the project root. An existing
    /// artifact of the same name is replaced.
    pub fn archive(&self, sha: &str) -> Result<PathBuf> {
        let artifact = self.root.join(format!("{}.tar.gz", sha));
        if artifact.exists() {
            fs::remove_file(&artifact)?;
        }

        let file = File::create(&artifact)?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        let binary = self.root.join(&self.config.binary);
        builder.append_path_with_name(&binary, &self.config.binary_in_archive)?;

        for extra in &self.config.extra_files {
            let src = self.root.join(extra);
            let name = Path::new(extra)
                .file_name()
                .ok_or_else(|| {
                    QnError::ConfigError(format!("extra file '{}' has no file name", extra))
                })?
                .to_string_lossy()
                .to_string();
            builder.append_path_with_name(&src, &name)?;
        }

        let asset_dir = self.root.join(&self.config.asset_dir);
        builder.append_dir_all(&self.config.asset_dir, &asset_dir)?;

        builder.into_inner()?.finish()?;
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sass_name_to_css() {
        assert_eq!(sass_name_to_css("style_main.sass").unwrap(), "style.css");
        assert_eq!(sass_name_to_css("note_main.scss").unwrap(), "note.css");
    }

    #[test]
    fn test_sass_name_to_css_skips_non_main() {
        assert!(sass_name_to_css("_mixins.sass").is_none());
        assert!(sass_name_to_css("style.sass").is_none());
        assert!(sass_name_to_css("style_main.css").is_none());
        assert!(sass_name_to_css("readme.txt").is_none());
    }
}

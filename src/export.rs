// SPDX-License-Identifier: MIT

//! Sorted directory materialization and zip packaging

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use crate::engine::ClassificationEntry;
use crate::{Result, SorterError};

/// Which classification trees to build
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub by_character: bool,
    pub by_work: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { by_character: true, by_work: true }
    }
}

/// Replace filesystem-illegal characters with `_` and trim whitespace.
///
/// Distinct raw names may sanitize to the same string; such names share one
/// output directory.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Remove `dir` if present and recreate it empty
pub fn prepare_directory(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Per-run scratch directory under the system temp dir.
///
/// Cleanup only ever removes paths inside the crate's own scratch base, so a
/// misconfigured path can never take out unrelated files.
pub struct ScratchDir {
    base: PathBuf,
    root: PathBuf,
}

impl ScratchDir {
    /// Create a fresh scratch directory for one run
    pub fn new() -> Result<Self> {
        let base = std::env::temp_dir().join("animesort");
        let root = base.join(uuid::Uuid::new_v4().to_string());
        std::fs::create_dir_all(&root)?;
        debug!("Created scratch directory {:?}", root);
        Ok(Self { base, root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Delete the scratch tree; refuses anything outside the scratch base
    pub fn cleanup(self) -> Result<()> {
        if !self.root.starts_with(&self.base) {
            return Err(SorterError::Config(format!(
                "refusing to remove {:?}: outside scratch base {:?}",
                self.root, self.base
            )));
        }
        if self.root.exists() {
            std::fs::remove_dir_all(&self.root)?;
        }
        Ok(())
    }
}

/// Materialize the sorted tree under `scratch_root` and pack it into a zip
/// archive at `archive_path`. Archive entry paths are relative to
/// `scratch_root`.
pub fn export(
    mapping: &[ClassificationEntry],
    scratch_root: &Path,
    options: ExportOptions,
    archive_path: &Path,
) -> Result<PathBuf> {
    prepare_directory(scratch_root)?;

    if options.by_character {
        copy_tree(mapping, &scratch_root.join("by_character"), |e| &e.character)?;
    }
    if options.by_work {
        copy_tree(mapping, &scratch_root.join("by_work"), |e| &e.work)?;
    }

    create_zip(scratch_root, archive_path)?;
    info!("Exported {} images to {:?}", mapping.len(), archive_path);

    Ok(archive_path.to_path_buf())
}

fn copy_tree<'a>(
    mapping: &'a [ClassificationEntry],
    output_dir: &Path,
    key: impl Fn(&'a ClassificationEntry) -> &'a str,
) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    for entry in mapping {
        let group_dir = output_dir.join(sanitize_name(key(entry)));
        std::fs::create_dir_all(&group_dir)?;

        let file_name = entry.image.file_name().ok_or_else(|| {
            SorterError::Config(format!("image path {:?} has no file name", entry.image))
        })?;
        // Last writer wins on sanitized-name collisions
        std::fs::copy(&entry.image, group_dir.join(file_name))?;
    }

    Ok(())
}

/// Pack every file under `source_dir` into a deflate-compressed zip
pub fn create_zip(source_dir: &Path, output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = zip::ZipWriter::new(file);
    let zip_options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut buffer = Vec::new();
    for path in collect_files(source_dir)? {
        let relative = path
            .strip_prefix(source_dir)
            .map_err(|e| SorterError::Archive(e.to_string()))?;
        let entry_name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        writer.start_file(entry_name, zip_options)?;
        buffer.clear();
        File::open(&path)?.read_to_end(&mut buffer)?;
        writer.write_all(&buffer)?;
    }

    writer.finish()?;
    Ok(())
}

// Any read failure fails the whole export; a partial archive is never valid
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        paths.push(entry?.path());
    }
    paths.sort();
    for path in paths {
        if path.is_dir() {
            files.extend(collect_files(&path)?);
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

//! Read-only access to the template tree, plus the bundled starter set.

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{Dir, DirEntry, include_dir};
use tracing::debug;

use crate::error::Error;

static BUNDLED_TEMPLATES: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/templates");

/// Identifies one template file relative to the templates root.
///
/// Ephemeral: computed per dispatch, never persisted. The same relative
/// layout is mirrored under the target root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateRef {
    /// Directory holding the template, relative to the templates root.
    pub subdir: PathBuf,
    /// File name, possibly containing a placeholder token.
    pub file_name: String,
}

impl TemplateRef {
    /// Root-relative path of the template file.
    pub fn relative_path(&self) -> PathBuf {
        self.subdir.join(&self.file_name)
    }
}

/// Read-only view over a template directory tree on disk.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a template file.
    pub fn source_path(&self, template: &TemplateRef) -> PathBuf {
        self.root.join(template.relative_path())
    }

    /// List every template file under the root, sorted by relative path.
    pub fn list(&self) -> Result<Vec<TemplateRef>, Error> {
        let mut templates = Vec::new();
        collect_templates(&self.root, Path::new(""), &mut templates)?;
        templates.sort();
        debug!(root = %self.root.display(), count = templates.len(), "listed templates");
        Ok(templates)
    }

    /// Read a template's text.
    pub async fn read(&self, template: &TemplateRef) -> Result<String, Error> {
        let path = self.source_path(template);
        tokio::fs::read_to_string(&path).await.map_err(|e| Error::read(path, e))
    }
}

fn collect_templates(
    dir: &Path,
    relative: &Path,
    templates: &mut Vec<TemplateRef>,
) -> Result<(), Error> {
    let entries = fs::read_dir(dir).map_err(|e| Error::read(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::read(dir, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if path.is_dir() {
            collect_templates(&path, &relative.join(&name), templates)?;
        } else {
            templates.push(TemplateRef { subdir: relative.to_path_buf(), file_name: name });
        }
    }
    Ok(())
}

/// Write the bundled starter template set to `dest`, returning the file
/// count. Used when no template root is supplied and by `templates export`.
pub fn export_bundled(dest: &Path) -> Result<usize, Error> {
    let mut count = 0;
    export_dir(&BUNDLED_TEMPLATES, dest, &mut count)?;
    debug!(dest = %dest.display(), count, "exported bundled templates");
    Ok(count)
}

fn export_dir(dir: &Dir<'_>, dest: &Path, count: &mut usize) -> Result<(), Error> {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let path = dest.join(file.path());
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
                }
                fs::write(&path, file.contents()).map_err(|e| Error::write(&path, e))?;
                *count += 1;
            }
            DirEntry::Dir(subdir) => export_dir(subdir, dest, count)?,
        }
    }
    Ok(())
}

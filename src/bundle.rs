use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::parser::ParserRegistry;
use crate::plugin_info::PluginInfo;
use crate::tiddler::Tiddler;

/// Fatal assembly failures
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("{} required source files are missing", .0.len())]
    MissingSources(Vec<PathBuf>),

    #[error("no tiddlers were collected")]
    Empty,
}

/// Aggregated records keyed by title, serialized under a single top-level
/// `tiddlers` key.
#[derive(Debug, Default, Serialize)]
pub struct PluginBundle {
    tiddlers: Map<String, Value>,
}

impl PluginBundle {
    fn insert(&mut self, title: impl Into<String>, tiddler: Tiddler) {
        self.tiddlers.insert(title.into(), tiddler.into_value());
    }

    /// Look up a record by title
    pub fn get(&self, title: &str) -> Option<&Value> {
        self.tiddlers.get(title)
    }

    /// Iterate titles in insertion order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.tiddlers.keys().map(String::as_str)
    }

    /// Number of records in the bundle
    pub fn len(&self) -> usize {
        self.tiddlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiddlers.is_empty()
    }
}

/// Collect every tiddler source in a directory into a bundle.
///
/// `.tid` files are gathered first, then `.js` files, each group sorted by
/// path so the aggregate order is reproducible. Records without a title are
/// keyed by the source file's stem. Unreadable files are skipped with a
/// warning; collecting nothing at all is fatal.
pub fn collect_dir(dir: &Path, registry: &ParserRegistry) -> Result<PluginBundle> {
    eprintln!("[bundle] Scanning tiddler sources: {}", dir.display());

    let mut bundle = PluginBundle::default();
    let mut failed = Vec::new();

    for extension in ["tid", "js"] {
        let paths = list_sources(dir, extension)?;
        if paths.is_empty() {
            eprintln!("[bundle] Warning: No .{} files found", extension);
        }

        for path in paths {
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("[bundle] Warning: Failed to read {}: {}", path.display(), e);
                    failed.push(path);
                    continue;
                }
            };

            let tiddler = registry.select(&path).parse(&source);
            let title = match tiddler.title() {
                Some(title) => title.to_string(),
                None => file_stem(&path),
            };
            bundle.insert(title, tiddler);
        }
    }

    if !failed.is_empty() {
        eprintln!("[bundle] Warning: {} files had errors:", failed.len());
        for path in &failed {
            eprintln!("  - {}", path.display());
        }
    }

    if bundle.is_empty() {
        return Err(BundleError::Empty.into());
    }

    eprintln!("[bundle] ✓ Collected {} tiddlers", bundle.len());
    Ok(bundle)
}

/// Collect an explicitly enumerated list of tiddler sources.
///
/// Every missing path is reported before failing. Records whose `title` is
/// absent or empty are skipped with a warning rather than aborting the run.
pub fn collect_listed(paths: &[PathBuf], registry: &ParserRegistry) -> Result<PluginBundle> {
    let missing: Vec<PathBuf> = paths.iter().filter(|p| !p.exists()).cloned().collect();
    if !missing.is_empty() {
        eprintln!("[bundle] Error: {} files not found:", missing.len());
        for path in &missing {
            eprintln!("  - {}", path.display());
        }
        return Err(BundleError::MissingSources(missing).into());
    }

    let mut bundle = PluginBundle::default();
    for path in paths {
        let source = fs::read_to_string(path)
            .context(format!("Failed to read {}", path.display()))?;

        let tiddler = registry.select(path).parse(&source);
        let title = tiddler.title().unwrap_or_default().to_string();
        if title.is_empty() {
            eprintln!("[bundle] Warning: No title found in {}", path.display());
            continue;
        }
        bundle.insert(title, tiddler);
    }

    if bundle.is_empty() {
        return Err(BundleError::Empty.into());
    }

    eprintln!("[bundle] ✓ Collected {} core tiddlers", bundle.len());
    Ok(bundle)
}

/// Read a curated source list: one path per line, with blank lines and `#`
/// comments ignored. Paths are resolved relative to the working directory.
pub fn read_manifest(path: &Path) -> Result<Vec<PathBuf>> {
    let contents = fs::read_to_string(path)
        .context(format!("Failed to read manifest: {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}

/// Write a bundle as a pretty-printed JSON plugin document
pub fn write_json(bundle: &PluginBundle, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(bundle)
        .context("Failed to serialize plugin bundle")?;
    fs::write(path, json)
        .context(format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}

/// Render the single-file plugin: ordered header fields, a blank line, and
/// the JSON body. The header mirrors the plain tiddler input format.
pub fn render_plugin_tid(info: &PluginInfo, bundle: &PluginBundle) -> Result<String> {
    let body = serde_json::to_string(bundle)
        .context("Failed to serialize plugin bundle")?;

    // The body is JSON regardless of what the source metadata says
    Ok(format!(
        "author: {}\n\
         core-version: {}\n\
         description: {}\n\
         list: {}\n\
         plugin-type: {}\n\
         title: {}\n\
         type: application/json\n\
         version: {}\n\n{}",
        info.author,
        info.core_version,
        info.description,
        info.list,
        info.plugin_type,
        info.title,
        info.version,
        body,
    ))
}

/// Render and write the single-file plugin
pub fn write_plugin_tid(info: &PluginInfo, bundle: &PluginBundle, path: &Path) -> Result<()> {
    let contents = render_plugin_tid(info, bundle)?;
    fs::write(path, contents)
        .context(format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}

/// List files with the given extension directly under `dir`, sorted by path
fn list_sources(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) == Some(extension) {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

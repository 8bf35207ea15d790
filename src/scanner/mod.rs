use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::join_all;
use ignore::WalkBuilder;
use tokio::sync::Semaphore;

use crate::error::AuditError;
use crate::models::{HardcodedString, LocalizedUsage};
use crate::patterns::{PatternLibrary, CONTEXT_WINDOW, LOCALIZATION_MARKERS};

/// Directory names never scanned.
const EXCLUDED_DIRS: &[&str] = &[
    "build",
    "Build",
    "DerivedData",
    ".build",
    "Pods",
    "Carthage",
    "vendor",
    ".git",
];

/// File count above which the scan fans out across the worker pool.
const PARALLEL_THRESHOLD: usize = 20;

/// Default bounded-pool size for the scan phase.
pub const DEFAULT_WORKERS: usize = 4;

/// One file's scan output.
#[derive(Debug, Clone, Default)]
pub struct FileScan {
    pub usages: Vec<LocalizedUsage>,
    pub hardcoded: Vec<HardcodedString>,
}

/// Merged output of a full scan pass. Regenerated wholesale on every scan.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub usages: Vec<LocalizedUsage>,
    pub hardcoded: Vec<HardcodedString>,
    /// Files that could not be read (skipped, non-fatal).
    pub unreadable: usize,
}

/// Walks the source tree and applies the pattern library to every eligible
/// file. Owns its records for one scan pass only.
#[derive(Debug, Clone)]
pub struct Scanner {
    library: Arc<PatternLibrary>,
    extension: String,
    workers: usize,
}

impl Scanner {
    pub fn new(library: PatternLibrary, extension: impl Into<String>, workers: usize) -> Self {
        Self {
            library: Arc::new(library),
            extension: extension.into(),
            workers: workers.max(1),
        }
    }

    /// Discover eligible source files under `root`, sorted by path so that
    /// downstream "first occurrence" semantics are deterministic.
    pub fn discover_files(&self, root: &Path) -> Result<Vec<PathBuf>, AuditError> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .filter_entry(|entry| {
                let name = entry.file_name().to_string_lossy();
                !EXCLUDED_DIRS.iter().any(|dir| name == *dir)
            })
            .build();

        for entry in walker.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path
                .extension()
                .and_then(|e| e.to_str())
                .is_none_or(|e| e != self.extension)
            {
                continue;
            }
            // Anything marked as generated is out of scope, wherever the
            // marker appears in the path.
            if path.to_string_lossy().to_lowercase().contains("generated") {
                continue;
            }
            files.push(path.to_path_buf());
        }

        if files.is_empty() {
            return Err(AuditError::NoSourceFiles(root.to_path_buf()));
        }

        files.sort();
        Ok(files)
    }

    /// Apply both pattern tables to one file's content. `rel_path` is the
    /// path recorded on every produced record.
    pub fn analyze_content(&self, rel_path: &str, content: &str) -> FileScan {
        let mut scan = FileScan::default();

        for rule in &self.library.localized {
            for caps in rule.pattern.captures_iter(content) {
                let Some(key) = caps.get(1) else { continue };
                let start = caps.get(0).map(|m| m.start()).unwrap_or(0);
                scan.usages.push(LocalizedUsage {
                    file: rel_path.to_string(),
                    line: line_of(content, start),
                    key: key.as_str().to_string(),
                    construct: rule.construct.clone(),
                });
            }
        }

        for rule in &self.library.hardcoded {
            for caps in rule.pattern.captures_iter(content) {
                let Some(text) = caps.get(1) else { continue };
                let text_str = text.as_str();

                if self.library.should_exclude(text_str) {
                    continue;
                }

                let start = caps.get(0).map(|m| m.start()).unwrap_or(0);

                // Guard: a localization call just before the match means this
                // literal is the inner argument of an already-wrapped call.
                let window_start = start.saturating_sub(CONTEXT_WINDOW);
                let window = nearest_char_slice(content, window_start, text.end());
                if LOCALIZATION_MARKERS.iter().any(|m| window.contains(m)) {
                    continue;
                }

                scan.hardcoded.push(HardcodedString {
                    file: rel_path.to_string(),
                    line: line_of(content, start),
                    text: text_str.to_string(),
                    component: rule.component.clone(),
                    category: rule.category,
                    // Filled in by the priority engine after the scan merge.
                    priority: 0,
                    suggested_key: String::new(),
                });
            }
        }

        scan
    }

    /// Analyze one file on disk. Unreadable files yield `None`.
    pub fn analyze_file(&self, root: &Path, path: &Path) -> Option<FileScan> {
        let content = std::fs::read_to_string(path).ok()?;
        let rel = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        Some(self.analyze_content(&rel, &content))
    }

    /// Analyze every file, fanning out across a bounded worker pool when the
    /// file count warrants it. The merge is order-independent: results are
    /// sorted by (file, line, text) afterwards so the aggregate is identical
    /// regardless of scheduling.
    pub async fn analyze_all(
        &self,
        root: &Path,
        files: &[PathBuf],
        parallel: bool,
    ) -> ScanResult {
        let mut result = ScanResult::default();

        if parallel && files.len() > PARALLEL_THRESHOLD {
            let semaphore = Arc::new(Semaphore::new(self.workers));
            let tasks: Vec<_> = files
                .iter()
                .map(|path| {
                    let scanner = self.clone();
                    let semaphore = Arc::clone(&semaphore);
                    let root = root.to_path_buf();
                    let path = path.clone();
                    tokio::spawn(async move {
                        // Closed only on runtime shutdown.
                        let _permit = semaphore.acquire_owned().await.ok()?;
                        tokio::task::block_in_place(|| scanner.analyze_file(&root, &path))
                    })
                })
                .collect();

            for joined in join_all(tasks).await {
                match joined {
                    Ok(Some(scan)) => {
                        result.usages.extend(scan.usages);
                        result.hardcoded.extend(scan.hardcoded);
                    }
                    _ => result.unreadable += 1,
                }
            }
        } else {
            for path in files {
                match self.analyze_file(root, path) {
                    Some(scan) => {
                        result.usages.extend(scan.usages);
                        result.hardcoded.extend(scan.hardcoded);
                    }
                    None => result.unreadable += 1,
                }
            }
        }

        result
            .usages
            .sort_by(|a, b| (&a.file, a.line, &a.key).cmp(&(&b.file, b.line, &b.key)));
        result
            .hardcoded
            .sort_by(|a, b| (&a.file, a.line, &a.text).cmp(&(&b.file, b.line, &b.text)));

        result
    }
}

/// 1-indexed line number of a byte offset.
fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].matches('\n').count() + 1
}

/// Slice `content` between the given byte offsets, widening the start to the
/// nearest char boundary so multi-byte text cannot panic the guard window.
fn nearest_char_slice(content: &str, mut start: usize, end: usize) -> &str {
    while start > 0 && !content.is_char_boundary(start) {
        start -= 1;
    }
    &content[start..end]
}

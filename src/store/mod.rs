use std::collections::BTreeMap;
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::AuditError;

lazy_static! {
    /// One entry per line: "key" = "value";
    static ref ENTRY_LINE: Regex = Regex::new(r#"^"([^"]+)"\s*=\s*"([^"]*)";"#).unwrap();
}

/// A discovered per-language strings file.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub lang: String,
    pub path: PathBuf,
}

/// Outcome of an `add_key` call. Partial application is accepted and must be
/// visible to the caller, so `Written` carries the per-language results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddKeyStatus {
    /// The key is already present; nothing was written.
    AlreadyExists,
    /// Dry-run: the would-be writes were reported, disk untouched.
    DryRun,
    /// The append ran; each locale file succeeded or failed independently.
    Written {
        succeeded: Vec<String>,
        failed: Vec<(String, String)>,
    },
}

impl AddKeyStatus {
    /// An edit counts as registered when at least one locale file took the
    /// append (or the run was a dry-run).
    pub fn is_success(&self) -> bool {
        match self {
            AddKeyStatus::AlreadyExists => false,
            AddKeyStatus::DryRun => true,
            AddKeyStatus::Written { succeeded, .. } => !succeeded.is_empty(),
        }
    }
}

/// Loads and indexes per-language key/value pairs from `*.lproj` locale
/// files. Owns the key/value state for the process lifetime; append-only.
#[derive(Debug, Clone)]
pub struct TranslationStore {
    files: Vec<LocaleFile>,
    /// key -> lang -> value (None while untranslated for that language)
    keys: BTreeMap<String, BTreeMap<String, Option<String>>>,
}

impl TranslationStore {
    /// Discover locale files under `locale_root` (`<lang>.lproj/Localizable.strings`),
    /// sorted by language code. Finding none is a fatal setup error.
    pub fn discover(locale_root: &Path) -> Result<Self, AuditError> {
        let mut files = Vec::new();

        if locale_root.is_dir() {
            for entry in fs::read_dir(locale_root)? {
                let entry = entry?;
                let path = entry.path();
                let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                    continue;
                };
                if !path.is_dir() || !name.ends_with(".lproj") {
                    continue;
                }
                let strings_file = path.join("Localizable.strings");
                if strings_file.is_file() {
                    files.push(LocaleFile {
                        lang: name.trim_end_matches(".lproj").to_string(),
                        path: strings_file,
                    });
                }
            }
        }

        if files.is_empty() {
            return Err(AuditError::NoLocaleFiles(locale_root.to_path_buf()));
        }

        files.sort_by(|a, b| a.lang.cmp(&b.lang));

        Ok(Self {
            files,
            keys: BTreeMap::new(),
        })
    }

    /// Build a store over an explicit file list (used by tests and by the
    /// watch mode's rescans).
    pub fn from_files(files: Vec<LocaleFile>) -> Self {
        Self {
            files,
            keys: BTreeMap::new(),
        }
    }

    /// Read every locale file and build the per-key language map. Malformed
    /// lines are skipped silently; an unreadable file is skipped as well.
    pub fn load(&mut self) {
        let languages: Vec<String> = self.files.iter().map(|f| f.lang.clone()).collect();

        for file in &self.files {
            let Ok(content) = fs::read_to_string(&file.path) else {
                continue;
            };

            for line in content.lines() {
                let Some(caps) = ENTRY_LINE.captures(line) else {
                    continue;
                };
                let key = caps[1].to_string();
                let value = caps[2].to_string();

                let entry = self.keys.entry(key).or_insert_with(|| {
                    languages.iter().map(|l| (l.clone(), None)).collect()
                });
                entry.insert(file.lang.clone(), Some(value));
            }
        }
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn existing_keys(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn languages(&self) -> Vec<String> {
        self.files.iter().map(|f| f.lang.clone()).collect()
    }

    pub fn locale_files(&self) -> &[LocaleFile] {
        &self.files
    }

    /// Append a new key with the same value for every language.
    pub fn add_key(&mut self, key: &str, value: &str, dry_run: bool) -> AddKeyStatus {
        let empty = BTreeMap::new();
        self.add_key_with(key, &empty, value, dry_run)
    }

    /// Append a new key, taking per-language values where supplied and
    /// `fallback` otherwise. Each locale file is written independently; a
    /// failure on one never rolls back another.
    pub fn add_key_with(
        &mut self,
        key: &str,
        values: &BTreeMap<String, String>,
        fallback: &str,
        dry_run: bool,
    ) -> AddKeyStatus {
        if self.key_exists(key) {
            return AddKeyStatus::AlreadyExists;
        }

        if dry_run {
            return AddKeyStatus::DryRun;
        }

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        for file in &self.files {
            let value = values.get(&file.lang).map(String::as_str).unwrap_or(fallback);
            match append_entry(&file.path, key, value) {
                Ok(()) => succeeded.push(file.lang.clone()),
                Err(e) => failed.push((file.lang.clone(), e.to_string())),
            }
        }

        if !succeeded.is_empty() {
            let mut per_lang: BTreeMap<String, Option<String>> = BTreeMap::new();
            for lang in &succeeded {
                let value = values.get(lang).map(String::as_str).unwrap_or(fallback);
                per_lang.insert(lang.clone(), Some(value.to_string()));
            }
            self.keys.insert(key.to_string(), per_lang);
        }

        AddKeyStatus::Written { succeeded, failed }
    }
}

fn append_entry(path: &Path, key: &str, value: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).open(path)?;
    writeln!(file, "\n\"{key}\" = \"{value}\";")?;
    Ok(())
}

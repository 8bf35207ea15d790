use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::AuditError;
use crate::store::LocaleFile;

/// Create a timestamped backup of every locale file before the first edit of
/// a mutating session. Any failure here is fatal for the session: edits
/// without a backup violate the safety contract. The backup is never read
/// back by the auditor; restoration is a manual step.
pub fn create_backup(project_dir: &Path, locale_files: &[LocaleFile]) -> Result<PathBuf, AuditError> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_dir = project_dir.join(format!("localization_backup_{timestamp}"));

    fs::create_dir_all(&backup_dir)
        .map_err(|e| AuditError::BackupFailed(format!("{}: {e}", backup_dir.display())))?;

    for file in locale_files {
        let target_dir = backup_dir.join(format!("{}.lproj", file.lang));
        fs::create_dir_all(&target_dir)
            .map_err(|e| AuditError::BackupFailed(format!("{}: {e}", target_dir.display())))?;

        let target = target_dir.join("Localizable.strings");
        fs::copy(&file.path, &target).map_err(|e| {
            AuditError::BackupFailed(format!("copy {} -> {}: {e}", file.path.display(), target.display()))
        })?;
    }

    Ok(backup_dir)
}

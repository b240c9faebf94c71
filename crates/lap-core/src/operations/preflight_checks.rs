use crate::matcher::count_occurrences;
use crate::types::Patch;
use anyhow::Result;
use std::fs;

/// Validates every patch before anything is written. Collects all failures
/// instead of stopping at the first, so the caller can abort with a full
/// report and no partial effects.
pub fn run_preflight_checks(patches: &[Patch]) -> Result<(), Vec<String>> {
    println!("--- Running Preflight Checks ---");
    let mut errors = Vec::new();

    for (i, patch) in patches.iter().enumerate() {
        let prefix = format!("  - Patch #{} for '{:?}':", i + 1, patch.file_path);

        if !patch.file_path.exists() {
            errors.push(format!("{} FAILED (File not found)", prefix));
            continue;
        }

        if let Ok(metadata) = fs::metadata(&patch.file_path) {
            if metadata.permissions().readonly() {
                errors.push(format!("{} FAILED (File is read-only)", prefix));
                continue;
            }
        }

        if patch.descriptor.old.is_empty() {
            errors.push(format!("{} FAILED (Empty search snippet)", prefix));
            continue;
        }

        match fs::read_to_string(&patch.file_path) {
            Ok(content) => {
                let occurrences = count_occurrences(&content, &patch.descriptor.old);
                if occurrences == 0 {
                    errors.push(format!("{} FAILED (Search snippet not found)", prefix));
                } else if occurrences > 1 {
                    println!(
                        "{} OK ({} occurrences, all will be replaced)",
                        prefix, occurrences
                    );
                } else {
                    println!("{} OK", prefix);
                }
            }
            Err(e) => {
                errors.push(format!("{} FAILED (Could not read file: {})", prefix, e));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

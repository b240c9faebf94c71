use crate::error::PatchNotFound;
use crate::matcher::{contains_literal, count_occurrences};
use crate::operations::file_operations::{read_file_content, write_file_atomic};
use crate::types::Patch;
use anyhow::Result;

/// Applies one literal patch: read the target, verify the snippet is
/// present, replace every occurrence, write the result back atomically.
/// The precondition check fully precedes any write; when the snippet is
/// absent the file is left untouched and a `PatchNotFound` is returned.
///
/// Not idempotent: after a successful application the original snippet no
/// longer exists, so a second run with the same descriptor fails the
/// existence check instead of double-patching.
pub fn apply_patch(patch: &Patch, dry_run: bool) -> Result<String> {
    let path = &patch.file_path;
    println!("--- Applying patch to: {:?}", path);

    let old = &patch.descriptor.old;
    let new = &patch.descriptor.new;

    let content = read_file_content(path)?;

    if !contains_literal(&content, old) {
        return Err(PatchNotFound {
            file_path: path.clone(),
            snippet: old.clone(),
        }
        .into());
    }
    let occurrences = count_occurrences(&content, old);

    if dry_run {
        return Ok(format!(
            "    [DRY RUN] {} occurrence(s) would be replaced.",
            occurrences
        ));
    }

    let patched = content.replace(old.as_str(), new);
    write_file_atomic(path, &patched)?;

    Ok(format!(
        "    [SUCCESS] Replaced {} occurrence(s).",
        occurrences
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PatchDescriptor;
    use std::fs;
    use tempfile::tempdir;

    fn patch(path: &std::path::Path, old: &str, new: &str) -> Patch {
        Patch {
            file_path: path.to_path_buf(),
            descriptor: PatchDescriptor {
                old: old.to_string(),
                new: new.to_string(),
            },
        }
    }

    #[test]
    fn test_apply_patch_success() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("code.rs");
        fs::write(&file_path, "fn f() { return x + 1; }").unwrap();

        let p = patch(&file_path, "x + 1", "x + 1 /* patched */");
        apply_patch(&p, false).unwrap();

        assert_eq!(
            fs::read_to_string(&file_path).unwrap(),
            "fn f() { return x + 1 /* patched */; }"
        );
    }

    #[test]
    fn test_apply_patch_not_found_leaves_file_untouched() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("code.rs");
        let original = "nothing of interest here";
        fs::write(&file_path, original).unwrap();

        let p = patch(&file_path, "FOO_BAR_BAZ", "whatever");
        let err = apply_patch(&p, false).unwrap_err();

        assert!(err.downcast_ref::<PatchNotFound>().is_some());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), original);
    }

    #[test]
    fn test_apply_patch_is_not_idempotent() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("code.rs");
        fs::write(&file_path, "let y = x + 1;").unwrap();

        let p = patch(&file_path, "x + 1", "x + 1 /* patched */");
        apply_patch(&p, false).unwrap();

        let after_first = fs::read_to_string(&file_path).unwrap();
        let err = apply_patch(&p, false).unwrap_err();

        assert!(err.downcast_ref::<PatchNotFound>().is_some());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), after_first);
    }

    #[test]
    fn test_apply_patch_replaces_all_occurrences() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("code.rs");
        fs::write(&file_path, "x + 1 and again x + 1").unwrap();

        let p = patch(&file_path, "x + 1", "y");
        let msg = apply_patch(&p, false).unwrap();

        assert!(msg.contains("2 occurrence(s)"));
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "y and again y");
    }

    #[test]
    fn test_apply_patch_dry_run_does_not_write() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("code.rs");
        let original = "let y = x + 1;";
        fs::write(&file_path, original).unwrap();

        let p = patch(&file_path, "x + 1", "y");
        let msg = apply_patch(&p, true).unwrap();

        assert!(msg.contains("DRY RUN"));
        assert_eq!(fs::read_to_string(&file_path).unwrap(), original);
    }

    #[test]
    fn test_apply_patch_crlf_snippet_requires_crlf_content() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("app.ts");

        // LF file, CRLF descriptor: exact matching must fail.
        fs::write(&file_path, "} catch (error) {\n  issues.push(msg);\n}").unwrap();
        let p = patch(
            &file_path,
            "} catch (error) {\r\n  issues.push(msg);",
            "} catch (error) {\r\n  issues.push(msg);\r\n  logger.warn(msg);",
        );
        let err = apply_patch(&p, false).unwrap_err();
        assert!(err.downcast_ref::<PatchNotFound>().is_some());

        // CRLF file: same descriptor applies.
        fs::write(&file_path, "} catch (error) {\r\n  issues.push(msg);\r\n}").unwrap();
        apply_patch(&p, false).unwrap();
        let content = fs::read_to_string(&file_path).unwrap();
        assert!(content.contains("logger.warn(msg);"));
    }

    #[cfg(unix)]
    #[test]
    fn test_apply_patch_preserves_target_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("run.sh");
        fs::write(&file_path, "exit x + 1").unwrap();
        fs::set_permissions(&file_path, fs::Permissions::from_mode(0o755)).unwrap();

        apply_patch(&patch(&file_path, "x + 1", "0"), false).unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "exit 0");
    }

    #[test]
    fn test_apply_patch_missing_file_is_not_patch_not_found() {
        let dir = tempdir().unwrap();
        let p = patch(&dir.path().join("absent.rs"), "x", "y");

        let err = apply_patch(&p, false).unwrap_err();
        assert!(err.downcast_ref::<PatchNotFound>().is_none());
    }

    #[test]
    fn test_apply_patch_empty_snippet_fails_closed() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("code.rs");
        fs::write(&file_path, "content").unwrap();

        let p = patch(&file_path, "", "anything");
        let err = apply_patch(&p, false).unwrap_err();

        assert!(err.downcast_ref::<PatchNotFound>().is_some());
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "content");
    }
}

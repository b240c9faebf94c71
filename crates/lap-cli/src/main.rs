use anyhow::{Context, Result};
use lap_core::{apply_patch, parse, run_preflight_checks, PatchNotFound};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

const USAGE: &str = "\
Usage: lap [PATCH_FILE] [--dry-run]

Applies literal snippet substitutions described by SEARCH/REPLACE blocks:

    path/to/target
    <<<<<<< SEARCH
    old snippet
    =======
    new snippet
    >>>>>>> REPLACE

With no PATCH_FILE the document is read from stdin. Matching is exact
(no regex, no whitespace or line ending normalization) and every
occurrence of the old snippet is replaced.";

fn main() -> Result<()> {
    let mut dry_run = false;
    let mut patch_file: Option<String> = None;

    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--dry-run" => dry_run = true,
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            flag if flag.starts_with('-') => {
                eprintln!("Unknown option '{}'. Try 'lap --help'.", flag);
                process::exit(2);
            }
            path => patch_file = Some(path.to_string()),
        }
    }

    let document = load_document(patch_file.as_deref())?;
    let patches = parse(&document);

    if patches.is_empty() {
        println!("The document contains no SEARCH/REPLACE blocks; nothing to do.");
        return Ok(());
    }

    if let Err(failures) = run_preflight_checks(&patches) {
        println!("\n--- Preflight Checks Failed ---");
        for failure in &failures {
            println!("{}", failure);
        }
        println!("\nAborting before any write. All targets are unchanged.");
        process::exit(1);
    }
    println!(
        "\n--- Preflight Checks Passed. Applying {} patch(es). ---",
        patches.len()
    );

    let mut failed = 0;
    for patch in &patches {
        match apply_patch(patch, dry_run) {
            Ok(report) => println!("{}", report),
            Err(err) if err.downcast_ref::<PatchNotFound>().is_some() => {
                println!("    [NOT FOUND] {}", err);
                failed += 1;
            }
            Err(err) => {
                println!("    [ERROR] {:#}", err);
                failed += 1;
            }
        }
    }

    println!("\n--- Summary ---");
    println!(
        "Applied {} of {} patch(es).",
        patches.len() - failed,
        patches.len()
    );

    if failed > 0 {
        process::exit(1);
    }

    Ok(())
}

fn load_document(patch_file: Option<&str>) -> Result<String> {
    let document = match patch_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read patch document '{}'", path))?,
        None => {
            if atty::is(atty::Stream::Stdin) {
                eprintln!("No patch document given and stdin is a terminal.");
                eprintln!("Pass a file path or pipe a document in. Try 'lap --help'.");
                process::exit(1);
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read patch document from stdin")?;
            buffer
        }
    };

    if document.trim().is_empty() {
        eprintln!("The patch document is empty.");
        process::exit(1);
    }

    Ok(document)
}

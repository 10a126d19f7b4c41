//! Vault organizer entry point.
//!
//! # Responsibility
//! - Load and compile a rule file, then run one organization pass.
//! - Keep exit codes meaningful for scripting: 2 usage, 1 failure.

use log::info;
use notevault_core::{
    core_version, default_log_level, init_logging, Classifier, FsNoteStore, Organizer,
    RuleHierarchy,
};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((vault_root, rules_path, level)) = parse_args(&args) else {
        eprintln!("usage: notevault <vault-root> <rules.yaml> [--log-level LEVEL]");
        return ExitCode::from(2);
    };

    let vault_root = match std::fs::canonicalize(&vault_root) {
        Ok(path) => path,
        Err(err) => {
            eprintln!(
                "notevault: vault root `{}` is not usable: {err}",
                vault_root.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let log_dir = vault_root.join(".notevault").join("logs");
    let level = level.unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &log_dir.to_string_lossy()) {
        eprintln!("notevault: {err}");
        return ExitCode::FAILURE;
    }

    let hierarchy = match RuleHierarchy::load_from_file(&rules_path) {
        Ok(hierarchy) => hierarchy,
        Err(err) => {
            eprintln!(
                "notevault: rule file `{}` rejected: {err}",
                rules_path.display()
            );
            return ExitCode::FAILURE;
        }
    };
    let rules = hierarchy.compile();
    info!(
        "event=rules_compiled module=cli status=ok rule_file={} labels={}",
        rules_path.display(),
        rules.declaration_order().len()
    );

    let organizer = Organizer::new(Classifier::new(&rules), FsNoteStore::new(vault_root.clone()));
    match organizer.organize() {
        Ok(report) => {
            println!(
                "notevault {} organized `{}`",
                core_version(),
                vault_root.display()
            );
            println!(
                "  scanned={} moved={} retagged={}",
                report.scanned, report.moved, report.retagged
            );
            println!(
                "  templates_deleted={} redirects_deleted={} indexes_written={} indexes_removed={}",
                report.deleted_templates,
                report.deleted_redirects,
                report.indexes_written,
                report.indexes_removed
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("notevault: organization failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Option<(PathBuf, PathBuf, Option<String>)> {
    let mut positional: Vec<&String> = Vec::new();
    let mut level = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--log-level" => level = Some(iter.next()?.clone()),
            _ => positional.push(arg),
        }
    }
    if positional.len() != 2 {
        return None;
    }
    Some((
        PathBuf::from(positional[0]),
        PathBuf::from(positional[1]),
        level,
    ))
}

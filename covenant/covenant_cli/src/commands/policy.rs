//! Policy commands
//!
//! This module contains the commands that read, check, export and catalog
//! policy documents.

use anyhow::Context;
use chrono::SecondsFormat;
use clap::Args;
use covenant_core::utils::CovenantConfig;
use covenant_policy::canonical::{canonicalize_with, PolicyDocument};
use covenant_policy::model::{GenericField, OdrlField, Policy, Violation};
use covenant_policy::store::{InMemoryPolicyStore, PolicyStore};
use covenant_policy::validate;
use covenant_policy::vocab::{GenericKind, OdrlKind, PolicyFamily};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::exit_codes;

/// Arguments for the new command
#[derive(Args)]
pub struct NewArgs {
    /// Policy family (odrl or generic)
    #[clap(long)]
    pub family: PolicyFamily,

    /// Policy kind within the family, e.g. Offer or retention
    #[clap(long)]
    pub kind: Option<String>,
}

/// Arguments for the validate command
#[derive(Args)]
pub struct ValidateArgs {
    /// Policy documents to check
    #[clap(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for the export command
#[derive(Args)]
pub struct ExportArgs {
    /// Policy document to export
    pub file: PathBuf,

    /// Write the export here instead of standard output
    #[clap(long)]
    pub out: Option<PathBuf>,

    /// Export even if the policy has violations
    #[clap(long)]
    pub preview: bool,
}

/// Arguments for the catalog command
#[derive(Args)]
pub struct CatalogArgs {
    /// Policy documents to save
    #[clap(required = true)]
    pub files: Vec<PathBuf>,

    /// Only list the most recent entries
    #[clap(long)]
    pub limit: Option<usize>,
}

/// Read and import a canonical policy document.
fn read_policy(path: &Path) -> anyhow::Result<Policy> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let document = PolicyDocument::from_json(&content)
        .with_context(|| format!("{} is not a policy document", path.display()))?;

    document
        .into_policy()
        .with_context(|| format!("failed to import {}", path.display()))
}

fn print_violations(violations: &[Violation]) {
    for violation in violations {
        println!("  {}", violation);
    }
}

/// Implementation of the new command
pub fn execute_new(args: &NewArgs, config: &CovenantConfig) -> anyhow::Result<i32> {
    let policy = match (Policy::create(args.family), args.kind.as_deref()) {
        (policy, None) => policy,
        (Policy::Odrl(odrl), Some(kind)) => {
            let kind: OdrlKind = kind.parse()?;
            Policy::Odrl(odrl.with_field(OdrlField::Kind(kind)))
        }
        (Policy::Generic(generic), Some(kind)) => {
            let kind: GenericKind = kind.parse()?;
            Policy::Generic(generic.with_field(GenericField::Kind(kind)))
        }
    };

    let document = canonicalize_with(&policy, &config.canonical);
    println!("{}", document.render(config.canonical.pretty)?);

    Ok(exit_codes::OK)
}

/// Implementation of the validate command
pub fn execute_validate(args: &ValidateArgs) -> anyhow::Result<i32> {
    let mut code = exit_codes::OK;

    for path in &args.files {
        let policy = read_policy(path)?;
        let violations = validate(&policy);

        if violations.is_empty() {
            println!("{}: valid", path.display());
        } else {
            println!("{}: {} violation(s)", path.display(), violations.len());
            print_violations(&violations);
            code = exit_codes::VIOLATIONS;
        }
    }

    Ok(code)
}

/// Implementation of the export command
pub fn execute_export(args: &ExportArgs, config: &CovenantConfig) -> anyhow::Result<i32> {
    let policy = read_policy(&args.file)?;

    let violations = validate(&policy);
    if !violations.is_empty() {
        if !args.preview {
            println!(
                "{}: not exported, {} violation(s)",
                args.file.display(),
                violations.len()
            );
            print_violations(&violations);
            return Ok(exit_codes::VIOLATIONS);
        }
        debug!(
            "Previewing {} with {} violation(s)",
            args.file.display(),
            violations.len()
        );
    }

    let document = canonicalize_with(&policy, &config.canonical);
    let json = document.render(config.canonical.pretty)?;

    match &args.out {
        Some(out) => {
            fs::write(out, format!("{}\n", json))
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!("Exported {} to {}", args.file.display(), out.display());
        }
        None => println!("{}", json),
    }

    Ok(exit_codes::OK)
}

/// Implementation of the catalog command
pub fn execute_catalog(args: &CatalogArgs, config: &CovenantConfig) -> anyhow::Result<i32> {
    let store = InMemoryPolicyStore::from_config(&config.store);
    let mut code = exit_codes::OK;

    for path in &args.files {
        let policy = read_policy(path)?;
        let violations = validate(&policy);

        if !violations.is_empty() {
            println!(
                "{}: skipped, {} violation(s)",
                path.display(),
                violations.len()
            );
            print_violations(&violations);
            code = exit_codes::VIOLATIONS;
            continue;
        }

        let key = store.save(&policy)?;
        debug!("Saved {} as {}", path.display(), key);
    }

    for entry in store.list(args.limit)? {
        println!(
            "{}  {}/{}  {}",
            entry.key,
            entry.policy.family(),
            entry.policy.kind_term(),
            entry.saved_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        );
    }

    Ok(code)
}

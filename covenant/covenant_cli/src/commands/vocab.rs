//! Vocabulary commands

use anyhow::anyhow;
use clap::Args;
use covenant_policy::vocab::{self, TABLES};

use super::exit_codes;

/// Arguments for the vocab command
#[derive(Args)]
pub struct VocabArgs {
    /// Table to print; all table names are listed when omitted
    pub table: Option<String>,
}

/// Implementation of the vocab command
pub fn execute_vocab(args: &VocabArgs) -> anyhow::Result<i32> {
    let Some(name) = &args.table else {
        for (name, terms) in TABLES {
            println!("{} ({} terms)", name, terms.len());
        }
        return Ok(exit_codes::OK);
    };

    let terms = vocab::table(name).ok_or_else(|| {
        let names: Vec<&str> = TABLES.iter().map(|(name, _)| *name).collect();
        anyhow!(
            "unknown vocabulary table '{}', expected one of: {}",
            name,
            names.join(", ")
        )
    })?;

    for term in terms {
        println!("{}", term);
    }

    Ok(exit_codes::OK)
}

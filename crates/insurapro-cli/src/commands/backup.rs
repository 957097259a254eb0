use crate::commands::{print_json, Context};
use crate::util::backup_stamp;
use anyhow::{Context as _, Result};
use clap::Args;
use insurapro_store::error::StoreError;
use insurapro_store::paths;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct BackupArgs {
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct BackupReport {
    output: String,
    size_bytes: u64,
}

pub fn backup(ctx: &mut Context<'_>, args: BackupArgs) -> Result<()> {
    let out = match args.out {
        Some(path) => path,
        None => paths::backup_path(
            ctx.store.path(),
            ctx.config.backup.dir.as_deref(),
            &backup_stamp(),
        ),
    };

    let size = match ctx.store.backup_to(&out) {
        Ok(size) => size,
        Err(err @ StoreError::InvalidBackupPath(_)) => {
            return Err(err)
                .with_context(|| format!("backup path matches data file: {}", out.display()));
        }
        Err(err) => {
            return Err(err).with_context(|| format!("back up customers to {}", out.display()));
        }
    };

    if ctx.json {
        let report = BackupReport {
            output: out.display().to_string(),
            size_bytes: size,
        };
        return print_json(&report);
    }

    println!("Backup written to {}", out.display());
    Ok(())
}

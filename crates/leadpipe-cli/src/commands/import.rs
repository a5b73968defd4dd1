//! Import command - run the pipeline over an export file.

use std::path::PathBuf;

use colored::Colorize;
use leadpipe::store::STORE_TOKEN_ENV;
use leadpipe::{
    ImportConfig, ImportOutcome, Importer, MemoryLeadStore, ParserConfig, RestLeadStore,
};

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    chunk_size: usize,
    owner: Option<String>,
    store_url: Option<String>,
    dry_run: bool,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let config = ImportConfig {
        parser: ParserConfig::default(),
        chunk_size,
        owner_id: owner,
    };

    let importer = if dry_run {
        Importer::new(MemoryLeadStore::new()).with_config(config)
    } else {
        let store = match store_url {
            Some(url) => {
                let store = RestLeadStore::new(url)?;
                match std::env::var(STORE_TOKEN_ENV) {
                    Ok(token) => store.with_token(token),
                    Err(_) => store,
                }
            }
            None => RestLeadStore::from_env()?,
        };
        Importer::new(store).with_config(config)
    };

    if !json {
        println!(
            "{} {}{}",
            "Importing".cyan().bold(),
            file.display().to_string().white(),
            if dry_run { " (dry run)".dimmed().to_string() } else { String::new() }
        );
    }

    // One logical task drives the whole run.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let outcome = runtime.block_on(importer.import_file(&file))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    print_summary(&outcome, verbose);
    Ok(())
}

fn print_summary(outcome: &ImportOutcome, verbose: bool) {
    let summary = outcome.summary();

    println!();
    if summary.committed > 0 {
        println!(
            "Imported {} lead(s), {} rejected",
            summary.committed.to_string().green().bold(),
            summary.rejected.to_string().yellow()
        );
    } else {
        println!(
            "{} No leads were imported; {} rejected",
            "!".yellow().bold(),
            summary.rejected.to_string().yellow().bold()
        );
    }

    if verbose {
        println!(
            "  {} rows, {} columns, {}",
            outcome.source.row_count,
            outcome.source.column_count,
            outcome.source.hash.dimmed()
        );
        println!("  {}", outcome.session.progress.message.dimmed());
    }

    if !outcome.session.rejected().is_empty() {
        println!();
        println!("{}", "Rejected leads:".yellow().bold());
        for rejected in outcome.session.rejected() {
            println!(
                "  {} row {:<4} {:<30} {}",
                rejected.id.dimmed(),
                rejected.row,
                rejected.email.as_deref().unwrap_or("-"),
                rejected.reasons.join("; ").red()
            );
        }
    }
}

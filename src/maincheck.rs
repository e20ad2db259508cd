use std::io::{self, Write};
use std::sync::atomic::{self, AtomicU64};
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Parser;
use rayon::prelude::*;
use revdoor::check::{self, CheckError};
use revdoor::cli::CheckCli;

#[derive(Clone, Copy, Debug)]
enum Kind {
    Plain,
    Replacement,
}

fn main() -> Result<()> {
    let cli = CheckCli::parse();
    cli.log.init();

    let kinds: &[Kind] = if cli.both {
        &[Kind::Plain, Kind::Replacement]
    } else if cli.replacement {
        &[Kind::Replacement]
    } else {
        &[Kind::Plain]
    };
    let mut tasks = vec![];
    for &kind in kinds {
        let pairs = match kind {
            Kind::Plain => cli.plain_pairs(),
            Kind::Replacement => cli.replacement_pairs(),
        };
        tasks.extend(pairs.into_iter().map(|(n, t)| (kind, n, t)));
    }
    log::info!("Tasks: {}", tasks.len());

    let checked = AtomicU64::new(0);
    let skipped = AtomicU64::new(0);
    let failed = AtomicU64::new(0);
    let time = Instant::now();

    tasks.into_par_iter().try_for_each(|(kind, n, t)| -> io::Result<()> {
        let result = match kind {
            Kind::Plain => check::verify_combinations(n, t, cli.resume_every),
            Kind::Replacement => {
                check::verify_combinations_with_replacement(n, t, cli.resume_every)
            }
        };
        let suffix = match kind {
            Kind::Plain => "",
            Kind::Replacement => " (replacement)",
        };
        match result {
            Ok(report) => {
                checked.fetch_add(1, atomic::Ordering::SeqCst);
                writeln!(io::stdout().lock(), "Checked {} {}{}: {}", n, t, suffix,
                         report.transitions)?;
            }
            Err(err @ CheckError::TooLarge { .. }) => {
                skipped.fetch_add(1, atomic::Ordering::SeqCst);
                log::warn!("Skipped {} {}{}: {}", n, t, suffix, err);
            }
            Err(err) => {
                failed.fetch_add(1, atomic::Ordering::SeqCst);
                log::error!("Failed {} {}{}: {}", n, t, suffix, err);
            }
        }
        Ok(())
    })?;

    let failed = failed.load(atomic::Ordering::SeqCst);
    writeln!(io::stdout().lock(), "Total checked: {}",
             checked.load(atomic::Ordering::SeqCst))?;
    log::info!("Skipped {}, failed {}, in {:?}", skipped.load(atomic::Ordering::SeqCst),
               failed, time.elapsed());
    if failed != 0 {
        bail!("{} checks failed", failed);
    }
    Ok(())
}

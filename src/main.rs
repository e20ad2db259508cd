use std::io::{self, BufWriter, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use revdoor::cli::Cli;
use revdoor::{Combinations, CombinationsWithReplacement, RevolvingDoor};

fn run<G: RevolvingDoor>(mut gen: G, cli: &Cli, out: &mut impl Write) -> Result<u64> {
    if let Some(state) = &cli.resume {
        if !G::is_ordered(state) {
            bail!("resume state {:?} is not sorted", state);
        }
        gen.set_state(state)
            .with_context(|| format!("cannot resume at {:?}", state))?;
    }
    if !cli.swaps {
        writeln!(out, "{:?}", gen.get())?;
    }
    let mut count = 0;
    while cli.limit.map_or(true, |limit| count < limit) {
        let tr = match gen.step() {
            Some(tr) => tr,
            None => break,
        };
        count += 1;
        if cli.swaps {
            writeln!(out, "{}", tr)?;
        } else {
            writeln!(out, "{:?}", gen.get())?;
        }
    }
    match gen.total() {
        Some(total) => log::info!("{} steps, {} combinations in total", count, total),
        None => log::info!("{} steps", count),
    }
    Ok(count)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.log.init();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let count = if cli.replacement {
        run(CombinationsWithReplacement::try_new(cli.n, cli.t)?, &cli, &mut out)?
    } else {
        run(Combinations::try_new(cli.n, cli.t)?, &cli, &mut out)?
    };
    writeln!(out, "Total: {}", count)?;
    out.flush()?;
    Ok(())
}

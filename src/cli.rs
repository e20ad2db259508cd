use clap::{Args, Parser};

#[derive(Parser, Debug)]
#[command(name = "revdoor")]
#[command(about = "Print combinations in revolving-door order")]
pub struct Cli {
    #[arg(help = "Size of the universe")]
    pub n: usize,
    #[arg(help = "Elements per combination")]
    pub t: usize,
    #[arg(long, help = "Allow repeated elements", default_value_t = false)]
    pub replacement: bool,
    #[arg(
        long,
        help = "Print the swap made by each step instead of the combinations",
        default_value_t = false
    )]
    pub swaps: bool,
    #[arg(
        long,
        value_delimiter = ',',
        help = "Start from this combination, e.g. 0,2,4"
    )]
    pub resume: Option<Vec<usize>>,
    #[arg(long, help = "Stop after this many steps")]
    pub limit: Option<u64>,
    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Parser, Debug)]
#[command(name = "revdoor_check")]
#[command(about = "Exhaustively verify the revolving-door generators")]
pub struct CheckCli {
    #[arg(help = "Smallest n to check")]
    pub n_start: usize,
    #[arg(help = "End of the n range (exclusive)")]
    pub n_end: usize,
    #[arg(
        long,
        help = "Check combinations with replacement instead",
        default_value_t = false,
        conflicts_with = "both"
    )]
    pub replacement: bool,
    #[arg(long, help = "Check both generators", default_value_t = false)]
    pub both: bool,
    #[arg(
        long,
        help = "Reseed a fresh generator at every K-th state (0 disables)",
        default_value_t = 64
    )]
    pub resume_every: usize,
    #[command(flatten)]
    pub log: LogArgs,
}

impl CheckCli {
    /// Pairs accepted by `Combinations`: `n_start <= n < n_end`, `1 < t < n`.
    pub fn plain_pairs(&self) -> Vec<(usize, usize)> {
        (self.n_start..self.n_end)
            .flat_map(|n| (2..n).map(move |t| (n, t)))
            .collect()
    }

    /// Pairs accepted by `CombinationsWithReplacement`. Any `t > 1` is valid
    /// once `n > 1`, so t is bounded by `n_end` instead of n.
    pub fn replacement_pairs(&self) -> Vec<(usize, usize)> {
        let n_end = self.n_end;
        (self.n_start.max(2)..n_end)
            .flat_map(|n| (2..n_end).map(move |t| (n, t)))
            .collect()
    }
}

#[derive(Args, Debug)]
pub struct LogArgs {
    #[arg(short, long, help = "Verbose output", default_value_t = false)]
    pub verbose: bool,
}

impl LogArgs {
    /// Sets up env_logger; `RUST_LOG` still takes precedence over `--verbose`.
    pub fn init(&self) {
        let level = if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::builder()
            .filter_level(level)
            .parse_default_env()
            .init();
    }
}

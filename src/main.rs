use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use stree::output;
use stree::utils::{self, progress, InputLine};
use stree::{SuffixTree, TerminatorPolicy, TreeConfig};
use termcolor::{ColorChoice, StandardStream};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stree")]
#[command(about = "Build suffix trees over line-separated sequences and query them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with tree configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Share one terminator between all sequences
    #[arg(long, global = true)]
    shared_terminators: bool,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Log construction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show tree statistics
    Stats {
        /// Input file, one sequence per line
        file: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether patterns occur in any sequence
    Contains {
        /// Input file, one sequence per line
        file: PathBuf,

        /// Patterns to look for
        #[arg(required = true)]
        patterns: Vec<String>,
    },
    /// List every occurrence of a pattern
    Find {
        /// Input file, one sequence per line
        file: PathBuf,

        /// Pattern to look for
        pattern: String,

        /// Print only the number of occurrences
        #[arg(short, long)]
        count: bool,
    },
    /// Show the most frequent motifs of a given length
    Motifs {
        /// Input file, one sequence per line
        file: PathBuf,

        /// Motif length
        #[arg(short, long)]
        length: usize,

        /// Number of motifs to show
        #[arg(short = 'n', long, default_value_t = 10)]
        top: usize,
    },
    /// Print the tree, one edge per line
    Tree {
        /// Input file, one sequence per line
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn choice(self) -> ColorChoice {
        match self {
            ColorMode::Auto if std::io::stdout().is_terminal() => ColorChoice::Auto,
            ColorMode::Auto | ColorMode::Never => ColorChoice::Never,
            ColorMode::Always => ColorChoice::Always,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let mut stdout = StandardStream::stdout(cli.color.choice());
    let show_progress = std::io::stderr().is_terminal();

    match cli.command {
        Commands::Stats { file, json } => {
            let (tree, _) = build_tree(&file, config, show_progress)?;
            if json {
                output::print_stats_json(&mut stdout, &tree.stats())?;
            } else {
                output::print_stats(&mut stdout, &tree.stats())?;
            }
        }
        Commands::Contains { file, patterns } => {
            let (tree, _) = build_tree(&file, config, show_progress)?;
            let queries: Vec<Vec<char>> = patterns.iter().map(|p| p.chars().collect()).collect();
            let found = tree.contains_all(&queries);
            let results: Vec<(String, bool)> = patterns.into_iter().zip(found).collect();
            output::print_contains(&mut stdout, &results)?;
        }
        Commands::Find {
            file,
            pattern,
            count,
        } => {
            let (tree, lines) = build_tree(&file, config, show_progress)?;
            let query: Vec<char> = pattern.chars().collect();
            if count {
                writeln!(stdout, "{}", tree.count_occurrences(&query))?;
            } else {
                let occurrences = tree.find_occurrences(&query);
                output::print_occurrences(&mut stdout, &occurrences, query.len(), &lines)?;
            }
        }
        Commands::Motifs { file, length, top } => {
            let (tree, _) = build_tree(&file, config, show_progress)?;
            let mut motifs: Vec<(Vec<char>, usize)> = tree.motif_counts(length).into_iter().collect();
            // Most frequent first, ties in lexical order
            motifs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            motifs.truncate(top);
            output::print_motifs(&mut stdout, &motifs)?;
        }
        Commands::Tree { file } => {
            let (tree, _) = build_tree(&file, config, show_progress)?;
            write!(stdout, "{}", tree.render())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("stree=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stree=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load_config(cli: &Cli) -> Result<TreeConfig> {
    let mut config = match &cli.config {
        Some(path) => utils::load_config(path)?,
        None => TreeConfig::default(),
    };
    if cli.shared_terminators {
        config.terminators = TerminatorPolicy::Shared;
    }
    debug!(?config, "configuration");
    Ok(config)
}

/// Build one tree over every non-empty line of `path`
fn build_tree(
    path: &Path,
    config: TreeConfig,
    show_progress: bool,
) -> Result<(SuffixTree<char>, Vec<InputLine>)> {
    let lines = utils::read_sequences(path)?;
    let mut tree = SuffixTree::with_config(config);

    let pb = progress::sequence_bar(lines.len(), show_progress);
    for line in &lines {
        tree.add_sequence(&line.symbols, true)
            .with_context(|| format!("Failed to index line {}", line.number))?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        sequences = tree.sequence_count(),
        nodes = tree.node_count(),
        leaves = tree.leaf_count(),
        "built suffix tree"
    );
    Ok((tree, lines))
}

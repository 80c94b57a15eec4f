use anyhow::{Context, Result};
use bracketsmith::{
    BracketGenerator, BracketStyle, BracketTreeBuilder, GeneratorConfig, MatchIdGenerator,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bracketsmith", about = "Elimination bracket topology generator")]
struct Cli {
    /// Log collapse progress at debug level (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the collapsed bracket for a participant count.
    Generate {
        /// Number of participants.
        players: u32,
        /// Bracket style (single-elimination, template16).
        #[arg(long, default_value = "single-elimination")]
        style: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Skip structural verification.
        #[arg(long)]
        no_verify: bool,
    },
    /// Print the number of rounds for a participant count.
    Rounds {
        /// Number of participants.
        players: u32,
        /// Bracket style (single-elimination, template16).
        #[arg(long, default_value = "single-elimination")]
        style: String,
    },
    /// Dump the full single-elimination tree before byes are collapsed.
    Tree {
        /// Number of participants.
        players: u32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            players,
            style,
            format,
            no_verify,
        } => run_generate(players, &style, format, !no_verify)?,
        Commands::Rounds { players, style } => run_rounds(players, &style)?,
        Commands::Tree { players } => run_tree(players),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_style(name: &str) -> Result<BracketStyle> {
    name.parse::<BracketStyle>()
        .with_context(|| format!("invalid --style {:?}", name))
}

fn run_generate(players: u32, style: &str, format: Format, verify: bool) -> Result<()> {
    let style = parse_style(style)?;
    let config = GeneratorConfig::default()
        .with_style(style)
        .with_verification(verify);
    let bracket = BracketGenerator::new(config)
        .generate(players)
        .with_context(|| format!("failed to generate {} bracket for {} players", style, players))?;

    info!(
        matches = bracket.len(),
        fingerprint = %bracket.fingerprint().to_hex(),
        "bracket ready"
    );

    match format {
        Format::Text => print!("{}", bracket),
        Format::Json => print_json(&bracket)?,
    }

    Ok(())
}

#[cfg(feature = "visualize")]
fn print_json(bracket: &bracketsmith::Bracket) -> Result<()> {
    let json = serde_json::to_string_pretty(bracket).context("failed to serialise bracket")?;
    println!("{}", json);
    Ok(())
}

#[cfg(not(feature = "visualize"))]
fn print_json(_bracket: &bracketsmith::Bracket) -> Result<()> {
    anyhow::bail!("JSON output requires building with the `visualize` feature")
}

fn run_rounds(players: u32, style: &str) -> Result<()> {
    let style = parse_style(style)?;
    match style.round_count(players) {
        Some(rounds) => println!("{}", rounds),
        None => println!("no bracket for {} participant(s)", players),
    }
    Ok(())
}

fn run_tree(players: u32) {
    let tree = BracketTreeBuilder::new(players).build(&mut MatchIdGenerator::new());
    println!(
        "full tree: size {}, {} rounds, {} matches",
        tree.bracket_size,
        tree.rounds,
        tree.len()
    );
    for node in &tree.nodes {
        println!("  {}", node);
    }
}

//! Word Ladder CLI
//!
//! Serves the game over HTTP, solves single pairs, or runs an interactive game.

use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use word_ladder::config::{DEFAULT_ADDR, DEFAULT_SOLVE_TIMEOUT, DEFAULT_WORDS_PATH};
use word_ladder::{
    load_dictionary, random_pair, read_dictionary, LadderGame, LadderSolver, MoveOutcome,
    ServerConfig, SolveOutcome, SolverConfig, WordIndex,
};

const BANNER_TEXT: &str = include_str!("text/banner.txt");
const HELP_TEXT: &str = include_str!("text/help.txt");

/// Attempts at drawing a connected pair before giving up.
const PAIR_ATTEMPTS: usize = 64;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Word list to use instead of the bundled one
    #[arg(long, global = true, value_name = "FILE")]
    words: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Print a shortest ladder between two words
    Solve {
        from: String,
        to: String,
        /// Longest ladder to look for, in steps
        #[arg(long)]
        max_depth: Option<usize>,
    },
    /// Print the next word of a shortest ladder
    Hint { from: String, to: String },
    /// Print a random same-length word pair
    Pair {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Solve many random pairs in parallel and print the ladder length distribution
    Bench {
        #[arg(long, default_value_t = 1000)]
        pairs: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, env = "WORD_LADDER_ADDR", default_value = DEFAULT_ADDR)]
    addr: SocketAddr,
    /// Word list served by the API
    #[arg(long = "word-list", env = "WORD_LADDER_WORDS", default_value = DEFAULT_WORDS_PATH)]
    word_list: PathBuf,
    /// Allowed origin for CORS
    #[arg(long, env = "ALLOWED_ORIGIN")]
    allowed_origin: Option<String>,
    #[arg(long, env = "WORD_LADDER_SOLVE_TIMEOUT_MS", default_value_t = DEFAULT_SOLVE_TIMEOUT.as_millis() as u64)]
    solve_timeout_ms: u64,
    #[arg(long, env = "WORD_LADDER_SEED")]
    seed: Option<u64>,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            addr: args.addr,
            words_path: args.word_list,
            allowed_origin: args.allowed_origin.filter(|o| !o.is_empty()),
            solve_timeout: Duration::from_millis(args.solve_timeout_ms),
            seed: args.seed,
        }
    }
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            let mut stdout = io::stdout();
            while running_clone.load(Ordering::Relaxed) {
                print!("\r{} {}", frames[i % frames.len()], message);
                let _ = stdout.flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            print!("\r{}\r", " ".repeat(message.len() + 3));
            let _ = stdout.flush();
        });
        Self { running, handle: Some(handle) }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn load_index(path: Option<&PathBuf>) -> anyhow::Result<WordIndex> {
    let words = match path {
        Some(path) => read_dictionary(path)?,
        None => load_dictionary(),
    };
    let index = WordIndex::build(&words);
    anyhow::ensure!(!index.is_empty(), "dictionary contains no words");
    tracing::debug!(words = index.len(), "dictionary indexed");
    Ok(index)
}

fn print_game(game: &LadderGame) {
    println!();
    println!(
        "{}  →  {}",
        game.start().to_uppercase(),
        game.target().to_uppercase()
    );
    println!(
        "Ladder so far: {}",
        game.chain()
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join(" → ")
    );
    println!();
}

fn new_game<'a>(solver: LadderSolver<'a>, rng: &mut StdRng) -> Option<LadderGame<'a>> {
    let game = LadderGame::random(solver, rng, PAIR_ATTEMPTS);
    match &game {
        Some(game) => {
            print_game(game);
            if let Some(steps) = game.optimal_steps() {
                println!("Can you do it in {} steps?", steps);
                println!();
            }
        }
        None => println!("Could not find a connected word pair in this dictionary."),
    }
    game
}

fn run_interactive(index: &WordIndex) -> anyhow::Result<()> {
    for line in BANNER_TEXT.lines() {
        println!("{}", line);
    }
    println!("Loaded {} words.", index.len());
    println!("Type 'help' for commands.");

    let solver = LadderSolver::new(index);
    let mut rng = StdRng::from_entropy();
    let mut game = new_game(solver, &mut rng);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => {
                println!("{}", HELP_TEXT);
            }
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "new" | "n" => {
                game = new_game(solver, &mut rng);
            }
            "show" | "s" => match &game {
                Some(game) => print_game(game),
                None => println!("No game in progress. Use 'new' to start one."),
            },
            "undo" | "u" => match game.as_mut().map(|g| g.undo()) {
                Some(Ok(current)) => println!("Back to {}", current.to_uppercase()),
                Some(Err(err)) => println!("{}", err),
                None => println!("No game in progress."),
            },
            "hint" => match game.as_ref().map(|g| g.hint()) {
                Some(Ok(hint)) => {
                    println!();
                    println!("Try: {}", hint.word.to_uppercase());
                    println!("  Steps left after that: {}", hint.remaining);
                    println!();
                }
                Some(Err(err)) => println!("No hint: {}", err),
                None => println!("No game in progress."),
            },
            "solve" => match &game {
                Some(game) => match solver.solve(game.current(), game.target()) {
                    SolveOutcome::Found(ladder) => {
                        println!();
                        for (i, word) in ladder.words().iter().enumerate() {
                            println!("{:>4}  {}", i, word.to_uppercase());
                        }
                        println!();
                    }
                    SolveOutcome::Unreachable => {
                        println!("The target can no longer be reached from here. Try 'undo'.")
                    }
                    SolveOutcome::InvalidInput(reason) => println!("{}", reason),
                },
                None => println!("No game in progress."),
            },
            word => match game.as_mut() {
                Some(current) => match current.play(word) {
                    Ok(MoveOutcome::Continue { moves }) => {
                        println!("{} ({} moves)", word.to_uppercase(), moves);
                    }
                    Ok(MoveOutcome::Solved { moves }) => {
                        println!();
                        println!("🎉 Solved in {} moves!", moves);
                        if let Some(best) = current.optimal_steps() {
                            if moves == best {
                                println!("✓ That's a shortest ladder.");
                            } else {
                                println!("A shortest ladder takes {} steps.", best);
                            }
                        }
                        println!("Type 'new' for another game.");
                        println!();
                    }
                    Err(err) => println!("{}", err),
                },
                None => {
                    println!("Unknown command: {}", word);
                    println!("Type 'help' for available commands.");
                }
            },
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => return run_interactive(&load_index(cli.words.as_ref())?),
    };

    match command {
        Command::Serve(args) => {
            let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
            runtime.block_on(word_ladder::server::serve(args.into()))?;
        }
        Command::Solve { from, to, max_depth } => {
            let index = load_index(cli.words.as_ref())?;
            let solver = LadderSolver::with_config(&index, SolverConfig { max_depth });
            match solver.solve(&from, &to) {
                SolveOutcome::Found(ladder) => {
                    for word in ladder.words() {
                        println!("{}", word);
                    }
                    println!();
                    println!("Solved in {} steps.", ladder.steps());
                }
                SolveOutcome::Unreachable => {
                    println!("No ladder exists from {} to {}.", from, to);
                }
                SolveOutcome::InvalidInput(reason) => anyhow::bail!("{}", reason),
            }
        }
        Command::Hint { from, to } => {
            let index = load_index(cli.words.as_ref())?;
            let hint = LadderSolver::new(&index).hint(&from, &to)?;
            println!("Hint: {}", hint.word);
            println!("Steps left: {}", hint.remaining);
        }
        Command::Pair { seed } => {
            let index = load_index(cli.words.as_ref())?;
            let (from, to) = random_pair(&index, &mut rng_from(seed))
                .context("dictionary has no two words of the same length")?;
            println!("{} {}", from, to);
        }
        Command::Bench { pairs, seed } => {
            let index = load_index(cli.words.as_ref())?;
            let mut rng = rng_from(seed);
            let pairs: Vec<(String, String)> = (0..pairs)
                .filter_map(|_| random_pair(&index, &mut rng))
                .collect();

            let spinner = Spinner::new("Solving...");
            let start = std::time::Instant::now();
            let stats = LadderSolver::new(&index).length_distribution(&pairs);
            let elapsed = start.elapsed();
            spinner.stop();

            println!("Results:");
            println!("{}", "=".repeat(40));
            println!();
            let total = stats.total().max(1);
            for (steps, count) in &stats.steps {
                let pct = *count as f64 / total as f64 * 100.0;
                let bar = "█".repeat((*count * 40 / total).max(1));
                println!("  {:>2} steps: {:>5} ({:>5.1}%) {}", steps, count, pct, bar);
            }
            println!();
            if let Some(average) = stats.average_steps() {
                println!("Average steps: {:.3}", average);
            }
            println!("Unreachable pairs: {}", stats.unreachable);
            println!("Total pairs: {}", stats.total());
            println!("Time elapsed: {:.2?}", elapsed);
        }
    }

    Ok(())
}

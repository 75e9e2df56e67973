use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};

use make10::expression::{Expression, Token};
use make10::game::{Game, TerminalPresenter};
use make10::is_solution;
use make10::locale::Locale;
use make10::problem::{Problem, generate};
use make10::session::Session;
use make10::solver::solve_all;
use make10::storage::JsonFileStore;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Play the puzzles interactively (default)
    Play,
    /// Print one solution for every problem
    Solve,
    /// Print the problem set
    List,
}

/// Make 10 - combine four digits with + - * / and parentheses to reach 10
#[derive(Parser, Debug)]
#[command(name = "make10")]
#[command(version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File where progress and language are saved
    #[arg(long, env = "MAKE10_STATE_FILE", default_value = ".make10_state.json")]
    pub state_file: PathBuf,

    /// Display language (en, ja); defaults to the saved or detected one
    #[arg(long)]
    pub lang: Option<String>,

    /// Pause after a correct answer before the next problem
    #[arg(long, default_value_t = 1000)]
    pub advance_delay_ms: u64,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub command: Command,
    pub state_file: PathBuf,
    pub lang: Option<String>,
    pub advance_delay: Duration,
    pub log_level: LogLevel,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            command: args.command.unwrap_or(Command::Play),
            state_file: args.state_file,
            lang: args.lang,
            advance_delay: Duration::from_millis(args.advance_delay_ms),
            log_level: args.log_level,
        }
    }
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> CliConfig {
    CliArgs::parse().into()
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .try_init()
        .context("Failed to initialize logging")
}

fn play(config: &CliConfig) -> Result<()> {
    let store = JsonFileStore::open_or_empty(&config.state_file);
    let mut session = Session::load(generate(), store, Locale::detect());
    if let Some(code) = &config.lang {
        session.set_locale(code);
    }

    let stdout = io::stdout();
    let mut game = Game::new(
        session,
        TerminalPresenter::new(stdout.lock()),
        config.advance_delay,
    );
    game.run(io::stdin().lock()).context("Game loop failed")
}

/// One output line of `solve`; a solution is only printed after it passes
/// the same check a player's answer must pass
fn solution_line(number: usize, problem: &Problem, solution: Option<Vec<Token>>) -> String {
    match solution.map(Expression::from_tokens) {
        Some(expr) if is_solution(problem, &expr.to_infix()) => {
            format!("{:>3}: {} -> {}", number, problem, expr)
        }
        Some(expr) => {
            warn!("Rejected solver output for {}: {}", problem, expr.to_infix());
            format!("{:>3}: {} -> Unknown.", number, problem)
        }
        None => format!("{:>3}: {} -> Unknown.", number, problem),
    }
}

fn solve() {
    let problems = generate();
    for (i, (problem, solution)) in problems.iter().zip(solve_all(&problems)).enumerate() {
        println!("{}", solution_line(i + 1, problem, solution));
    }
}

fn list() {
    for (i, problem) in generate().iter().enumerate() {
        println!("{:>3}: {}", i + 1, problem);
    }
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args();

    init_logging(&config.log_level)?;
    info!("Running {:?}", config.command);

    match config.command {
        Command::Play => play(&config),
        Command::Solve => {
            solve();
            Ok(())
        }
        Command::List => {
            list();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_play() {
        let args = CliArgs::try_parse_from(["make10"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            let config = CliConfig::from(args);
            assert_eq!(config.command, Command::Play);
            assert_eq!(config.advance_delay, Duration::from_millis(1000));
            assert!(config.lang.is_none());
        }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from([
            "make10",
            "--state-file",
            "/tmp/state.json",
            "--lang",
            "ja",
            "--advance-delay-ms",
            "0",
            "-l",
            "debug",
            "solve",
        ]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            let config = CliConfig::from(args);
            assert_eq!(config.command, Command::Solve);
            assert_eq!(config.state_file, PathBuf::from("/tmp/state.json"));
            assert_eq!(config.lang.as_deref(), Some("ja"));
            assert!(config.advance_delay.is_zero());
            assert!(matches!(config.log_level, LogLevel::Debug));
        }
    }

    #[test]
    fn test_solution_line_checks_solver_output() {
        let problem = Problem::new([1, 2, 3, 4]);
        assert!(problem.is_some());
        if let Some(problem) = problem {
            let digit = |value: u8| Token::Digit {
                value,
                slot: (value - 1) as usize,
            };
            let plus = Token::Operator(make10::Operator::Add);
            let times = Token::Operator(make10::Operator::Mul);

            let sum = vec![digit(1), plus, digit(2), plus, digit(3), plus, digit(4)];
            assert_eq!(
                solution_line(1, &problem, Some(sum)),
                "  1: 1 2 3 4 -> 1 + 2 + 3 + 4"
            );

            let product = vec![digit(1), times, digit(2), times, digit(3), times, digit(4)];
            assert_eq!(
                solution_line(1, &problem, Some(product)),
                "  1: 1 2 3 4 -> Unknown."
            );
            assert_eq!(solution_line(7, &problem, None), "  7: 1 2 3 4 -> Unknown.");
        }
    }

    #[test]
    fn test_rejects_bad_delay() {
        assert!(CliArgs::try_parse_from(["make10", "--advance-delay-ms", "soon"]).is_err());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Error.to_log_level_filter(),
            log::LevelFilter::Error
        );
        assert_eq!(LogLevel::Warn.to_log_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_log_level_filter(), log::LevelFilter::Info);
        assert_eq!(
            LogLevel::Debug.to_log_level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(
            LogLevel::Trace.to_log_level_filter(),
            log::LevelFilter::Trace
        );
    }
}

// exprtree: parse a token file into an arithmetic AST and print it

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as _;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use exprtree::parser::constants::{DEFAULT_INDENT_WIDTH, DEFAULT_MAX_DEPTH};
use exprtree::parser::loader::{load_token_file, LoaderOptions, MalformedLinePolicy};
use exprtree::parser::parse::{ParseError, ParseOptions, Parser};
use exprtree::parser::printer::render_tree;
use exprtree::parser::token::TokenStream;
use exprtree::ui::App;

#[derive(Debug, clap::Parser)]
#[command(
    name = "exprtree",
    version,
    about = "Build and print the AST of a pre-tokenized arithmetic expression"
)]
struct Cli {
    /// Token file, one `<value>,<type>` pair per line
    token_file: PathBuf,

    /// Reject tokens left over after the expression
    #[arg(long)]
    strict: bool,

    /// Stop at the first malformed line instead of skipping it
    #[arg(long)]
    reject_malformed: bool,

    /// Maximum number of tokens to load
    #[arg(long, value_name = "N")]
    max_tokens: Option<usize>,

    /// Maximum parenthesis nesting depth
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Spaces per tree level
    #[arg(long, value_name = "N", default_value_t = DEFAULT_INDENT_WIDTH)]
    indent: usize,

    /// Print loaded tokens and every parse step to stderr
    #[arg(long)]
    trace: bool,

    /// Replay the parse in an interactive terminal viewer
    #[arg(long)]
    view: bool,

    /// Print progress messages to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            policy: if self.reject_malformed {
                MalformedLinePolicy::Abort
            } else {
                MalformedLinePolicy::Skip
            },
            max_tokens: self.max_tokens,
        }
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict: self.strict,
            max_depth: self.max_depth,
            trace: self.trace || self.view,
            ..ParseOptions::default()
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            // --help / --version
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            eprintln!();
            eprintln!("Usage: exprtree <token_file>");
            return ExitCode::FAILURE;
        }
    };

    if cli.verbose {
        eprintln!("Loading {}...", cli.token_file.display());
    }

    let loaded = match load_token_file(&cli.token_file, &cli.loader_options()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    for diagnostic in &loaded.diagnostics {
        eprintln!("Warning: {}", diagnostic);
    }

    if cli.verbose {
        eprintln!(
            "Loaded {} tokens ({} line(s) skipped).",
            loaded.tokens.len(),
            loaded.diagnostics.len()
        );
    }

    if cli.trace {
        for token in &loaded.tokens {
            eprintln!("Read token: type={}, value={}", token.kind, token.text);
        }
    }

    let mut parser = Parser::with_options(TokenStream::new(loaded.tokens), cli.parse_options());
    let outcome = parser.parse();
    let error_line = outcome
        .as_ref()
        .err()
        .and_then(|e| e.line_in(parser.stream().tokens()));
    let trace = parser.take_trace().unwrap_or_default();

    if cli.trace {
        for step in trace.steps() {
            eprintln!("{}", step);
        }
        if trace.is_truncated() {
            eprintln!("(trace truncated after {} steps)", trace.limit());
        }
    }

    if let Ok(ast) = &outcome {
        if cli.verbose {
            eprintln!(
                "Parsed successfully. {} node(s), {} token(s) unconsumed.",
                ast.node_count(),
                parser.stream().remaining().len()
            );
        }
    }

    if cli.view {
        let tokens = parser.into_stream().into_tokens();
        let failed = outcome.is_err();
        let mut app = App::new(tokens, trace, outcome, cli.indent);
        if let Err(e) = run_viewer(&mut app) {
            eprintln!("Error: {:#}", e);
            return ExitCode::FAILURE;
        }
        if let Err(e) = &app.outcome {
            report_syntax_error(e, error_line);
        }
        return if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    match outcome {
        Ok(ast) => {
            println!("Abstract Syntax Tree:");
            print!("{}", render_tree(&ast, cli.indent));
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_syntax_error(&e, error_line);
            ExitCode::FAILURE
        }
    }
}

fn report_syntax_error(err: &ParseError, line: Option<usize>) {
    match line {
        Some(line) => eprintln!("Syntax Error: {} (line {})", err, line),
        None => eprintln!("Syntax Error: {}", err),
    }
}

fn run_viewer(app: &mut App) -> Result<()> {
    enable_raw_mode().context("enabling raw mode")?;
    restoring(
        || {
            execute!(io::stdout(), EnterAlternateScreen).context("entering alternate screen")?;
            restoring(
                || {
                    let backend = CrosstermBackend::new(io::stdout());
                    let mut terminal = Terminal::new(backend).context("creating terminal")?;
                    app.run(&mut terminal).context("running trace viewer")
                },
                || {
                    execute!(io::stdout(), LeaveAlternateScreen, Show)
                        .context("leaving alternate screen")
                },
            )
        },
        || disable_raw_mode().context("disabling raw mode"),
    )
}

/// Run `body`, then `restore` whether or not `body` succeeded.
/// An error from `body` takes precedence.
fn restoring<T>(
    body: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = body();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_restore_runs_after_failed_setup() {
        let restored = Cell::new(false);
        let result: Result<()> = restoring(
            || bail!("entering alternate screen"),
            || {
                restored.set(true);
                Ok(())
            },
        );

        assert!(restored.get());
        assert_eq!(result.unwrap_err().to_string(), "entering alternate screen");
    }

    #[test]
    fn test_restore_error_reported_after_success() {
        let result = restoring(|| Ok(7), || bail!("disabling raw mode"));
        assert_eq!(result.unwrap_err().to_string(), "disabling raw mode");

        let result = restoring(|| Ok(7), || Ok(()));
        assert_eq!(result.unwrap(), 7);
    }

    #[test]
    fn test_nested_restores_unwind_in_order() {
        let order = RefCell::new(Vec::new());
        let result: Result<()> = restoring(
            || {
                restoring(
                    || bail!("creating terminal"),
                    || {
                        order.borrow_mut().push("screen");
                        Ok(())
                    },
                )
            },
            || {
                order.borrow_mut().push("raw mode");
                Ok(())
            },
        );

        assert!(result.is_err());
        assert_eq!(*order.borrow(), vec!["screen", "raw mode"]);
    }
}

use clap::Parser;
use std::collections::HashMap;
use std::io::{self, BufRead, IsTerminal};
use termlist_cli::cli::Cli;
use termlist_core::clipboard::{self, Clipboard, UnavailableClipboard};
use termlist_core::config::{self, Palette};
use termlist_core::error::AppError;
use termlist_core::interpreter::{Interpreter, ScreenOp};
use termlist_core::storage::FileStore;
use termlist_core::store::TaskStore;

const CLEAR_SEQUENCE: &str = "\x1b[2J\x1b[H";
const EMBEDDED_ENV_VAR: &str = "TERMLIST_EMBEDDED";

struct Host {
    interpreter: Interpreter,
    palette: Palette,
    aliases: HashMap<String, String>,
    clear_screen: bool,
}

impl Host {
    fn submit(&mut self, line: &str) {
        let expanded = self.expand(line);
        let ops = self.interpreter.run(&expanded);
        self.paint(&ops);
    }

    fn paint(&self, ops: &[ScreenOp]) {
        for op in ops {
            match op {
                ScreenOp::Clear => {
                    if self.clear_screen {
                        print!("{CLEAR_SEQUENCE}");
                    }
                }
                ScreenOp::Print(line) => {
                    println!("{}", self.palette.paint(&line.text, line.style));
                }
            }
        }
    }

    // Host-level affordances, applied before the interpreter sees the line:
    // `!!` recalls the last submitted command, and a line matching a
    // configured alias key is replaced by its expansion.
    fn expand(&self, line: &str) -> String {
        let trimmed = line.trim();
        if trimmed == "!!" {
            return self.interpreter.last_input().unwrap_or("").to_string();
        }
        if let Some(expansion) = self.aliases.get(trimmed) {
            return expansion.clone();
        }
        line.to_string()
    }
}

fn ready_text() -> &'static str {
    if std::env::var(EMBEDDED_ENV_VAR).is_ok() {
        "embedded mode ✓"
    } else {
        "terminal mode ✓"
    }
}

fn run_repl(host: &mut Host) -> Result<(), AppError> {
    let ops = host.interpreter.startup(ready_text());
    host.paint(&ops);

    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    let mut input = String::new();

    loop {
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        host.submit(line);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = &config_load.error {
        eprintln!("ERROR: {err}");
    }
    let config = config_load.config;

    let backend = match &cli.store_dir {
        Some(dir) => FileStore::new(dir.clone()),
        None => FileStore::from_env()?,
    };
    let store = TaskStore::new(Box::new(backend));

    let clipboard: Box<dyn Clipboard> = if cli.no_clipboard {
        Box::new(UnavailableClipboard)
    } else {
        clipboard::clipboard_from_env()
    };

    let stdout_tty = io::stdout().is_terminal();
    let theme = cli
        .theme
        .clone()
        .or_else(|| config.theme.clone())
        .or_else(|| (!stdout_tty).then(|| "mono".to_string()));
    let palette = config::palette_for_theme(theme.as_deref());

    let mut host = Host {
        interpreter: Interpreter::new(store, clipboard),
        palette,
        aliases: config.aliases,
        clear_screen: stdout_tty,
    };

    match cli.command {
        Some(line) => {
            host.submit(&line);
            Ok(())
        }
        None => run_repl(&mut host),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

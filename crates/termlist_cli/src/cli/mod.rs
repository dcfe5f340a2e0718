use clap::Parser;
use std::path::PathBuf;

/// Terminal task list driven by one-line commands.
///
/// Run without arguments for the interactive prompt; type `help` there for
/// the command reference.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run a single command line (e.g. "add: buy milk") and exit
    ///
    /// Example: termlist -c "add: buy milk"
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    pub command: Option<String>,

    /// Directory holding the persisted task list
    #[arg(long = "store-dir", value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Color theme (default, mono)
    #[arg(long, value_name = "NAME")]
    pub theme: Option<String>,

    /// Skip the system clipboard; export prints its JSON instead
    #[arg(long = "no-clipboard")]
    pub no_clipboard: bool,
}

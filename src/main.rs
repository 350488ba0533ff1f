use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wp_debug_mode::command::{self, FlowState, Picker, SelectionFlow};
use wp_debug_mode::setting;
use wp_debug_mode::{AppContext, Command, Config, Error, Outcome, StatusNotice, ToolSettings};

/// Toggle WordPress debug constants in the nearest wp-config.php.
#[derive(Debug, Parser)]
#[command(name = "wpdm", version, about)]
struct Cli {
    /// File or directory to start searching from (defaults to the working directory).
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Tool settings file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Errors only.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Set a boolean setting to true.
    Enable {
        #[arg(default_value = "debug")]
        setting: String,
    },
    /// Set a boolean setting to false.
    Disable {
        #[arg(default_value = "debug")]
        setting: String,
    },
    /// Flip a boolean setting.
    Toggle { setting: String },
    /// Set a setting to a value.
    Set { setting: String, value: String },
    /// Print a setting's current value.
    Get { setting: String },
    /// Print every setting's current value.
    Status,
    /// Print the path of the config file.
    Locate,
    /// List the settings this tool knows about.
    List,
    /// Show the config file in the file manager.
    Reveal,
    /// Open the config file in an editor.
    Open,
    /// Choose and change settings interactively.
    Menu,
}

impl Action {
    /// The library command for this action; `None` for the menu and list,
    /// which are handled by the binary.
    fn into_command(self) -> Option<Command> {
        Some(match self {
            Action::Enable { setting } => Command::Enable { setting },
            Action::Disable { setting } => Command::Disable { setting },
            Action::Toggle { setting } => Command::Toggle { setting },
            Action::Set { setting, value } => Command::Set { setting, value },
            Action::Get { setting } => Command::Get { setting },
            Action::Status => Command::Status,
            Action::Locate => Command::Locate,
            Action::Reveal => Command::Reveal,
            Action::Open => Command::Open,
            Action::List | Action::Menu => return None,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// `WPDM_LOG`, then `RUST_LOG`, then the verbosity flags.
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env("WPDM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), Error> {
    if let Action::List = cli.action {
        for def in setting::definitions() {
            println!("{:<14} {:<20} {}", def.id, def.constant, def.kind);
        }
        return Ok(());
    }

    let mut config = Config::builder();
    if let Some(path) = &cli.config {
        config = config.with_file(path, true);
    }
    let settings: ToolSettings = config.with_env("WPDM", "__").build()?;

    let ctx = AppContext::builder()
        .with_settings(settings)
        .with_optional_document(cli.file.or_else(|| std::env::current_dir().ok()))
        .build()?;

    let Some(command) = cli.action.into_command() else {
        let document = ctx.config_document()?;
        let duration = ctx.settings().notice_duration();
        let mut flow = SelectionFlow::new(&document, TerminalPicker, duration);
        loop {
            match flow.step().await? {
                FlowState::Applied(notice) => present(notice.clone()),
                FlowState::Done => return Ok(()),
                _ => {}
            }
        }
    };

    match command::run(&ctx, command).await? {
        Outcome::Notice(notice) => present(notice),
        Outcome::Value(Some(value)) => println!("{value}"),
        Outcome::Value(None) => eprintln!("not set"),
        Outcome::Report(rows) => {
            for (id, value) in rows {
                println!("{:<14} {}", id, value.as_deref().unwrap_or("-"));
            }
        }
    }
    Ok(())
}

fn present(mut notice: StatusNotice) {
    notice.show();
    println!("{notice}");
    notice.hide();
}

struct TerminalPicker;

impl Picker for TerminalPicker {
    fn pick(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>, Error> {
        dialoguer::Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(|e| Error::Prompt {
                source: std::io::Error::other(e),
            })
    }
}

//! Commands that operate on the config file found from the active document.

mod flow;
mod launch;

pub use flow::{FlowState, Picker, SelectionFlow};

use std::time::Duration;

use crate::context::AppContext;
use crate::document::ConfigDocument;
use crate::notice::StatusNotice;
use crate::setting::{self, SettingDefinition, ValueKind};
use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set a boolean setting to `true`.
    Enable { setting: String },
    /// Set a boolean setting to `false`.
    Disable { setting: String },
    /// Negate a boolean setting.
    Toggle { setting: String },
    Set { setting: String, value: String },
    Get { setting: String },
    /// Every registered setting with its current value.
    Status,
    /// Path of the located config file.
    Locate,
    /// Show the config file in the file manager.
    Reveal,
    /// Open the config file in an editor.
    Open,
}

/// What a command produced for the caller to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Notice(StatusNotice),
    Value(Option<String>),
    /// `(setting id, current value)` pairs.
    Report(Vec<(&'static str, Option<String>)>),
}

/// Runs `command` against the config file for `ctx`'s active document.
pub async fn run(ctx: &AppContext, command: Command) -> Result<Outcome, Error> {
    let duration = ctx.settings().notice_duration();
    let document = ctx.config_document()?;
    tracing::debug!(?command, path = %document.location().path().display(), "running command");

    match command {
        Command::Enable { setting } => assign(&document, &setting, "true", duration).await,
        Command::Disable { setting } => assign(&document, &setting, "false", duration).await,
        Command::Toggle { setting } => {
            let def = setting::lookup(&setting)?;
            if def.kind != ValueKind::Boolean {
                return Err(Error::InvalidValue {
                    setting: def.id,
                    value: String::new(),
                    reason: "only boolean settings can be toggled".to_string(),
                });
            }
            let current = document.require(def.id).await?;
            assign(&document, def.id, setting::toggled(&current), duration).await
        }
        Command::Set { setting, value } => assign(&document, &setting, &value, duration).await,
        Command::Get { setting } => Ok(Outcome::Value(document.get(&setting).await?)),
        Command::Status => {
            let content = document.read().await?;
            let rows = setting::definitions()
                .iter()
                .map(|def| setting::get(&content, def.id).map(|value| (def.id, value)))
                .collect::<Result<_, _>>()?;
            Ok(Outcome::Report(rows))
        }
        Command::Locate => Ok(Outcome::Value(Some(
            document.location().path().display().to_string(),
        ))),
        Command::Reveal => {
            launch::reveal(ctx.settings(), document.location()).await?;
            Ok(Outcome::Notice(StatusNotice::info(
                format!("Revealed {}", document.location().path().display()),
                duration,
            )))
        }
        Command::Open => {
            launch::open(ctx.settings(), document.location()).await?;
            Ok(Outcome::Notice(StatusNotice::info(
                format!("Opened {}", document.location().path().display()),
                duration,
            )))
        }
    }
}

async fn assign(
    document: &ConfigDocument,
    id: &str,
    value: &str,
    duration: Duration,
) -> Result<Outcome, Error> {
    let def = setting::lookup(id)?;
    document.set(def.id, value).await?;
    Ok(Outcome::Notice(applied_notice(def, value, duration)))
}

/// The notice shown after `def` was set to `value`.
pub fn applied_notice(def: &SettingDefinition, value: &str, duration: Duration) -> StatusNotice {
    let text = match (def.kind, value) {
        (ValueKind::Boolean, "true") => format!("{} was enabled", def.label),
        (ValueKind::Boolean, _) => format!("{} was disabled", def.label),
        _ => format!("{} set to {}", def.label, value),
    };
    StatusNotice::success(text, duration)
}

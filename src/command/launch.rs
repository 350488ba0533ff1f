//! Handing the config file to desktop programs.

use std::ffi::OsString;

use crate::config::ToolSettings;
use crate::locate::ConfigLocation;
use crate::Error;

/// Shows the config file in the platform file manager.
pub async fn reveal(settings: &ToolSettings, location: &ConfigLocation) -> Result<(), Error> {
    run(reveal_argv(settings, location)).await
}

/// Opens the config file with the configured editor or the platform opener.
pub async fn open(settings: &ToolSettings, location: &ConfigLocation) -> Result<(), Error> {
    run(open_argv(settings, location)).await
}

fn reveal_argv(settings: &ToolSettings, location: &ConfigLocation) -> Vec<OsString> {
    match &settings.reveal_command {
        Some(prefix) => with_target(prefix, location.path().as_os_str()),
        None if cfg!(target_os = "macos") => {
            with_target(["open", "-R"], location.path().as_os_str())
        }
        None if cfg!(windows) => {
            let mut select = OsString::from("/select,");
            select.push(location.path());
            vec!["explorer".into(), select]
        }
        // xdg-open cannot select a file, so show its directory.
        None => with_target(["xdg-open"], location.directory().as_os_str()),
    }
}

fn open_argv(settings: &ToolSettings, location: &ConfigLocation) -> Vec<OsString> {
    let target = location.path().as_os_str();
    match &settings.open_command {
        Some(prefix) => with_target(prefix, target),
        None if cfg!(target_os = "macos") => with_target(["open"], target),
        None if cfg!(windows) => with_target(["explorer"], target),
        None => with_target(["xdg-open"], target),
    }
}

fn with_target<I>(prefix: I, target: &std::ffi::OsStr) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    prefix
        .into_iter()
        .map(|s| OsString::from(s.as_ref()))
        .chain(std::iter::once(target.to_os_string()))
        .collect()
}

async fn run(argv: Vec<OsString>) -> Result<(), Error> {
    let Some((program, args)) = argv.split_first() else {
        return Err(Error::Launch {
            program: String::new(),
            reason: "empty command".to_string(),
        });
    };
    let name = program.to_string_lossy().into_owned();
    tracing::debug!(program = %name, ?args, "launching");

    let status = tokio::process::Command::new(program)
        .args(args)
        .status()
        .await
        .map_err(|e| Error::Launch {
            program: name.clone(),
            reason: e.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Launch {
            program: name,
            reason: format!("exited with {status}"),
        })
    }
}

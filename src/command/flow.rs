//! Interactive settings menu.
//!
//! The flow is a small state machine:
//!
//! ```text
//! Idle -> SettingChosen -> [EnumValueChosen] -> Applied -> Idle
//!   \-> Done (menu cancelled)
//! ```
//!
//! Presenting choices is delegated to a [`Picker`], so the same flow runs
//! against a terminal prompt or a scripted test double.

use std::time::Duration;

use super::applied_notice;
use crate::document::ConfigDocument;
use crate::notice::StatusNotice;
use crate::setting::{self, SettingDefinition, ValueKind};
use crate::Error;

/// Presents a list of choices and returns the chosen index, or `None` when
/// the user backs out. A picker that cannot prompt at all returns an error.
pub trait Picker {
    fn pick(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>, Error>;
}

impl<P: Picker + ?Sized> Picker for &mut P {
    fn pick(&mut self, prompt: &str, items: &[String]) -> Result<Option<usize>, Error> {
        (**self).pick(prompt, items)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    SettingChosen(&'static SettingDefinition),
    EnumValueChosen {
        setting: &'static SettingDefinition,
        value: &'static str,
    },
    Applied(StatusNotice),
    Done,
}

pub struct SelectionFlow<'a, P> {
    document: &'a ConfigDocument,
    picker: P,
    notice_duration: Duration,
    state: FlowState,
}

impl<'a, P: Picker> SelectionFlow<'a, P> {
    pub fn new(document: &'a ConfigDocument, picker: P, notice_duration: Duration) -> Self {
        Self {
            document,
            picker,
            notice_duration,
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Advances the flow by one transition.
    pub async fn step(&mut self) -> Result<&FlowState, Error> {
        let next = match std::mem::replace(&mut self.state, FlowState::Done) {
            FlowState::Idle => self.choose_setting().await?,
            FlowState::SettingChosen(def) => self.handle_setting(def).await?,
            FlowState::EnumValueChosen { setting, value } => {
                self.document.set(setting.id, value).await?;
                FlowState::Applied(applied_notice(setting, value, self.notice_duration))
            }
            FlowState::Applied(_) => FlowState::Idle,
            FlowState::Done => FlowState::Done,
        };
        tracing::debug!(state = ?next, "menu transition");
        self.state = next;
        Ok(&self.state)
    }

    /// Runs until the menu is cancelled, returning every notice produced.
    ///
    /// Any error aborts the menu.
    pub async fn run(mut self) -> Result<Vec<StatusNotice>, Error> {
        let mut notices = Vec::new();
        loop {
            match self.step().await? {
                FlowState::Applied(notice) => notices.push(notice.clone()),
                FlowState::Done => return Ok(notices),
                _ => {}
            }
        }
    }

    async fn choose_setting(&mut self) -> Result<FlowState, Error> {
        let content = self.document.read().await?;
        let definitions = setting::definitions();
        let items = definitions
            .iter()
            .map(|def| {
                let current = setting::get(&content, def.id)?;
                Ok(format!(
                    "{}: {}",
                    def.label,
                    current.as_deref().unwrap_or("not set")
                ))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(match self.picker.pick("Select a setting", &items)? {
            Some(i) if i < definitions.len() => FlowState::SettingChosen(&definitions[i]),
            _ => FlowState::Done,
        })
    }

    async fn handle_setting(
        &mut self,
        def: &'static SettingDefinition,
    ) -> Result<FlowState, Error> {
        let current = self.document.require(def.id).await?;

        match def.kind {
            ValueKind::Boolean => {
                let value = setting::toggled(&current);
                self.document.set(def.id, value).await?;
                Ok(FlowState::Applied(applied_notice(
                    def,
                    value,
                    self.notice_duration,
                )))
            }
            ValueKind::Enum(allowed) => {
                let items: Vec<String> = allowed
                    .iter()
                    .map(|v| {
                        if *v == current {
                            format!("{v} (current)")
                        } else {
                            v.to_string()
                        }
                    })
                    .collect();
                Ok(match self.picker.pick(def.label, &items)? {
                    Some(i) if i < allowed.len() => FlowState::EnumValueChosen {
                        setting: def,
                        value: allowed[i],
                    },
                    _ => FlowState::Idle,
                })
            }
            ValueKind::RawString => Ok(FlowState::Applied(StatusNotice::info(
                format!("{}: {}", def.label, current),
                self.notice_duration,
            ))),
        }
    }
}

//! Doctor command implementation.
//!
//! The `ideprobe doctor` command discovers every IntelliJ install, runs
//! one validator per install and prints the results.

use serde::Serialize;

use crate::cli::args::DoctorArgs;
use crate::discovery::ProbeContext;
use crate::error::{ProbeError, Result};
use crate::ui::UserInterface;
use crate::validation::{Severity, ValidationMessage, ValidationResult, ValidationType};
use crate::validator::{installed_validators, Validator};

use super::dispatcher::{Command, CommandResult};

/// One validator's outcome, as rendered.
#[derive(Debug, Clone, Serialize)]
pub struct DoctorEntry {
    pub title: String,
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Run every validator on its own thread, returning results in input order.
pub fn run_validators(validators: &[Box<dyn Validator>]) -> Vec<DoctorEntry> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = validators
            .iter()
            .map(|validator| scope.spawn(move || validator.validate()))
            .collect();

        validators
            .iter()
            .zip(handles)
            .map(|(validator, handle)| {
                let result = handle.join().unwrap_or_else(|_| {
                    tracing::warn!("Validator for {} panicked", validator.title());
                    ValidationResult::missing(vec![ValidationMessage::error(format!(
                        "Validating {} failed unexpectedly.",
                        validator.title()
                    ))])
                });
                DoctorEntry {
                    title: validator.title().to_string(),
                    result,
                }
            })
            .collect()
    })
}

/// The doctor command implementation.
pub struct DoctorCommand {
    ctx: ProbeContext,
    args: DoctorArgs,
}

impl DoctorCommand {
    /// Create a new doctor command.
    pub fn new(ctx: ProbeContext, args: DoctorArgs) -> Self {
        Self { ctx, args }
    }

    fn render_json(&self, entries: &[DoctorEntry], ui: &mut dyn UserInterface) -> Result<()> {
        let json = serde_json::to_string_pretty(entries).map_err(|e| {
            ProbeError::Other(anyhow::anyhow!("Failed to serialize results: {}", e))
        })?;
        ui.raw(&json);
        Ok(())
    }

    fn render_terminal(&self, entries: &[DoctorEntry], ui: &mut dyn UserInterface) {
        if entries.is_empty() {
            ui.warning(&format!(
                "No IntelliJ IDEA installations found on {}.",
                self.ctx.platform.name()
            ));
            return;
        }

        ui.show_header("IntelliJ IDEA");
        for entry in entries {
            let headline = match &entry.result.status_info {
                Some(info) => format!("{} ({})", entry.title, info),
                None => entry.title.clone(),
            };
            match entry.result.status {
                ValidationType::Installed => ui.success(&headline),
                ValidationType::Partial => ui.warning(&headline),
                ValidationType::Missing => ui.error(&headline),
            }

            if !ui.output_mode().shows_details() {
                continue;
            }
            for message in &entry.result.messages {
                let text = indent_continuation(&message.text);
                match message.severity {
                    Severity::Info => ui.message(&format!("    • {}", text)),
                    Severity::Error => ui.message(&format!("    ✗ {}", text)),
                    Severity::Hint => ui.hint(&format!("    ! {}", text)),
                }
            }
        }
    }
}

/// Align the continuation lines of a multi-line message with its first line.
fn indent_continuation(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join("\n      ")
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let validators = installed_validators(&self.ctx);
        tracing::debug!("Running {} validators", validators.len());
        let entries = run_validators(&validators);

        if self.args.json {
            self.render_json(&entries, ui)?;
        } else {
            self.render_terminal(&entries, ui);
        }

        if entries.iter().any(|e| e.result.status.is_problem()) {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

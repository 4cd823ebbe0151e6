//! Interactive form entry
//!
//! Prompts every declared field in entry order (General Data, then Cable
//! Data), starting from an empty form.

use crate::error::{ReportError, Result};
use cableway_common::fields::{self, FieldDefinition, FieldGroup};
use cableway_common::FormSnapshot;
use dialoguer::Input;

/// Fields in prompt order, grouped under their heading
pub fn prompt_groups() -> Vec<(&'static str, Vec<&'static FieldDefinition>)> {
    [FieldGroup::General, FieldGroup::Cable]
        .into_iter()
        .map(|group| (group.heading(), fields::in_group(group).collect()))
        .collect()
}

/// Ask for every field
pub fn run_interactive_form() -> Result<FormSnapshot> {
    let mut snapshot = FormSnapshot::empty();

    for (heading, group) in prompt_groups() {
        println!("\n{}", heading);
        for field in group {
            let answer = prompt_field(field.name)?;
            snapshot.set(field.name, &answer)?;
        }
    }

    Ok(snapshot)
}

fn prompt_field(name: &str) -> Result<String> {
    Input::<String>::new()
        .with_prompt(name)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ReportError::Prompt(e.to_string()))
}

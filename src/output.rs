//! Output mode for non-interactive commands: styled text or a JSON envelope.

use serde::Serialize;
use serde_json::{json, Value};

use crate::contact::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

impl OutputMode {
    pub fn is_human(self) -> bool {
        self == OutputMode::Text
    }
}

#[derive(Debug, Serialize)]
struct Envelope<'a, T: Serialize> {
    ok: bool,
    command: &'a str,
    data: T,
}

/// Build the JSON envelope printed by `--format json`
pub fn success_json<T: Serialize>(command: &str, data: T) -> crate::Result<String> {
    let envelope = Envelope { ok: true, command, data };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Print the JSON envelope for `command`. Does nothing in text mode.
pub fn emit_success<T: Serialize>(mode: OutputMode, command: &str, data: T) -> crate::Result<()> {
    if mode.is_human() {
        return Ok(());
    }
    println!("{}", success_json(command, data)?);
    Ok(())
}

/// One contact per block, fields on their own lines, blocks separated by a blank line
pub fn contact_listing(contacts: &[Contact]) -> String {
    contacts.iter().map(|contact| format!("{contact}\n\n")).collect()
}

pub fn list_payload(contacts: &[Contact]) -> Value {
    json!({ "contacts": contacts })
}

pub fn search_payload(term: &str, contacts: &[Contact]) -> Value {
    json!({ "term": term, "contacts": contacts })
}

pub fn groups_payload(groups: &[(String, usize)]) -> Value {
    let groups: Vec<Value> = groups
        .iter()
        .map(|(category, count)| json!({ "category": category, "count": count }))
        .collect();
    json!({ "groups": groups })
}

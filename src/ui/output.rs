//! Styled status lines.
//!
//! Each helper renders into a `String` so the caller decides where it goes:
//! the interactive shell writes to its own writer, subcommands to stdout.

use crate::ui::{Icons, Theme};
use owo_colors::OwoColorize;

pub fn header(theme: &Theme, text: &str) -> String {
    format!("{}", text.style(theme.header.clone()))
}

pub fn success(theme: &Theme, label: &str) -> String {
    format!("{} {}", Icons::CHECK, label.style(theme.success.clone()))
}

pub fn error(theme: &Theme, label: &str) -> String {
    format!("{} {}", Icons::CROSS, label.style(theme.error.clone()))
}

pub fn warn(theme: &Theme, label: &str) -> String {
    format!("{} {}", Icons::WARN, label.style(theme.warn.clone()))
}

pub fn info(theme: &Theme, label: &str, value: &str) -> String {
    format!(
        "{} {}: {}",
        Icons::INFO.style(theme.info.clone()),
        label.style(theme.dim.clone()),
        value
    )
}

pub fn prompt(theme: &Theme, label: &str) -> String {
    format!("{}", label.style(theme.prompt.clone()))
}

pub fn dim(theme: &Theme, text: &str) -> String {
    format!("{}", text.style(theme.dim.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_has_no_escapes() {
        let theme = Theme::plain();
        assert_eq!(success(&theme, "saved"), format!("{} saved", Icons::CHECK));
        assert_eq!(header(&theme, "Contacts"), "Contacts");
        assert!(!info(&theme, "Database", "data/contacts.db").contains('\u{1b}'));
    }
}

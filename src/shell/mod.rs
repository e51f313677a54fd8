//! Interactive Shell - numbered menu over a line reader
//!
//! Reads one menu choice per line, collects the fields the action needs,
//! validates email and phone, and calls into the [`ContactStore`].
//! End of input is treated like choosing Exit.

pub mod menu;

use std::io::{BufRead, Write};

use crate::contact::ContactFields;
use crate::storage::ContactStore;
use crate::ui::{self, Theme};
use crate::validate::{is_email_valid, is_phone_valid};
use crate::{Error, Result};

pub use menu::MenuChoice;
use menu::{ACTION_RULE, MENU_TITLE};

/// Parse a contact id typed at a prompt
pub fn parse_id(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| Error::InvalidId(trimmed.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'a, R, W> {
    store: &'a ContactStore,
    input: R,
    out: W,
    theme: Theme,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a ContactStore, input: R, out: W) -> Self {
        Self::with_theme(store, input, out, ui::theme().clone())
    }

    pub fn with_theme(store: &'a ContactStore, input: R, out: W, theme: Theme) -> Self {
        Self { store, input, out, theme }
    }

    /// Run the menu loop until Exit or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                tracing::debug!("End of input at menu");
                break;
            };
            writeln!(self.out, "\n{}", ACTION_RULE)?;

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add_contact()?,
                Some(MenuChoice::Edit) => self.edit_contact()?,
                Some(MenuChoice::Delete) => self.delete_contact()?,
                Some(MenuChoice::Search) => self.search_contacts()?,
                Some(MenuChoice::Group) => self.group_contacts()?,
                Some(MenuChoice::Exit) => {
                    writeln!(self.out, "\n EXITING...")?;
                    Flow::Exit
                }
                None => {
                    self.warn("Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", ui::header(&self.theme, MENU_TITLE))?;
        for choice in MenuChoice::all() {
            writeln!(self.out, "{}. {}", choice.number(), choice.label())?;
        }
        Ok(())
    }

    /// Print `label` and read one line without its line ending; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{}", ui::prompt(&self.theme, label))?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }

    fn success(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "\n\n{}", ui::success(&self.theme, message))?;
        Ok(())
    }

    fn reject(&mut self, message: &str) -> Result<()> {
        tracing::info!("Rejected: {}", message);
        writeln!(self.out, "\n\n{}", ui::error(&self.theme, message))?;
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        tracing::info!("Invalid input: {}", message);
        writeln!(self.out, "{}", ui::warn(&self.theme, message))?;
        Ok(())
    }

    fn read_id(&mut self, label: &str) -> Result<Option<Option<i64>>> {
        let Some(raw) = self.prompt(label)? else {
            return Ok(None);
        };
        match parse_id(&raw) {
            Ok(id) => Ok(Some(Some(id))),
            Err(e) => {
                tracing::debug!("{}", e);
                self.warn("Invalid ID.")?;
                Ok(Some(None))
            }
        }
    }

    // ========== Actions ==========

    fn add_contact(&mut self) -> Result<Flow> {
        let Some(first_name) = self.prompt("Enter first name: ")? else { return Ok(Flow::Exit) };
        let Some(last_name) = self.prompt("Enter last name: ")? else { return Ok(Flow::Exit) };
        let Some(email) = self.prompt("Enter email: ")? else { return Ok(Flow::Exit) };
        if !is_email_valid(&email) {
            self.warn("Invalid email. Contact not added.")?;
            return Ok(Flow::Continue);
        }
        let Some(phone) = self.prompt("Enter phone number: ")? else { return Ok(Flow::Exit) };
        if !is_phone_valid(&phone) {
            self.warn("Invalid phone number. Contact not added.")?;
            return Ok(Flow::Continue);
        }
        let Some(category) = self.prompt("Enter category: ")? else { return Ok(Flow::Exit) };

        let fields = ContactFields { first_name, last_name, email, phone, category };
        if self.store.add(&fields)? {
            self.success("Contact added successfully.")?;
        } else {
            self.reject("Duplicate contact. Contact not added.")?;
        }
        Ok(Flow::Continue)
    }

    /// Blank answers keep the stored value; only a non-blank email or phone is validated.
    fn edit_contact(&mut self) -> Result<Flow> {
        let Some(id) = self.read_id("Enter ID of contact to edit: ")? else { return Ok(Flow::Exit) };
        let Some(id) = id else { return Ok(Flow::Continue) };

        let Some(current) = self.store.get(id)? else {
            self.reject("Contact does not exist in the database. Try again...")?;
            return Ok(Flow::Continue);
        };

        let Some(first_name) = self.prompt("Enter new first name (leave blank to keep current): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(last_name) = self.prompt("Enter new last name (leave blank to keep current): ")? else {
            return Ok(Flow::Exit);
        };
        let Some(email) = self.prompt("Enter new email (leave blank to keep current): ")? else {
            return Ok(Flow::Exit);
        };
        if !email.trim().is_empty() && !is_email_valid(&email) {
            self.warn("Invalid email. Contact not updated. Try again...")?;
            return Ok(Flow::Continue);
        }
        let Some(phone) = self.prompt("Enter new phone number (leave blank to keep current): ")? else {
            return Ok(Flow::Exit);
        };
        if !phone.trim().is_empty() && !is_phone_valid(&phone) {
            self.warn("Invalid phone number. Contact not updated.")?;
            return Ok(Flow::Continue);
        }
        let Some(category) = self.prompt("Enter new category (leave blank to keep current): ")? else {
            return Ok(Flow::Exit);
        };

        let fields = ContactFields { first_name, last_name, email, phone, category }.merge_over(&current);
        if self.store.edit(id, &fields)? {
            self.success("Contact updated successfully.")?;
        } else {
            self.reject("No contact found with that ID.")?;
        }
        Ok(Flow::Continue)
    }

    fn delete_contact(&mut self) -> Result<Flow> {
        let Some(id) = self.read_id("Enter ID of contact to delete: ")? else { return Ok(Flow::Exit) };
        let Some(id) = id else { return Ok(Flow::Continue) };

        if self.store.delete(id)? {
            self.success("Contact deleted successfully.")?;
        } else {
            self.reject("No contact found with that ID.")?;
        }
        Ok(Flow::Continue)
    }

    fn search_contacts(&mut self) -> Result<Flow> {
        let Some(term) = self.prompt("Enter search term: ")? else { return Ok(Flow::Exit) };

        let result = self.store.search(&term)?;
        if result.is_empty() {
            writeln!(self.out, "{}", ui::dim(&self.theme, "No contacts found."))?;
        } else {
            writeln!(self.out, "{}", result)?;
        }
        Ok(Flow::Continue)
    }

    fn group_contacts(&mut self) -> Result<Flow> {
        let groups = self.store.group_by_category()?;
        if groups.is_empty() {
            writeln!(self.out, "{}", ui::dim(&self.theme, "No contacts found."))?;
        }
        for (category, count) in groups {
            writeln!(self.out, "{}: {}", category, count)?;
        }
        Ok(Flow::Continue)
    }
}

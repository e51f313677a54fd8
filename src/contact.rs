//! Contact types
//!
//! A `Contact` is a stored row; `ContactFields` is the five user-supplied
//! values without an id, as passed to add and edit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator line written after every contact in a search block
pub const SEARCH_SEPARATOR: &str = "----------------------";

/// A contact as persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Assigned by the store, never reused
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// Free-text grouping label
    pub category: String,
}

impl Contact {
    /// Full display name (`first last`)
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Write this contact in the search block format, separator included.
    pub fn write_search_block(&self, out: &mut String) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "Name: {} {}\nEmail: {}\nPhone: {}\nCategory: {}\n{}\n",
            self.first_name, self.last_name, self.email, self.phone, self.category, SEARCH_SEPARATOR
        );
    }

    /// The editable fields of this contact
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            category: self.category.clone(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        writeln!(f, "First Name: {}", self.first_name)?;
        writeln!(f, "Last Name: {}", self.last_name)?;
        writeln!(f, "Email: {}", self.email)?;
        writeln!(f, "Phone: {}", self.phone)?;
        write!(f, "Category: {}", self.category)
    }
}

/// User-supplied contact values, without an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
}

impl ContactFields {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: phone.into(),
            category: category.into(),
        }
    }

    /// Fill every blank field from `current`.
    ///
    /// A field counts as blank when it is empty after trimming whitespace.
    pub fn merge_over(self, current: &Contact) -> ContactFields {
        fn pick(new: String, old: String) -> String {
            if new.trim().is_empty() { old } else { new }
        }

        let old = current.fields();
        ContactFields {
            first_name: pick(self.first_name, old.first_name),
            last_name: pick(self.last_name, old.last_name),
            email: pick(self.email, old.email),
            phone: pick(self.phone, old.phone),
            category: pick(self.category, old.category),
        }
    }
}

use tabled::{settings::Style, Table, Tabled};

use crate::contact::Contact;

#[derive(Tabled)]
pub struct ContactRow {
    #[tabled(rename = "ID")]
    pub id: i64,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Email")]
    pub email: String,
    #[tabled(rename = "Phone")]
    pub phone: String,
    #[tabled(rename = "Category")]
    pub category: String,
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            name: contact.full_name(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            category: contact.category.clone(),
        }
    }
}

#[derive(Tabled)]
pub struct CategoryRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Contacts")]
    pub count: usize,
}

/// Render contacts as a rounded table; empty string for no rows
pub fn contacts_table(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return String::new();
    }
    let rows: Vec<ContactRow> = contacts.iter().map(ContactRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render per-category counts as a rounded table; empty string for no rows
pub fn categories_table(groups: &[(String, usize)]) -> String {
    if groups.is_empty() {
        return String::new();
    }
    let rows = groups.iter().map(|(category, count)| CategoryRow {
        category: category.clone(),
        count: *count,
    });
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contacts_table_contains_fields() {
        let contacts = vec![Contact {
            id: 3,
            first_name: "Test".into(),
            last_name: "User".into(),
            email: "test@example.com".into(),
            phone: "555-555-5555".into(),
            category: "Friend".into(),
        }];
        let table = contacts_table(&contacts);
        assert!(table.contains("Test User"));
        assert!(table.contains("test@example.com"));
        assert!(table.contains("Category"));
    }

    #[test]
    fn test_empty_tables_render_nothing() {
        assert!(contacts_table(&[]).is_empty());
        assert!(categories_table(&[]).is_empty());
    }
}

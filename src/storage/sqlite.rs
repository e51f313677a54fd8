//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior, params};
use crate::Result;
use crate::contact::{Contact, ContactFields};
use super::schema;

const SELECT_COLUMNS: &str = "SELECT id, first_name, last_name, email, phone, category FROM contacts";

/// SQLite-backed storage for contacts.
///
/// Owns the one connection the process uses. The connection is released by
/// [`ContactStore::close`], or when the store is dropped.
pub struct ContactStore {
    conn: Connection,
}

impl ContactStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::info!("Opened contact store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Close the connection, reporting any error SQLite returns on close.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| e)?;
        tracing::info!("Closed contact store");
        Ok(())
    }

    /// Run `f` against the store, then close it whether or not `f` succeeded.
    ///
    /// An error from `f` wins over an error from closing.
    pub fn scoped<T, E>(self, f: impl FnOnce(&ContactStore) -> std::result::Result<T, E>) -> std::result::Result<T, E>
    where
        E: From<crate::Error>,
    {
        let result = f(&self);
        let closed = self.close();
        let value = result?;
        closed?;
        Ok(value)
    }

    // ========== Existence Checks ==========

    /// True iff a contact with exactly this email exists
    pub fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(email_exists(&self.conn, email)?)
    }

    /// True iff a contact with this id exists
    pub fn exists_by_id(&self, id: i64) -> Result<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM contacts WHERE id = ?1)",
            [id],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    // ========== Contact Operations ==========

    /// Insert a new contact unless its email is already taken.
    ///
    /// Returns `false` without inserting on a duplicate email. The check and
    /// the insert share one IMMEDIATE transaction.
    pub fn add(&self, fields: &ContactFields) -> Result<bool> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;

        if email_exists(&tx, &fields.email)? {
            tracing::info!("Rejected duplicate email {}", fields.email);
            return Ok(false);
        }

        tx.execute(
            r#"
            INSERT INTO contacts (first_name, last_name, email, phone, category)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                fields.first_name,
                fields.last_name,
                fields.email,
                fields.phone,
                fields.category,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!("Added contact {} <{}>", id, fields.email);
        Ok(true)
    }

    /// Overwrite all five fields of contact `id`.
    ///
    /// Returns `true` iff a row was updated.
    pub fn edit(&self, id: i64, fields: &ContactFields) -> Result<bool> {
        let updated = self.conn.execute(
            r#"
            UPDATE contacts SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                phone = ?4,
                category = ?5
            WHERE id = ?6
            "#,
            params![
                fields.first_name,
                fields.last_name,
                fields.email,
                fields.phone,
                fields.category,
                id,
            ],
        )?;
        tracing::debug!("Edit contact {}: {} row(s) updated", id, updated);
        Ok(updated > 0)
    }

    /// Delete contact `id`. Returns `true` iff a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM contacts WHERE id = ?1", [id])?;
        tracing::debug!("Delete contact {}: {} row(s) removed", id, removed);
        Ok(removed > 0)
    }

    /// Get a contact by id
    pub fn get(&self, id: i64) -> Result<Option<Contact>> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                [id],
                row_to_contact,
            )
            .optional()
            .map_err(Into::into)
    }

    // ========== Queries ==========

    /// Contacts where any field contains `term`, in id order.
    ///
    /// Matching folds ASCII case only (SQLite `LIKE`); `É` and `é` differ.
    /// `%` and `_` in `term` match literally.
    pub fn search_contacts(&self, term: &str) -> Result<Vec<Contact>> {
        let pattern = format!("%{}%", escape_like(term));
        let mut stmt = self.conn.prepare(&format!(
            r#"{SELECT_COLUMNS}
            WHERE first_name LIKE ?1 ESCAPE '\'
               OR last_name LIKE ?1 ESCAPE '\'
               OR email LIKE ?1 ESCAPE '\'
               OR phone LIKE ?1 ESCAPE '\'
               OR category LIKE ?1 ESCAPE '\'
            ORDER BY id"#
        ))?;

        let contacts = stmt
            .query_map([pattern], row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!("Search {:?} matched {} contact(s)", term, contacts.len());
        Ok(contacts)
    }

    /// Search and render each match as a text block; empty when nothing matches.
    pub fn search(&self, term: &str) -> Result<String> {
        let mut out = String::new();
        for contact in self.search_contacts(term)? {
            contact.write_search_block(&mut out);
        }
        Ok(out)
    }

    /// Count contacts per distinct category, ordered by category
    pub fn group_by_category(&self) -> Result<Vec<(String, usize)>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT COALESCE(category, '') AS cat, COUNT(*)
            FROM contacts
            GROUP BY cat
            ORDER BY cat
            "#,
        )?;

        let groups = stmt
            .query_map([], |row| {
                let category: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok((category, count as usize))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(groups)
    }

    /// Every contact in id order
    pub fn list_all(&self) -> Result<Vec<Contact>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let contacts = stmt
            .query_map([], row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contacts)
    }

    /// Count all contacts
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn email_exists(conn: &Connection, email: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM contacts WHERE email = ?1)",
        [email],
        |row| row.get(0),
    )
}

/// Helper to convert a row to a Contact; NULL text columns read as empty
fn row_to_contact(row: &rusqlite::Row) -> rusqlite::Result<Contact> {
    let text = |idx: usize| -> rusqlite::Result<String> {
        Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    Ok(Contact {
        id: row.get(0)?,
        first_name: text(1)?,
        last_name: text(2)?,
        email: text(3)?,
        phone: text(4)?,
        category: text(5)?,
    })
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> ContactFields {
        ContactFields::new("Test", "User", "test@example.com", "555-555-5555", "Friend")
    }

    #[test]
    fn test_schema_created() {
        let store = ContactStore::open_in_memory().unwrap();
        let name: Option<String> = store
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type='table' AND name='contacts'",
                [],
                |row| row.get(0),
            )
            .optional()
            .unwrap();
        assert_eq!(name.as_deref(), Some("contacts"));
    }

    #[test]
    fn test_exists_by_email() {
        let store = ContactStore::open_in_memory().unwrap();
        assert!(!store.exists_by_email("test@example.com").unwrap());

        store.add(&test_user()).unwrap();
        assert!(store.exists_by_email("test@example.com").unwrap());
        assert!(!store.exists_by_email("TEST@example.com").unwrap());
    }

    #[test]
    fn test_add_rejects_duplicate_email() {
        let store = ContactStore::open_in_memory().unwrap();
        assert!(store.add(&test_user()).unwrap());

        let dup = ContactFields::new("Other", "Person", "test@example.com", "555-000-0000", "Work");
        assert!(!store.add(&dup).unwrap());

        assert_eq!(store.count().unwrap(), 1);
        let kept = store.get(1).unwrap().unwrap();
        assert_eq!(kept.first_name, "Test");
        assert_eq!(kept.category, "Friend");
    }

    #[test]
    fn test_edit_contact() {
        let store = ContactStore::open_in_memory().unwrap();
        assert!(!store.edit(1, &test_user()).unwrap());

        store.add(&test_user()).unwrap();
        let changed = ContactFields::new("New", "Name", "new@example.com", "(555) 111-2222", "Work");
        assert!(store.edit(1, &changed).unwrap());

        let contact = store.get(1).unwrap().unwrap();
        assert_eq!(contact.fields(), changed);
        assert_eq!(contact.id, 1);
    }

    #[test]
    fn test_edit_overwrites_with_blanks() {
        let store = ContactStore::open_in_memory().unwrap();
        store.add(&test_user()).unwrap();

        assert!(store.edit(1, &ContactFields::default()).unwrap());
        assert_eq!(store.get(1).unwrap().unwrap().fields(), ContactFields::default());
    }

    #[test]
    fn test_exists_by_id_and_delete() {
        let store = ContactStore::open_in_memory().unwrap();
        assert!(!store.exists_by_id(1).unwrap());
        assert!(!store.delete(1).unwrap());

        store.add(&test_user()).unwrap();
        assert!(store.exists_by_id(1).unwrap());
        assert!(store.delete(1).unwrap());
        assert!(!store.exists_by_id(1).unwrap());
        assert!(!store.delete(1).unwrap());
    }

    #[test]
    fn test_ids_not_reused() {
        let store = ContactStore::open_in_memory().unwrap();
        store.add(&test_user()).unwrap();
        store.delete(1).unwrap();

        store.add(&test_user()).unwrap();
        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, 2);
    }

    #[test]
    fn test_search_contacts() {
        let store = ContactStore::open_in_memory().unwrap();
        store.add(&test_user()).unwrap();

        assert_eq!(
            store.search("Test").unwrap(),
            "Name: Test User\nEmail: test@example.com\nPhone: 555-555-5555\nCategory: Friend\n----------------------\n"
        );
    }

    #[test]
    fn test_search_matches_any_field_case_insensitive() {
        let store = ContactStore::open_in_memory().unwrap();
        store.add(&test_user()).unwrap();
        store
            .add(&ContactFields::new("Ada", "Lovelace", "ada@math.org", "555.123.4567", "Work"))
            .unwrap();

        assert_eq!(store.search_contacts("lovelace").unwrap().len(), 1);
        assert_eq!(store.search_contacts("MATH").unwrap().len(), 1);
        assert_eq!(store.search_contacts("123").unwrap().len(), 1);
        assert_eq!(store.search_contacts("friend").unwrap().len(), 1);
        assert_eq!(store.search_contacts("555").unwrap().len(), 2);
        assert_eq!(store.search("nobody").unwrap(), "");
    }

    #[test]
    fn test_search_folds_ascii_case_only() {
        let store = ContactStore::open_in_memory().unwrap();
        store
            .add(&ContactFields::new("Émile", "Zola", "emile@example.fr", "555-555-1234", "Author"))
            .unwrap();

        assert!(store.search_contacts("émile").unwrap().is_empty());
        assert_eq!(store.search_contacts("Émile").unwrap().len(), 1);
        assert_eq!(store.search_contacts("MILE").unwrap().len(), 1);
        assert_eq!(store.search_contacts("zOLA").unwrap().len(), 1);
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let store = ContactStore::open_in_memory().unwrap();
        store.add(&test_user()).unwrap();

        assert!(store.search_contacts("%").unwrap().is_empty());
        assert!(store.search_contacts("_").unwrap().is_empty());
    }

    #[test]
    fn test_group_by_category() {
        let store = ContactStore::open_in_memory().unwrap();
        assert!(store.group_by_category().unwrap().is_empty());

        store.add(&test_user()).unwrap();
        store
            .add(&ContactFields::new("Second", "User", "second@example.com", "555-555-0000", "Friend"))
            .unwrap();
        store
            .add(&ContactFields::new("Third", "User", "third@example.com", "555-555-1111", "Work"))
            .unwrap();

        let groups = store.group_by_category().unwrap();
        assert!(groups.contains(&("Friend".to_string(), 2)));
        assert!(groups.contains(&("Work".to_string(), 1)));
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_reopen_file_keeps_contacts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.db");

        let store = ContactStore::open(&path).unwrap();
        store.add(&test_user()).unwrap();
        store.close().unwrap();

        let store = ContactStore::open(&path).unwrap();
        assert!(store.exists_by_email("test@example.com").unwrap());
        assert_eq!(store.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_rejection_is_logged() {
        use std::io::Write;
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct LogBuffer(Arc<Mutex<Vec<u8>>>);

        impl Write for LogBuffer {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .finish();

        let store = ContactStore::open_in_memory().unwrap();
        tracing::subscriber::with_default(subscriber, || {
            store.add(&test_user()).unwrap();
            store.add(&test_user()).unwrap();
        });

        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("INFO"));
        assert!(text.contains("Rejected duplicate email test@example.com"));
    }

    #[test]
    fn test_scoped_returns_value_and_closes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.db");

        let added = ContactStore::open(&path)
            .unwrap()
            .scoped(|store| store.add(&test_user()))
            .unwrap();
        assert!(added);

        let store = ContactStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_scoped_propagates_closure_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.db");

        let result: Result<()> = ContactStore::open(&path).unwrap().scoped(|store| {
            store.add(&test_user())?;
            Err(crate::Error::InvalidId("abc".into()))
        });
        assert!(matches!(result, Err(crate::Error::InvalidId(id)) if id == "abc"));

        // The committed insert survives and the file opens again after close
        let store = ContactStore::open(&path).unwrap();
        assert!(store.exists_by_email("test@example.com").unwrap());
    }

    #[test]
    fn test_open_reports_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("contacts.db");
        assert!(ContactStore::open(&path).is_err());
    }
}

//! Credential Store
//! Mission: Persist user and admin principal records

use crate::auth::models::{Principal, Role};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::info;
use uuid::Uuid;

const USERS: &str = "users";
const ADMINS: &str = "admins";

/// Principal storage with SQLite backend.
///
/// Users and admins live in separate tables with the same shape; the auth
/// core only ever performs find-by-email, find-by-id, and save against it.
/// The password column holds the raw record, hashed or plaintext.
pub struct PrincipalStore {
    db_path: String,
}

impl PrincipalStore {
    /// Create a new principal store and initialize the schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        for table in [USERS, ADMINS] {
            conn.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {table} (
                        id TEXT PRIMARY KEY,
                        name TEXT NOT NULL,
                        email TEXT UNIQUE NOT NULL,
                        password TEXT NOT NULL,
                        role TEXT NOT NULL,
                        created_at TEXT NOT NULL
                    )"
                ),
                [],
            )?;
        }

        Ok(())
    }

    /// Look up a user by email (unique key).
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<Principal>> {
        self.find_one(USERS, "email", email)
    }

    /// Look up a user by id.
    pub fn find_user_by_id(&self, id: &Uuid) -> Result<Option<Principal>> {
        self.find_one(USERS, "id", &id.to_string())
    }

    /// Look up an admin by email (unique key).
    pub fn find_admin_by_email(&self, email: &str) -> Result<Option<Principal>> {
        self.find_one(ADMINS, "email", email)
    }

    /// Look up an admin by id.
    pub fn find_admin_by_id(&self, id: &Uuid) -> Result<Option<Principal>> {
        self.find_one(ADMINS, "id", &id.to_string())
    }

    /// Create a user record. The password record is stored as given; the
    /// caller decides whether it is hashed.
    pub fn create_user(&self, name: &str, email: &str, password: &str) -> Result<Principal> {
        let user = Principal {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::User,
            password: password.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.insert(USERS, &user)?;
        info!("Created user: {}", user.email);
        Ok(user)
    }

    /// Create an admin record.
    pub fn create_admin(&self, name: &str, email: &str, password: &str) -> Result<Principal> {
        let admin = Principal {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::Admin,
            password: password.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.insert(ADMINS, &admin)?;
        info!("Created admin: {}", admin.email);
        Ok(admin)
    }

    /// Rewrite a user's mutable fields (name, email, password record).
    pub fn update_user(&self, user: &Principal) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        let updated = conn
            .execute(
                "UPDATE users SET name = ?1, email = ?2, password = ?3 WHERE id = ?4",
                params![user.name, user.email, user.password, user.id.to_string()],
            )
            .context("Failed to update user")?;

        if updated == 0 {
            anyhow::bail!("User not found");
        }
        Ok(())
    }

    /// List all users.
    pub fn list_users(&self) -> Result<Vec<Principal>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn
            .prepare("SELECT id, name, email, password, role, created_at FROM users")?;

        let users = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Remove every principal record. Used by the seed binary.
    pub fn clear(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute("DELETE FROM users", [])?;
        conn.execute("DELETE FROM admins", [])?;
        Ok(())
    }

    fn insert(&self, table: &str, p: &Principal) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            &format!(
                "INSERT INTO {table} (id, name, email, password, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
            ),
            params![
                p.id.to_string(),
                p.name,
                p.email,
                p.password,
                p.role.as_str(),
                p.created_at,
            ],
        )
        .context("Failed to insert principal")?;
        Ok(())
    }

    fn find_one(&self, table: &str, column: &str, value: &str) -> Result<Option<Principal>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name, email, password, role, created_at FROM {table} WHERE {column} = ?1"
        ))?;

        match stmt.query_row(params![value], Self::map_row) {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Principal> {
        let role_str: String = row.get(4)?;
        Ok(Principal {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            name: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
            role: Role::from_str(&role_str).unwrap_or(Role::User),
            created_at: row.get(5)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (PrincipalStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = PrincipalStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_create_and_find_user() {
        let (store, _temp) = create_test_store();

        let user = store
            .create_user("John Doe", "john@example.com", "password123")
            .unwrap();
        assert_eq!(user.role, Role::User);

        let by_email = store.find_user_by_email("john@example.com").unwrap();
        assert!(by_email.is_some());
        assert_eq!(by_email.unwrap().id, user.id);

        let by_id = store.find_user_by_id(&user.id).unwrap();
        assert_eq!(by_id.unwrap().email, "john@example.com");
    }

    #[test]
    fn test_users_and_admins_are_separate() {
        let (store, _temp) = create_test_store();

        let admin = store
            .create_admin("Admin", "admin@example.com", "password123")
            .unwrap();
        assert_eq!(admin.role, Role::Admin);

        // An admin id does not resolve on the user path, and vice versa.
        assert!(store.find_user_by_id(&admin.id).unwrap().is_none());
        assert!(store.find_admin_by_id(&admin.id).unwrap().is_some());
        assert!(store.find_admin_by_email("admin@example.com").unwrap().is_some());
        assert!(store.find_user_by_email("admin@example.com").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (store, _temp) = create_test_store();

        store.create_user("A", "dup@example.com", "x").unwrap();
        assert!(store.create_user("B", "dup@example.com", "y").is_err());
    }

    #[test]
    fn test_update_user_rewrites_password_record() {
        let (store, _temp) = create_test_store();

        let mut user = store
            .create_user("Jane", "jane@example.com", "old-secret")
            .unwrap();

        user.name = "Jane Smith".to_string();
        user.password = "new-secret".to_string();
        store.update_user(&user).unwrap();

        let reloaded = store.find_user_by_id(&user.id).unwrap().unwrap();
        assert_eq!(reloaded.name, "Jane Smith");
        assert_eq!(reloaded.password, "new-secret");
    }

    #[test]
    fn test_update_missing_user_fails() {
        let (store, _temp) = create_test_store();
        let ghost = Principal {
            id: Uuid::new_v4(),
            name: "Ghost".to_string(),
            email: "ghost@example.com".to_string(),
            role: Role::User,
            password: String::new(),
            created_at: Utc::now().to_rfc3339(),
        };
        assert!(store.update_user(&ghost).is_err());
    }

    #[test]
    fn test_list_and_clear() {
        let (store, _temp) = create_test_store();

        store.create_user("A", "a@example.com", "x").unwrap();
        store.create_user("B", "b@example.com", "y").unwrap();
        assert_eq!(store.list_users().unwrap().len(), 2);

        store.clear().unwrap();
        assert!(store.list_users().unwrap().is_empty());
    }
}

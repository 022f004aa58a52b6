//! User accounts for the local backend.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils::{get_enum, get_id, get_timestamp};
use crate::{
    error::{BookingError, DatabaseResultExt, Result},
    models::{User, UserRole},
    params::Register,
};

const USER_COLUMNS: &str = "id, email, first_name, last_name, phone, role, confirmed, created_at";
const INSERT_USER_SQL: &str = "INSERT INTO users (email, first_name, last_name, phone, role, confirmed, confirmation_code, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_CODE_SQL: &str = "SELECT confirmation_code FROM users WHERE email = ?1";
const CONFIRM_USER_SQL: &str =
    "UPDATE users SET confirmed = 1, confirmation_code = NULL WHERE email = ?1";
const DELETE_USER_SQL: &str = "DELETE FROM users WHERE id = ?1";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: get_id(row, 0)?,
        email: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        phone: row.get(4)?,
        role: get_enum(row, 5)?,
        confirmed: row.get(6)?,
        created_at: get_timestamp(row, 7)?,
    })
}

/// Six-digit code derived from the registration time.
fn confirmation_code(now: Timestamp) -> String {
    format!("{:06}", now.as_millisecond().rem_euclid(1_000_000))
}

impl super::Database {
    /// Creates an unconfirmed account and its confirmation code.
    pub fn register_user(&mut self, params: &Register) -> Result<User> {
        if self.find_user_by_email(&params.email)?.is_some() {
            return Err(BookingError::invalid_input("email")
                .with_reason("An account with this email already exists"));
        }
        self.insert_user(params, UserRole::Customer, false)
    }

    /// Inserts an account as-is; used by registration and fixtures.
    pub(crate) fn insert_user(
        &mut self,
        params: &Register,
        role: UserRole,
        confirmed: bool,
    ) -> Result<User> {
        let now = Timestamp::now();
        let code = (!confirmed).then(|| confirmation_code(now));
        let email = params.email.trim().to_lowercase();

        self.connection
            .execute(
                INSERT_USER_SQL,
                params![
                    email,
                    params.first_name,
                    params.last_name,
                    params.phone,
                    role.as_str(),
                    confirmed,
                    code,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert user")?;

        Ok(User {
            id: self.connection.last_insert_rowid() as u64,
            email,
            first_name: params.first_name.clone(),
            last_name: params.last_name.clone(),
            phone: params.phone.clone(),
            role,
            confirmed,
            created_at: now,
        })
    }

    pub fn get_user(&self, id: u64) -> Result<Option<User>> {
        self.connection
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id as i64],
                user_from_row,
            )
            .optional()
            .db_context("Failed to query user")
    }

    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.connection
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
                params![email.trim()],
                user_from_row,
            )
            .optional()
            .db_context("Failed to query user")
    }

    /// Pending confirmation code of an unconfirmed account.
    pub fn confirmation_code(&self, email: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_CODE_SQL, params![email.trim()], |row| row.get(0))
            .optional()
            .db_context("Failed to query confirmation code")
            .map(Option::flatten)
    }

    /// Marks the account confirmed when `code` matches.
    pub fn confirm_user(&mut self, email: &str, code: &str) -> Result<User> {
        let user = self
            .find_user_by_email(email)?
            .ok_or_else(|| BookingError::UserNotFound {
                key: email.to_string(),
            })?;
        if user.confirmed {
            return Ok(user);
        }
        match self.confirmation_code(email)? {
            Some(expected) if expected == code.trim() => {}
            _ => {
                return Err(BookingError::invalid_input("code")
                    .with_reason("Confirmation code does not match"))
            }
        }

        self.connection
            .execute(CONFIRM_USER_SQL, params![email.trim()])
            .db_context("Failed to confirm user")?;
        Ok(User {
            confirmed: true,
            ..user
        })
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .db_context("Failed to prepare query")?;
        let users = stmt
            .query_map([], user_from_row)
            .db_context("Failed to query users")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read user row")?;
        Ok(users)
    }

    pub fn delete_user(&mut self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_USER_SQL, params![id as i64])
            .db_context("Failed to delete user")?;
        if deleted == 0 {
            return Err(BookingError::UserNotFound { key: id.to_string() });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{db::Database, error::BookingError, params::Register};

    fn register() -> Register {
        Register {
            first_name: "Ngozi".into(),
            last_name: "Eze".into(),
            email: "Ngozi@Example.com".into(),
            phone: None,
            password: "correct horse".into(),
        }
    }

    #[test]
    fn test_register_and_confirm() {
        let mut db = Database::in_memory().unwrap();
        let user = db.register_user(&register()).unwrap();
        assert_eq!(user.email, "ngozi@example.com");
        assert!(!user.confirmed);

        let code = db.confirmation_code("ngozi@example.com").unwrap().unwrap();
        assert_eq!(code.len(), 6);
        assert!(db.confirm_user("ngozi@example.com", "nope").is_err());

        let confirmed = db.confirm_user("NGOZI@example.com", &code).unwrap();
        assert!(confirmed.confirmed);
        assert_eq!(db.confirmation_code("ngozi@example.com").unwrap(), None);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut db = Database::in_memory().unwrap();
        db.register_user(&register()).unwrap();
        assert!(matches!(
            db.register_user(&register()),
            Err(BookingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_delete_user() {
        let mut db = Database::in_memory().unwrap();
        let user = db.register_user(&register()).unwrap();
        db.delete_user(user.id).unwrap();
        assert!(db.list_users().unwrap().is_empty());
        assert!(db.delete_user(user.id).is_err());
    }
}

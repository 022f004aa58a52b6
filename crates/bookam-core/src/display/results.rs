//! Confirmation messages for create, update and delete operations.

use std::fmt;

use crate::models::{Booking, Bus, Route, User};

/// An entity that can be named in a confirmation message.
pub trait Resource: fmt::Display {
    /// Lowercase noun, e.g. `bus`
    const KIND: &'static str;

    fn id(&self) -> u64;
}

impl Resource for Bus {
    const KIND: &'static str = "bus";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Route {
    const KIND: &'static str = "route";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Booking {
    const KIND: &'static str = "booking";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for User {
    const KIND: &'static str = "user";

    fn id(&self) -> u64 {
        self.id
    }
}

/// The outcome of a create call.
///
/// ```rust
/// use bookam_core::{display::CreateResult, models::{Bus, BusType}};
/// use jiff::Timestamp;
///
/// let bus = Bus {
///     id: 3,
///     name: "Peace Mass 12".to_string(),
///     plate_number: "LAG-123-XY".to_string(),
///     bus_type: BusType::Standard,
///     capacity: 18,
///     amenities: vec![],
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
/// let output = CreateResult::new(bus).to_string();
/// assert!(output.starts_with("Created bus with ID: 3"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// The outcome of an update call, listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

pub struct DeleteResult {
    pub id: u64,
    pub kind: &'static str,
}

impl DeleteResult {
    pub fn new(id: u64, kind: &'static str) -> Self {
        Self { id, kind }
    }

    pub fn of<T: Resource>(resource: &T) -> Self {
        Self::new(resource.id(), T::KIND)
    }
}

impl fmt::Display for DeleteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Deleted {} with ID: {}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::UserRole;

    fn user() -> User {
        User {
            id: 7,
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            phone: None,
            role: UserRole::Customer,
            confirmed: false,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_update_lists_changes() {
        let output =
            UpdateResult::with_changes(user(), vec!["Role set to admin".into()]).to_string();
        assert!(output.starts_with("Updated user with ID: 7"));
        assert!(output.contains("- Role set to admin"));
        assert!(output.contains("awaiting confirmation"));
    }

    #[test]
    fn test_delete_message() {
        assert_eq!(DeleteResult::of(&user()).to_string(), "Deleted user with ID: 7\n");
        assert_eq!(DeleteResult::new(2, "route").to_string(), "Deleted route with ID: 2\n");
    }
}

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;

use crate::models::{Page, User, UserFilter};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Unique constraint hit; `diagnostic` is the raw multi-line driver message.
    #[error("{diagnostic}")]
    UniqueViolation { diagnostic: String },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub trait UserStore: Send + Sync {
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Inserts or replaces the user with the same id.
    fn save(&self, user: User) -> Result<User, StoreError>;

    fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    /// Matching users ordered by creation time.
    fn find_all(
        &self,
        filter: &UserFilter,
        page: usize,
        size: usize,
    ) -> Result<Page<User>, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    rows: DashMap<Uuid, User>,
    emails: DashMap<String, Uuid>,
    phones: DashMap<String, Uuid>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn unique_violation(constraint: &str, column: &str, value: &str) -> StoreError {
    StoreError::UniqueViolation {
        diagnostic: format!(
            "ERROR: duplicate key value violates unique constraint \"{constraint}\"\n  \
             Detail: Key ({column})=({value}) already exists."
        ),
    }
}

// Claim `key` in a unique index for `id`. Returns true if this call took it.
fn claim(index: &DashMap<String, Uuid>, key: &str, id: Uuid) -> Result<bool, ()> {
    match index.entry(key.to_owned()) {
        Entry::Occupied(owner) if *owner.get() == id => Ok(false),
        Entry::Occupied(_) => Err(()),
        Entry::Vacant(slot) => {
            slot.insert(id);
            Ok(true)
        }
    }
}

fn release(index: &DashMap<String, Uuid>, key: &str, id: Uuid) {
    index.remove_if(key, |_, owner| *owner == id);
}

impl UserStore for InMemoryUserStore {
    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.emails.contains_key(email))
    }

    fn save(&self, user: User) -> Result<User, StoreError> {
        let id = user.id;

        let email_claimed = claim(&self.emails, &user.email, id)
            .map_err(|_| unique_violation("users_email_key", "email", &user.email))?;
        let phone_claimed = match claim(&self.phones, &user.phone_number, id) {
            Ok(claimed) => claimed,
            Err(()) => {
                if email_claimed {
                    release(&self.emails, &user.email, id);
                }
                return Err(unique_violation(
                    "users_phone_number_key",
                    "phone_number",
                    &user.phone_number,
                ));
            }
        };

        let previous = self.rows.insert(id, user.clone());

        // free the keys the previous version held
        if let Some(previous) = previous {
            if email_claimed && previous.email != user.email {
                release(&self.emails, &previous.email, id);
            }
            if phone_claimed && previous.phone_number != user.phone_number {
                release(&self.phones, &previous.phone_number, id);
            }
        }

        Ok(user)
    }

    fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        if let Some((_, user)) = self.rows.remove(&id) {
            release(&self.emails, &user.email, id);
            release(&self.phones, &user.phone_number, id);
        }
        Ok(())
    }

    fn find_all(
        &self,
        filter: &UserFilter,
        page: usize,
        size: usize,
    ) -> Result<Page<User>, StoreError> {
        let mut matching: Vec<User> = self
            .rows
            .iter()
            .filter(|row| filter.matches(row.value()))
            .map(|row| row.value().clone())
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect();

        Ok(Page {
            items,
            page,
            size,
            total,
        })
    }
}

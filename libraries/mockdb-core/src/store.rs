//! In-memory user record store
//!
//! Owns the ordered collection of [`UserRecord`]s and the id counter.
//! Lookups are linear scans; the dataset is fixture sized.
//!
//! The store is synchronous. Hosts that share it across threads must put it
//! behind a single lock so mutations are serialized.

use crate::error::{Result, StoreError};
use crate::types::{
    IdQuery, InsertedUser, RecordId, RemovedUser, UpdatedUser, UserPayload, UserRecord,
    PERMITTED_FIELDS,
};
use chrono::Utc;

/// Records restored by [`UserStore::reset`]: id, first name, last name, role
const SEED_USERS: [(i64, &str, &str, &str); 4] = [
    (1, "Frodo", "Baggins", "admin"),
    (2, "Sam", "Gamgee", "member"),
    (3, "Merriadoc", "Brandybuck", "guest"),
    (4, "Peregrine", "Took", "guest"),
];

/// Text columns a payload may set
#[derive(Debug)]
struct Patch {
    first_name: Option<Option<String>>,
    last_name: Option<Option<String>>,
    role: Option<Option<String>>,
}

impl Patch {
    /// Extract the writable columns; `id` and `createdAt` are ignored
    fn from_payload(candidate: &UserPayload) -> Result<Self> {
        Ok(Self {
            first_name: candidate.text("firstName")?,
            last_name: candidate.text("lastName")?,
            role: candidate.text("role")?,
        })
    }

    fn apply(self, record: &UserRecord) -> UserRecord {
        UserRecord {
            id: record.id,
            first_name: self.first_name.unwrap_or_else(|| record.first_name.clone()),
            last_name: self.last_name.unwrap_or_else(|| record.last_name.clone()),
            role: self.role.unwrap_or_else(|| record.role.clone()),
            created_at: record.created_at.clone(),
        }
    }
}

/// Authoritative in-memory collection of user records
#[derive(Debug, Clone)]
pub struct UserStore {
    records: Vec<UserRecord>,
    next_id: i64,
    /// Captured once so seed records keep their timestamp across resets
    seed_created_at: String,
}

impl UserStore {
    /// Create a store populated with the seed records
    pub fn new() -> Self {
        let mut store = Self::empty();
        store.reset();
        store
    }

    /// Create a store with no records; the first add gets id 1
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            seed_created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Discard every record and restore the seed set
    ///
    /// The id counter restarts one past the highest seed id.
    pub fn reset(&mut self) {
        self.records = SEED_USERS
            .iter()
            .map(|&(id, first_name, last_name, role)| {
                UserRecord::new(
                    RecordId::new(id),
                    Some(first_name.to_string()),
                    Some(last_name.to_string()),
                    Some(role.to_string()),
                    self.seed_created_at.clone(),
                )
            })
            .collect();
        self.next_id = SEED_USERS.iter().map(|&(id, ..)| id).max().unwrap_or(0) + 1;

        tracing::debug!("Store reset to {} seed records", self.records.len());
    }

    /// Whether every field name on `candidate` is a permitted column
    ///
    /// Only keys are checked. Values and missing columns are not.
    pub fn validate_shape(candidate: &UserPayload) -> bool {
        Self::unknown_field(candidate).is_none()
    }

    fn unknown_field(candidate: &UserPayload) -> Option<&str> {
        candidate.keys().find(|key| !PERMITTED_FIELDS.contains(key))
    }

    fn check_shape(candidate: &UserPayload) -> Result<()> {
        match Self::unknown_field(candidate) {
            Some(field) => {
                tracing::warn!("Rejected payload with unknown column '{}'", field);
                Err(StoreError::unknown_field(field))
            }
            None => Ok(()),
        }
    }

    /// Append a new record built from `candidate`
    ///
    /// The store assigns `id` and `createdAt`; values for them in the
    /// payload are ignored.
    pub fn add(&mut self, candidate: UserPayload) -> Result<InsertedUser> {
        Self::check_shape(&candidate)?;
        let patch = Patch::from_payload(&candidate)?;

        let id = RecordId::new(self.next_id);
        self.next_id += 1;

        let record = UserRecord::new(
            id,
            patch.first_name.flatten(),
            patch.last_name.flatten(),
            patch.role.flatten(),
            Utc::now().to_rfc3339(),
        );
        self.records.push(record.clone());

        tracing::debug!("Added user {}", id);

        Ok(InsertedUser {
            inserted_user: record,
            success: true,
        })
    }

    /// Merge `candidate` into the record matching `id`
    ///
    /// Payload columns win over stored ones. `id` and `createdAt` never change.
    pub fn update(&mut self, id: impl Into<IdQuery>, candidate: UserPayload) -> Result<UpdatedUser> {
        let query = id.into();
        Self::check_shape(&candidate)?;
        let patch = Patch::from_payload(&candidate)?;

        let Some(index) = self.position(&query) else {
            tracing::warn!("Update of missing user {}", query);
            return Err(StoreError::not_found(query.to_string()));
        };

        let updated = patch.apply(&self.records[index]);
        self.records[index] = updated.clone();

        tracing::debug!("Updated user {}", updated.id);

        Ok(UpdatedUser {
            updated_row: updated,
            success: true,
        })
    }

    /// Look up one record; `None` when nothing matches
    pub fn get_one(&self, id: impl Into<IdQuery>) -> Option<UserRecord> {
        let query = id.into();
        self.position(&query).map(|index| self.records[index].clone())
    }

    /// Snapshot of every record in insertion order
    pub fn get_all(&self) -> Vec<UserRecord> {
        self.records.clone()
    }

    /// Borrow the records without cloning
    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    /// Drop the record matching `id`
    pub fn remove(&mut self, id: impl Into<IdQuery>) -> Result<RemovedUser> {
        let query = id.into();

        let Some(index) = self.position(&query) else {
            tracing::warn!("Removal of missing user {}", query);
            return Err(StoreError::not_found(query.to_string()));
        };

        let removed = self.records.remove(index);

        tracing::debug!("Removed user {}", removed.id);

        Ok(RemovedUser {
            removed_row_id: removed.id,
            success: true,
        })
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next add will assign
    pub fn next_id(&self) -> RecordId {
        RecordId::new(self.next_id)
    }

    fn position(&self, query: &IdQuery) -> Option<usize> {
        let id = query.resolve()?;
        self.records.iter().position(|record| record.id == id)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn payload(value: Value) -> UserPayload {
        UserPayload::from_value(value).unwrap()
    }

    #[test]
    fn test_new_store_is_seeded() {
        let store = UserStore::new();

        assert_eq!(store.len(), 4);
        assert_eq!(store.next_id(), RecordId::new(5));
        let names: Vec<_> = store
            .records()
            .iter()
            .map(|r| r.first_name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["Frodo", "Sam", "Merriadoc", "Peregrine"]);
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        let mut store = UserStore::empty();
        assert!(store.is_empty());

        let inserted = store.add(payload(json!({"firstName": "A"}))).unwrap();
        assert_eq!(inserted.inserted_user.id, RecordId::new(1));
    }

    #[test]
    fn test_validate_shape_checks_keys_only() {
        assert!(UserStore::validate_shape(&UserPayload::new()));
        assert!(UserStore::validate_shape(&payload(json!({
            "id": "whatever",
            "firstName": 1,
            "lastName": null,
            "role": [],
            "createdAt": {},
        }))));
        assert!(!UserStore::validate_shape(&payload(json!({"email": "x"}))));
        assert!(!UserStore::validate_shape(&payload(json!({"first_name": "x"}))));
    }

    #[test]
    fn test_add_without_names_is_accepted() {
        let mut store = UserStore::new();

        let inserted = store.add(UserPayload::new()).unwrap();

        assert!(inserted.success);
        assert_eq!(inserted.inserted_user.first_name, None);
        assert_eq!(inserted.inserted_user.last_name, None);
        assert_eq!(inserted.inserted_user.role, None);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_add_ignores_client_identity() {
        let mut store = UserStore::new();

        let inserted = store
            .add(payload(json!({
                "id": 1,
                "firstName": "Bilbo",
                "lastName": "Baggins",
                "createdAt": "long ago",
            })))
            .unwrap();

        assert_eq!(inserted.inserted_user.id, RecordId::new(5));
        assert_ne!(inserted.inserted_user.created_at, "long ago");
        assert_eq!(
            store.get_one(RecordId::new(1)).unwrap().first_name.as_deref(),
            Some("Frodo")
        );
    }

    #[test]
    fn test_add_rejects_non_text_name() {
        let mut store = UserStore::new();

        let err = store
            .add(payload(json!({"firstName": 5, "lastName": "Y"})))
            .unwrap_err();

        assert_eq!(err, StoreError::invalid_value("firstName"));
        assert_eq!(store.len(), 4);
        assert_eq!(store.next_id(), RecordId::new(5));
    }

    #[test]
    fn test_failed_add_does_not_consume_id() {
        let mut store = UserStore::new();

        store.add(payload(json!({"extra": true}))).unwrap_err();
        let inserted = store.add(payload(json!({"firstName": "X"}))).unwrap();

        assert_eq!(inserted.inserted_user.id, RecordId::new(5));
    }

    #[test]
    fn test_update_null_clears_role() {
        let mut store = UserStore::new();

        let updated = store.update("2", payload(json!({"role": null}))).unwrap();

        assert_eq!(updated.updated_row.role, None);
        assert_eq!(updated.updated_row.first_name.as_deref(), Some("Sam"));
    }

    #[test]
    fn test_update_keeps_identity() {
        let mut store = UserStore::new();
        let before = store.get_one(RecordId::new(3)).unwrap();

        let updated = store
            .update(
                RecordId::new(3),
                payload(json!({"id": 77, "createdAt": "yesterday", "lastName": "B"})),
            )
            .unwrap();

        assert_eq!(updated.updated_row.id, before.id);
        assert_eq!(updated.updated_row.created_at, before.created_at);
        assert_eq!(updated.updated_row.last_name.as_deref(), Some("B"));
        assert!(store.get_one(RecordId::new(77)).is_none());
    }

    #[test]
    fn test_update_shape_checked_before_lookup() {
        let mut store = UserStore::new();

        let err = store
            .update(RecordId::new(9999), payload(json!({"nickname": "Q"})))
            .unwrap_err();

        assert_eq!(err.name(), "InvalidShapeError");
    }

    #[test]
    fn test_unparsable_id_is_not_found() {
        let mut store = UserStore::new();

        assert!(store.get_one("abc").is_none());
        assert_eq!(
            store.remove("abc").unwrap_err(),
            StoreError::not_found("abc")
        );
        assert_eq!(
            store
                .update("abc", payload(json!({"role": "x"})))
                .unwrap_err(),
            StoreError::not_found("abc")
        );
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut store = UserStore::new();

        store.add(payload(json!({"firstName": "A"}))).unwrap();
        store.remove(RecordId::new(5)).unwrap();
        let inserted = store.add(payload(json!({"firstName": "B"}))).unwrap();

        assert_eq!(inserted.inserted_user.id, RecordId::new(6));
    }

    #[test]
    fn test_reset_restores_seed_and_counter() {
        let mut store = UserStore::new();
        let seeded = store.get_all();

        store.add(payload(json!({"firstName": "A"}))).unwrap();
        store.update(RecordId::new(1), payload(json!({"role": "member"}))).unwrap();
        store.remove(RecordId::new(2)).unwrap();
        store.reset();

        assert_eq!(store.get_all(), seeded);
        assert_eq!(store.next_id(), RecordId::new(5));
    }
}

//! MockDB Core
//!
//! In-memory user record store backing the MockDB prototyping server.
//!
//! This crate has no I/O and no async runtime. It defines:
//! - **Domain Types**: `UserRecord`, `RecordId`, `UserPayload`
//! - **Record Store**: `UserStore`, the sole owner of all records
//! - **Error Handling**: `StoreError` and the `Result` alias
//!
//! # Example
//!
//! ```rust
//! use mockdb_core::{UserPayload, UserStore};
//! use serde_json::json;
//!
//! let mut store = UserStore::new();
//! assert_eq!(store.len(), 4);
//!
//! let payload = UserPayload::from_value(json!({
//!     "firstName": "Bilbo",
//!     "lastName": "Baggins",
//! }))
//! .unwrap();
//! let inserted = store.add(payload).unwrap();
//! assert_eq!(inserted.inserted_user.id.get(), 5);
//!
//! // Ids coming from URL paths match their numeric counterparts
//! assert!(store.get_one("5").is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use store::UserStore;
pub use types::{
    IdQuery, InsertedUser, RecordId, RemovedUser, UpdatedUser, UserPayload, UserRecord,
    PERMITTED_FIELDS,
};

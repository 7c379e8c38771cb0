use crate::{error::StoreError, record::Record};

///
/// EntityStore
///
/// The external persistence collaborator. Creation assigns identity; the
/// engine consumes this contract and never reaches past it. Calls are
/// synchronous and fallible; retries, timeouts, and transport belong to the
/// implementor, and a rejection is re-thrown to the UI layer unchanged.
///

pub trait EntityStore<E: Record> {
    /// Persist a new entity and return it with its assigned id.
    fn create(&mut self, draft: E::Draft) -> Result<E, StoreError>;

    /// Overwrite an existing entity's attributes.
    fn update(&mut self, id: &E::Id, draft: E::Draft) -> Result<E, StoreError>;

    /// Remove an entity. `Ok(true)` means the entity is gone; `Ok(false)`
    /// means the backend acknowledged the call without removing anything.
    fn delete(&mut self, id: &E::Id) -> Result<bool, StoreError>;

    /// Fetch the full collection.
    fn list(&self) -> Result<Vec<E>, StoreError>;
}

//! Shared fixtures for engine and composer tests: a representative managed
//! row plus an in-memory collaborator with per-id fault injection.

use crate::{
    error::StoreError,
    record::{GroupRef, Record},
    store::EntityStore,
    value::FieldValue,
};
use std::collections::BTreeSet;

///
/// AppRow
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct AppRow {
    pub id: u64,
    pub name: String,
    pub url: Option<String>,
    pub category: Option<i64>,
}

impl AppRow {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            url: None,
            category: None,
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_category(mut self, category: i64) -> Self {
        self.category = Some(category);
        self
    }
}

///
/// AppDraft
///

#[derive(Clone, Debug)]
pub(crate) struct AppDraft {
    pub name: String,
    pub url: Option<String>,
    pub category: Option<i64>,
}

impl Record for AppRow {
    type Id = u64;
    type Draft = AppDraft;

    fn id(&self) -> u64 {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn url_slug(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn group_ref(&self) -> Option<GroupRef> {
        self.category.map(GroupRef)
    }

    fn field(&self, key: &str) -> Option<FieldValue> {
        match key {
            "name" => Some(FieldValue::Text(self.name.clone())),
            "id" => Some(FieldValue::Int(i64::try_from(self.id).unwrap_or(i64::MAX))),
            "category" => self.category.map(FieldValue::Int),
            _ => None,
        }
    }

    fn duplicate_draft(&self, name: String, url_slug: Option<String>) -> AppDraft {
        AppDraft {
            name,
            url: url_slug,
            category: self.category,
        }
    }
}

///
/// MemStore
///
/// In-memory collaborator. `fail_delete` rejects specific ids;
/// `fail_create_after` rejects every create once the cap is reached.
///

#[derive(Debug, Default)]
pub(crate) struct MemStore {
    pub rows: Vec<AppRow>,
    pub next_id: u64,
    pub fail_delete: BTreeSet<u64>,
    pub fail_create_after: Option<usize>,
    pub creates: usize,
}

impl MemStore {
    pub fn seeded(rows: Vec<AppRow>) -> Self {
        let next_id = rows.iter().map(|row| row.id).max().unwrap_or(0) + 1;

        Self {
            rows,
            next_id,
            ..Self::default()
        }
    }
}

impl EntityStore<AppRow> for MemStore {
    fn create(&mut self, draft: AppDraft) -> Result<AppRow, StoreError> {
        if self
            .fail_create_after
            .is_some_and(|cap| self.creates >= cap)
        {
            return Err(StoreError::backend("create rejected by fault injection"));
        }
        self.creates += 1;

        let row = AppRow {
            id: self.next_id,
            name: draft.name,
            url: draft.url,
            category: draft.category,
        };
        self.next_id += 1;
        self.rows.push(row.clone());

        Ok(row)
    }

    fn update(&mut self, id: &u64, draft: AppDraft) -> Result<AppRow, StoreError> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == *id)
            .ok_or_else(|| StoreError::not_found(id.to_string()))?;

        row.name = draft.name;
        row.url = draft.url;
        row.category = draft.category;

        Ok(row.clone())
    }

    fn delete(&mut self, id: &u64) -> Result<bool, StoreError> {
        if self.fail_delete.contains(id) {
            return Err(StoreError::backend(format!("delete rejected for id {id}")));
        }

        let before = self.rows.len();
        self.rows.retain(|row| row.id != *id);

        Ok(self.rows.len() != before)
    }

    fn list(&self) -> Result<Vec<AppRow>, StoreError> {
        Ok(self.rows.clone())
    }
}

use crate::{
    direction::Direction,
    error::{BatchError, BatchOutcome, StoreError, ViewError},
    group::{self, ExpandedGroups, GroupedRows},
    obs::{self, ViewEvent},
    page,
    record::Record,
    select::SelectionSet,
    sort::{ComparatorRegistry, SortBinding, SortConfig, sort_records},
    state::StateStore,
    store::EntityStore,
    unique::{SuffixPolicy, UniqueScope, unique_name, unique_url},
};
use std::{cmp::Ordering, slice};

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Grouping resolver: row -> display label. `None` lands the row in the
/// empty-label bucket.
pub type GroupResolver<E> = Box<dyn Fn(&E) -> Option<String>>;

///
/// ViewConfig
///
/// Construction-time configuration for one collection view.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ViewConfig {
    /// Prefix for this logical view's persisted state keys
    /// (`"{prefix}.sort"`, `"{prefix}.groups"`, `"{prefix}.page"`).
    pub state_prefix: String,
    pub default_sort: SortConfig,
    pub page_size: u32,
    pub suffixes: SuffixPolicy,
}

impl ViewConfig {
    #[must_use]
    pub fn new(state_prefix: impl Into<String>) -> Self {
        Self {
            state_prefix: state_prefix.into(),
            default_sort: SortConfig::unsorted(),
            page_size: DEFAULT_PAGE_SIZE,
            suffixes: SuffixPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_default_sort(mut self, default_sort: SortConfig) -> Self {
        self.default_sort = default_sort;
        self
    }

    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_suffixes(mut self, suffixes: SuffixPolicy) -> Self {
        self.suffixes = suffixes;
        self
    }
}

///
/// ViewPage
///
/// Materialized page the UI consumes: row references in display order plus
/// page bookkeeping.
///

#[derive(Debug)]
pub struct ViewPage<'a, E> {
    pub rows: Vec<&'a E>,
    pub page: u32,
    pub page_count: u32,
    pub total_rows: usize,
}

///
/// Duplicated
///
/// Result of a single duplication: the created entity plus its 1-based
/// position in the freshly recomputed view ordering. Display-only; `None`
/// when the new row's group is currently collapsed.
///

#[derive(Debug)]
pub struct Duplicated<E> {
    pub entity: E,
    pub position: Option<u32>,
}

///
/// CollectionView
///
/// Per-entity-type composer over sort + grouping + selection + pagination.
/// Owns the raw rows and every piece of view state for its lifetime; the
/// entities themselves belong to the persistence collaborator. Constructed
/// explicitly and passed by reference — no ambient context.
///

pub struct CollectionView<E: Record, S: EntityStore<E>, K: StateStore> {
    store: S,
    state: K,
    config: ViewConfig,
    items: Vec<E>,
    sort: SortBinding,
    comparators: ComparatorRegistry<E>,
    selection: SelectionSet<E::Id>,
    expanded: ExpandedGroups,
    grouping: Option<GroupResolver<E>>,
    page: u32,
}

impl<E, S, K> CollectionView<E, S, K>
where
    E: Record,
    S: EntityStore<E>,
    K: StateStore,
{
    /// Build a view and restore its persisted sort/expansion/page state.
    /// Missing state falls back to the configured defaults.
    pub fn new(store: S, state: K, config: ViewConfig) -> Self {
        let sort = SortBinding::restore(
            &state,
            format!("{}.sort", config.state_prefix),
            config.default_sort.clone(),
        );
        let expanded = state
            .load(&format!("{}.groups", config.state_prefix))
            .unwrap_or_default();
        let page = state
            .load(&format!("{}.page", config.state_prefix))
            .unwrap_or(1);

        Self {
            store,
            state,
            config,
            items: Vec::new(),
            sort,
            comparators: ComparatorRegistry::new(),
            selection: SelectionSet::default(),
            expanded,
            grouping: None,
            page,
        }
    }

    /// Install a grouping resolver (e.g. category id -> category name).
    #[must_use]
    pub fn with_grouping(mut self, resolver: impl Fn(&E) -> Option<String> + 'static) -> Self {
        self.grouping = Some(Box::new(resolver));
        self
    }

    /// Register a custom comparator for one sort key. The comparator owns
    /// direction handling.
    #[must_use]
    pub fn with_comparator(
        mut self,
        key: impl Into<String>,
        comparator: impl Fn(&E, &E, Direction) -> Ordering + 'static,
    ) -> Self {
        self.comparators.register(key, comparator);
        self
    }

    ///
    /// ACCESSORS
    ///

    #[must_use]
    pub fn items(&self) -> &[E] {
        &self.items
    }

    #[must_use]
    pub const fn sort_config(&self) -> &SortConfig {
        self.sort.config()
    }

    #[must_use]
    pub const fn selected(&self) -> &SelectionSet<E::Id> {
        &self.selection
    }

    #[must_use]
    pub const fn expanded(&self) -> &ExpandedGroups {
        &self.expanded
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.config.page_size
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    ///
    /// VIEW STATE
    ///

    /// Reload rows from the collaborator, re-sort, and re-validate page
    /// bounds. The selection is deliberately left untouched.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        self.items = self.store.list()?;
        self.resort();
        self.snap_page_bounds();

        Ok(())
    }

    /// Cycle the sort for `key`, persist it, and re-sort in place.
    pub fn handle_sort(&mut self, key: &str) {
        self.sort.handle_sort(&self.state, key);
        self.resort();
        obs::record(ViewEvent::SortApplied);
    }

    /// Materialize the current page.
    pub fn current_view(&mut self) -> ViewPage<'_, E> {
        self.snap_page_bounds();

        let order = self.ordered_rows();
        let range = page::page_slice(order.len(), self.page, self.config.page_size);
        let page_count = page::page_count(order.len(), self.config.page_size);
        let total_rows = order.len();

        ViewPage {
            rows: order[range].iter().map(|&row| &self.items[row]).collect(),
            page: self.page,
            page_count,
            total_rows,
        }
    }

    /// Grouping buckets for the current rows; empty when ungrouped.
    #[must_use]
    pub fn groups(&self) -> Vec<GroupedRows> {
        match &self.grouping {
            Some(resolver) => group::group_records(&self.items, |row| resolver(row)),
            None => Vec::new(),
        }
    }

    pub fn toggle_selection(&mut self, ids: &[E::Id], force: Option<bool>) {
        self.selection.toggle(ids, force);
    }

    pub fn toggle_one(&mut self, id: E::Id) {
        self.selection.toggle_one(id);
    }

    /// Select-all/none over the flattened visible sequence.
    pub fn select_all_visible(&mut self) {
        let ids: Vec<E::Id> = self
            .ordered_rows()
            .into_iter()
            .map(|row| self.items[row].id())
            .collect();

        self.selection.toggle(&ids, None);
    }

    /// Toggle expansion for one label, persist, and re-validate page bounds.
    pub fn toggle_group(&mut self, label: &str) {
        self.expanded.toggle(label);
        self.state
            .save(&self.state_key("groups"), &self.expanded);
        self.snap_page_bounds();
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.persist_page();
        self.snap_page_bounds();
    }

    /// Change the page size. The page number is not recomputed "fairly";
    /// bounds are simply re-validated afterwards.
    pub fn set_page_size(&mut self, page_size: u32) {
        self.config.page_size = page_size;
        self.snap_page_bounds();
    }

    ///
    /// MUTATIONS
    ///

    /// Overwrite one entity through the collaborator and reload the view.
    pub fn update_one(&mut self, id: &E::Id, draft: E::Draft) -> Result<E, ViewError> {
        let updated = self.store.update(id, draft)?;
        self.refresh()?;

        Ok(updated)
    }

    /// Duplicate one row: fresh unique name, stripped-and-regenerated unique
    /// slug, create through the collaborator, then locate the new row in the
    /// freshly recomputed ordering.
    pub fn duplicate_one(&mut self, id: &E::Id) -> Result<Duplicated<E>, ViewError> {
        let draft = {
            let mut names = self.name_scope();
            let mut urls = self.url_scope();

            self.duplicate_draft_for(id, &mut names, &mut urls)
                .ok_or_else(|| ViewError::UnknownId {
                    id: format!("{id:?}"),
                })?
        };

        let created = self.store.create(draft)?;
        self.refresh()?;
        obs::record(ViewEvent::RowsDuplicated { count: 1 });

        let created_id = created.id();
        let position = self
            .ordered_rows()
            .iter()
            .position(|&row| self.items[row].id() == created_id)
            .and_then(|index| u32::try_from(index + 1).ok());

        Ok(Duplicated {
            entity: created,
            position,
        })
    }

    /// Duplicate a batch sequentially. Uniqueness for each row also avoids
    /// names and slugs reserved earlier in the same batch. The loop halts on
    /// the first collaborator failure; rows already created stay created,
    /// reported through [`BatchError::created`]. Stale ids are skipped
    /// silently.
    pub fn duplicate_many(&mut self, ids: &[E::Id]) -> Result<Vec<E>, BatchError<E>> {
        let mut names = self.name_scope();
        let mut urls = self.url_scope();
        let mut created = Vec::new();

        for id in ids {
            let Some(draft) = self.duplicate_draft_for(id, &mut names, &mut urls) else {
                continue;
            };

            match self.store.create(draft) {
                Ok(entity) => created.push(entity),
                Err(source) => {
                    // Best-effort reload so the view reflects the rows that
                    // did land before the halt.
                    let _ = self.refresh();

                    return Err(BatchError {
                        created,
                        failed_id: Some(id.clone()),
                        source,
                    });
                }
            }
        }

        let count = u64::try_from(created.len()).unwrap_or(u64::MAX);
        match self.refresh() {
            Ok(()) => {
                obs::record(ViewEvent::RowsDuplicated { count });

                Ok(created)
            }
            Err(source) => Err(BatchError {
                created,
                failed_id: None,
                source,
            }),
        }
    }

    /// Delete a batch sequentially, continuing past failures. Each deleted id
    /// is removed from the rows and the selection immediately; failures are
    /// surfaced once, in the returned outcome.
    pub fn delete_many(&mut self, ids: &[E::Id]) -> BatchOutcome<E::Id> {
        let mut outcome = BatchOutcome::new();

        for id in ids {
            match self.store.delete(id) {
                Ok(true) => {
                    self.items.retain(|row| row.id() != *id);
                    self.selection.toggle(slice::from_ref(id), Some(false));
                    outcome.deleted.push(id.clone());
                }
                // A falsy ack means the row is still there; report it rather
                // than pretending it was removed.
                Ok(false) => outcome
                    .failures
                    .push((id.clone(), StoreError::not_found(format!("{id:?}")))),
                Err(source) => {
                    obs::record(ViewEvent::DeleteFailed);
                    outcome.failures.push((id.clone(), source));
                }
            }
        }

        obs::record(ViewEvent::RowsDeleted {
            count: u64::try_from(outcome.deleted.len()).unwrap_or(u64::MAX),
        });
        self.snap_page_bounds();

        outcome
    }

    ///
    /// INTERNAL
    ///

    fn state_key(&self, leaf: &str) -> String {
        format!("{}.{leaf}", self.config.state_prefix)
    }

    fn resort(&mut self) {
        sort_records(&mut self.items, self.sort.config(), &self.comparators);
    }

    /// Row indexes in display order: grouped views flatten expanded buckets,
    /// ungrouped views use the sorted order directly.
    fn ordered_rows(&self) -> Vec<usize> {
        match &self.grouping {
            Some(resolver) => group::visible_rows(
                &group::group_records(&self.items, |row| resolver(row)),
                &self.expanded,
            ),
            None => (0..self.items.len()).collect(),
        }
    }

    fn persist_page(&self) {
        self.state.save(&self.state_key("page"), &self.page);
    }

    /// Snap an out-of-range page back to page 1.
    fn snap_page_bounds(&mut self) {
        let total = self.ordered_rows().len();
        if self.page > page::page_count(total, self.config.page_size) {
            self.page = 1;
            self.persist_page();
            obs::record(ViewEvent::PageSnapped);
        }
    }

    fn name_scope(&self) -> UniqueScope {
        UniqueScope::of(self.items.iter().map(|row| row.display_name().to_string()))
    }

    fn url_scope(&self) -> UniqueScope {
        UniqueScope::of(
            self.items
                .iter()
                .filter_map(|row| row.url_slug().map(str::to_string)),
        )
    }

    /// Build the create payload for one duplicate, reserving its name and
    /// slug in the batch scopes.
    fn duplicate_draft_for(
        &self,
        id: &E::Id,
        names: &mut UniqueScope,
        urls: &mut UniqueScope,
    ) -> Option<E::Draft> {
        let source = self.items.iter().find(|row| row.id() == *id)?;

        let name = unique_name(source.display_name(), names, &self.config.suffixes);
        names.reserve(name.clone());

        let url = source.url_slug().map(|slug| {
            let url = unique_url(slug, urls, &self.config.suffixes);
            urls.reserve(url.clone());
            url
        });

        Some(source.duplicate_draft(name, url))
    }
}

///
/// TESTS
///

use std::collections::HashSet;

use contracts::domain::ResourceDef;
use contracts::shared::api::{list_url, search_url, ListPage, ListQuery};
use contracts::shared::error::ApiError;
use contracts::shared::pagination::PaginationState;
use contracts::shared::table::{record_id, Record};
use leptos::prelude::*;

use crate::config::DEFAULT_LIMIT;

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceListState {
    pub records: Vec<Record>,
    pub pagination: PaginationState,
    pub search_term: String,
    /// Empty means "any field" and uses the search endpoint.
    pub search_field: String,
    pub category: String,
    pub is_loading: bool,
    pub is_loaded: bool,
    pub error: Option<String>,
    /// Last list fetch came back 403.
    pub forbidden: bool,
    pub selected: HashSet<String>,
}

impl ResourceListState {
    pub fn new(resource: &ResourceDef) -> Self {
        Self {
            records: Vec::new(),
            pagination: PaginationState::with_limit(DEFAULT_LIMIT),
            search_term: String::new(),
            search_field: resource
                .search_fields
                .first()
                .map(|f| f.to_string())
                .unwrap_or_default(),
            category: String::new(),
            is_loading: false,
            is_loaded: false,
            error: None,
            forbidden: false,
            selected: HashSet::new(),
        }
    }

    /// The any-field search endpoint takes no page or limit, so paging is
    /// off while it is in use.
    pub fn is_paged(&self) -> bool {
        !self.search_field.is_empty() || self.search_term.trim().is_empty()
    }

    pub fn list_path(&self, endpoint: &str) -> String {
        let term = self.search_term.trim();
        if !self.is_paged() {
            return search_url(endpoint, term);
        }
        let query = ListQuery::new(self.pagination.current_page, self.pagination.limit)
            .with_search(term, &self.search_field)
            .with_category(&self.category);
        list_url(endpoint, &query)
    }

    pub fn begin_load(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Writes a list response into the page. Returns `true` when the server
    /// now reports fewer pages than the one requested, so the clamped page
    /// has to be fetched.
    pub fn apply_result(&mut self, result: Result<ListPage, ApiError>) -> bool {
        self.is_loading = false;
        self.is_loaded = true;
        match result {
            Ok(page) => {
                let requested = self.pagination.current_page;
                self.forbidden = false;
                self.pagination.apply(&page.meta, page.records.len());
                self.records = page.records;
                let ids: HashSet<String> = self.records.iter().filter_map(record_id).collect();
                self.selected.retain(|id| ids.contains(id));
                self.pagination.current_page != requested
            }
            Err(ApiError::Forbidden) => {
                self.forbidden = true;
                self.records.clear();
                self.selected.clear();
                false
            }
            Err(e) if e.is_silent() => false,
            Err(e) => {
                self.error = Some(e.user_message());
                self.records.clear();
                self.selected.clear();
                false
            }
        }
    }

    pub fn id_at(&self, index: usize) -> Option<String> {
        self.records.get(index).and_then(record_id)
    }

    /// Drops a row the backend has confirmed deleted.
    pub fn remove_record(&mut self, id: &str) {
        let before = self.records.len();
        self.records
            .retain(|r| record_id(r).as_deref() != Some(id));
        if self.records.len() < before {
            self.pagination.total_items = self.pagination.total_items.saturating_sub(1);
        }
        self.selected.remove(id);
    }

    pub fn set_selected(&mut self, id: String, checked: bool) {
        if checked {
            self.selected.insert(id);
        } else {
            self.selected.remove(&id);
        }
    }

    pub fn select_all(&mut self, checked: bool) {
        if checked {
            self.selected = self.records.iter().filter_map(record_id).collect();
        } else {
            self.selected.clear();
        }
    }

    /// Checked rows in table order.
    pub fn selected_records(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| record_id(r).is_some_and(|id| self.selected.contains(&id)))
            .cloned()
            .collect()
    }
}

pub fn create_state(resource: &ResourceDef) -> RwSignal<ResourceListState> {
    RwSignal::new(ResourceListState::new(resource))
}

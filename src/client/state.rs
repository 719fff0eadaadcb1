//! Search screen state, updated only through [`SearchState::apply`].

use serde::{Deserialize, Serialize};

use crate::api::jobs::dto::total_pages;
use crate::api::jobs::{Job, JobResponse, JobSearchParams, RawSearchQuery};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub was: String,
    pub wo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterField {
    Keyword,
    Location,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStatus {
    Idle,
    /// New search, previous results are stale
    Loading,
    /// Page turn within the current search
    LoadingMore,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    EditFilter { field: FilterField, value: String },
    SubmitSearch,
    ChangePage(u32),
    Loaded { params: JobSearchParams, response: JobResponse },
    LoadFailed(String),
}

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Fetch(JobSearchParams),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    /// Filters of the results currently shown
    pub filters: Filters,
    /// Filters being edited, applied on submit
    pub draft: Filters,
    pub jobs: Vec<Job>,
    pub total_jobs: u64,
    pub current_page: u32,
    pub page_size: u32,
    pub status: LoadStatus,
}

impl SearchState {
    /// State for a first search with `params`, plus the fetch that runs it.
    pub fn start(params: JobSearchParams) -> (Self, Effect) {
        let filters = Filters {
            was: params.was.clone(),
            wo: params.wo.clone(),
        };
        let state = Self {
            draft: filters.clone(),
            filters,
            jobs: Vec::new(),
            total_jobs: 0,
            current_page: params.page,
            page_size: params.size,
            status: LoadStatus::Loading,
        };
        (state, Effect::Fetch(params))
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_jobs, self.page_size)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading | LoadStatus::LoadingMore)
    }

    pub fn apply(self, action: Action) -> (Self, Option<Effect>) {
        match action {
            Action::EditFilter { field, value } => {
                let mut draft = self.draft.clone();
                match field {
                    FilterField::Keyword => draft.was = value,
                    FilterField::Location => draft.wo = value,
                }
                (Self { draft, ..self }, None)
            }

            Action::SubmitSearch => {
                if self.is_loading() {
                    return (self, None);
                }
                let params = JobSearchParams::normalize(&RawSearchQuery {
                    was: Some(self.draft.was.clone()),
                    wo: Some(self.draft.wo.clone()),
                    page: None,
                    size: Some(self.page_size.to_string()),
                });
                let state = Self {
                    status: LoadStatus::Loading,
                    ..self
                };
                (state, Some(Effect::Fetch(params)))
            }

            Action::ChangePage(page) => {
                if self.is_loading()
                    || page < 1
                    || page > self.total_pages()
                    || page == self.current_page
                {
                    return (self, None);
                }
                let params = JobSearchParams {
                    was: self.filters.was.clone(),
                    wo: self.filters.wo.clone(),
                    page,
                    size: self.page_size,
                };
                let state = Self {
                    status: LoadStatus::LoadingMore,
                    ..self
                };
                (state, Some(Effect::Fetch(params)))
            }

            Action::Loaded { params, response } => {
                let filters = Filters {
                    was: params.was,
                    wo: params.wo,
                };
                let state = Self {
                    draft: filters.clone(),
                    filters,
                    jobs: response.jobs,
                    total_jobs: response.total_results,
                    current_page: params.page,
                    page_size: params.size,
                    status: LoadStatus::Idle,
                };
                (state, None)
            }

            Action::LoadFailed(message) => (
                Self {
                    status: LoadStatus::Failed(message),
                    ..self
                },
                None,
            ),
        }
    }
}

//! Terminal counterpart of the search page: fetches through `/api/jobs` and
//! renders job cards with a pagination bar.

pub mod api;
pub mod apply;
pub mod pagination;
pub mod render;
pub mod session;
pub mod state;

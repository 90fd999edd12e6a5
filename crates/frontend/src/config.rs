//! Fixed client tunables. The backend address itself comes from `BASE_URL`,
//! see [`crate::shared::api_utils::api_base`].

/// Delay between the last keystroke in a search box and the list request.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// How long a form stays open after a successful save so the message is seen.
pub const FORM_CLOSE_DELAY_MS: u32 = 1200;

pub use contracts::shared::pagination::{DEFAULT_LIMIT, PAGE_SIZE_OPTIONS};

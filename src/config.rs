//! Support for library configuration options

use std::sync::{Arc, Mutex};
use once_cell::sync::Lazy;

/// The base URL of the planner service.
/// Feel free to override it when initing this library (e.g. to point at a staging server).
pub static BASE_URL: Lazy<Arc<Mutex<String>>> =
    Lazy::new(|| Arc::new(Mutex::new("https://app-planer.online".to_string())));

/// The sentinel category given to tasks that have none.
/// Feel free to override it when initing this library.
pub static DEFAULT_CATEGORY: Lazy<Arc<Mutex<String>>> =
    Lazy::new(|| Arc::new(Mutex::new("uncategorized".to_string())));

/// The current base URL (see [`BASE_URL`])
pub fn base_url() -> String {
    BASE_URL.lock().unwrap().clone()
}

/// The current category sentinel (see [`DEFAULT_CATEGORY`])
pub fn default_category() -> String {
    DEFAULT_CATEGORY.lock().unwrap().clone()
}

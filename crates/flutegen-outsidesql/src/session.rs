//! Title and description uniqueness across one checking run
//!
//! A run registers the title and description of every checked file. The
//! maps live as long as the session and are never cleared, so two files in
//! one run cannot share a title or description unless the checker
//! suppresses uniqueness.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Records which file owns each title and description
pub trait UniquenessRegistry {
    /// Register `title` for `file_name`
    ///
    /// Returns the owning file when a different file already registered it.
    fn claim_title(&mut self, title: &str, file_name: &str) -> Option<String>;

    /// Register `description` for `file_name`
    ///
    /// Returns the owning file when a different file already registered it.
    fn claim_description(&mut self, description: &str, file_name: &str) -> Option<String>;
}

/// Single-threaded session state for one checking run
#[derive(Debug, Default, Clone)]
pub struct ValidationSession {
    titles: HashMap<String, String>,
    descriptions: HashMap<String, String>,
}

impl ValidationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// File that registered `title`
    pub fn title_owner(&self, title: &str) -> Option<&str> {
        self.titles.get(title).map(String::as_str)
    }

    /// File that registered `description`
    pub fn description_owner(&self, description: &str) -> Option<&str> {
        self.descriptions.get(description).map(String::as_str)
    }

    pub fn title_count(&self) -> usize {
        self.titles.len()
    }

    pub fn description_count(&self) -> usize {
        self.descriptions.len()
    }
}

impl UniquenessRegistry for ValidationSession {
    fn claim_title(&mut self, title: &str, file_name: &str) -> Option<String> {
        claim(&mut self.titles, title, file_name)
    }

    fn claim_description(&mut self, description: &str, file_name: &str) -> Option<String> {
        claim(&mut self.descriptions, description, file_name)
    }
}

fn claim(map: &mut HashMap<String, String>, key: &str, file_name: &str) -> Option<String> {
    match map.get(key) {
        Some(owner) if owner != file_name => Some(owner.clone()),
        Some(_) => None,
        None => {
            map.insert(key.to_string(), file_name.to_string());
            None
        }
    }
}

/// A [`ValidationSession`] shared by threads checking files in parallel
///
/// Clones share the same maps. Each claim is a single check-and-insert
/// under the lock.
#[derive(Debug, Default, Clone)]
pub struct SharedValidationSession {
    inner: Arc<Mutex<ValidationSession>>,
}

impl SharedValidationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current session state
    pub fn snapshot(&self) -> ValidationSession {
        self.inner.lock().clone()
    }
}

impl UniquenessRegistry for SharedValidationSession {
    fn claim_title(&mut self, title: &str, file_name: &str) -> Option<String> {
        self.inner.lock().claim_title(title, file_name)
    }

    fn claim_description(&mut self, description: &str, file_name: &str) -> Option<String> {
        self.inner.lock().claim_description(description, file_name)
    }
}

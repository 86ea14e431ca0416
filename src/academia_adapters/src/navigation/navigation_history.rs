use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use academia_core::{LANDING_VIEW, Navigator};

/// Navigation surface that records where the user was sent.
///
/// Clones share the same history.
#[derive(Clone)]
pub struct NavigationHistory {
    visited: Arc<Mutex<Vec<String>>>,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::starting_at(LANDING_VIEW)
    }
}

impl NavigationHistory {
    pub fn starting_at(path: impl Into<String>) -> Self {
        Self {
            visited: Arc::new(Mutex::new(vec![path.into()])),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.visited.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> String {
        self.lock().last().cloned().unwrap_or_default()
    }

    /// Every location so far, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.lock().clone()
    }
}

impl Navigator for NavigationHistory {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "Navigating");
        self.lock().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_the_landing_view() {
        let history = NavigationHistory::default();
        assert_eq!(history.current(), "/dashboard");
    }

    #[test]
    fn records_redirects_in_order() {
        let history = NavigationHistory::starting_at("/courses");
        let navigator = history.clone();

        navigator.navigate("/auth/login");
        navigator.navigate("/dashboard");

        assert_eq!(history.current(), "/dashboard");
        assert_eq!(
            history.visited(),
            vec!["/courses", "/auth/login", "/dashboard"]
        );
    }
}

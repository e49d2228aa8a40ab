//! Routes
//!
//! Two pages; moving between them is a full page load.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Sign-in screen
    Landing,
    /// Inventory tracker
    Pantry,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/pantry" => Route::Pantry,
            _ => Route::Landing,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Pantry => "/pantry",
        }
    }

    /// Every route except the landing page needs a session
    pub fn requires_auth(self) -> bool {
        self != Route::Landing
    }
}

pub fn current_route() -> Route {
    window()
        .location()
        .pathname()
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Landing)
}

/// Full page navigation (reloads the app shell)
pub fn navigate(route: Route) {
    if let Err(e) = window().location().set_href(route.path()) {
        web_sys::console::error_1(&format!("[ROUTE] navigation to {} failed: {:?}", route.path(), e).into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Route::Landing);
        assert_eq!(Route::from_path(""), Route::Landing);
        assert_eq!(Route::from_path("/pantry"), Route::Pantry);
        assert_eq!(Route::from_path("/pantry/"), Route::Pantry);
        assert_eq!(Route::from_path("/elsewhere"), Route::Landing);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in [Route::Landing, Route::Pantry] {
            assert_eq!(Route::from_path(route.path()), route);
        }
        assert!(!Route::Landing.requires_auth());
        assert!(Route::Pantry.requires_auth());
    }
}

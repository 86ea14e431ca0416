pub mod navigation_history;

pub use navigation_history::NavigationHistory;

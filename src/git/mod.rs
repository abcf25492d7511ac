//! Git collaborators: repository history walking.

mod history;

pub use history::GitHistory;

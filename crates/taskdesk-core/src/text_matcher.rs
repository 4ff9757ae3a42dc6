use crate::Task;

/// Case-insensitive substring matcher over task title and description.
pub struct TextMatcher {
    needle: String,
}

impl TextMatcher {
    /// Build a matcher for `query`. Returns `None` for an empty query, which matches everything.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        Some(Self {
            needle: query.to_lowercase(),
        })
    }

    /// Determine whether the title or description contains the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title) || self.matches_field(&task.description)
    }

    fn matches_field(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.needle)
    }
}

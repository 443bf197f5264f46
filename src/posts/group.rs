//! Group model for Yatube.

use serde::Serialize;

/// A named community posts may optionally belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Group {
    /// Unique group ID.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// URL slug (unique).
    pub slug: String,
    /// Free-text description.
    pub description: String,
}

/// Data for creating a new group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Free-text description.
    pub description: String,
}

impl NewGroup {
    /// Create a new group with an empty description.
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl From<&crate::config::GroupSeed> for NewGroup {
    fn from(seed: &crate::config::GroupSeed) -> Self {
        NewGroup::new(&seed.title, seed.slug.trim()).with_description(&seed.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupSeed;

    #[test]
    fn test_new_group_builder() {
        let group = NewGroup::new("Cats", "cats").with_description("Feline matters");
        assert_eq!(group.title, "Cats");
        assert_eq!(group.slug, "cats");
        assert_eq!(group.description, "Feline matters");
    }

    #[test]
    fn test_from_seed_trims_slug() {
        let seed = GroupSeed {
            title: "Dogs".to_string(),
            slug: " dogs ".to_string(),
            description: String::new(),
        };
        let group = NewGroup::from(&seed);
        assert_eq!(group.slug, "dogs");
    }
}

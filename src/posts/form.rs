//! The post create/edit form.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::group::Group;
use crate::form::{no_control_chars, not_empty_trimmed, FormErrors};

/// Message for a group value that names no known group.
pub const INVALID_GROUP_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Raw form submission, as posted by the browser.
///
/// `group` holds the selected group ID, or an empty string for "no group".
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct PostFormInput {
    #[validate(custom(function = validate_text))]
    pub text: String,
    pub group: String,
}

fn validate_text(text: &str) -> Result<(), validator::ValidationError> {
    not_empty_trimmed(text)?;
    no_control_chars(text)
}

/// A successfully cleaned form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    /// Post body.
    pub text: String,
    /// Chosen group, if any.
    pub group_id: Option<i64>,
}

impl PostFormInput {
    /// Pre-fill the form from an existing post.
    pub fn prefilled(text: impl Into<String>, group_id: Option<i64>) -> Self {
        Self {
            text: text.into(),
            group: group_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    /// Validate the submission against the available groups.
    pub fn clean(&self, groups: &[Group]) -> Result<PostForm, FormErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FormErrors::new(),
            Err(e) => FormErrors::from_validation_errors(&e),
        };

        let group_id = match self.group.trim() {
            "" => None,
            raw => match raw.parse::<i64>() {
                Ok(id) if groups.iter().any(|g| g.id == id) => Some(id),
                _ => {
                    errors.add("group", INVALID_GROUP_MESSAGE);
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PostForm {
            text: self.text.trim().to_string(),
            group_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<Group> {
        vec![Group {
            id: 7,
            title: "Cats".to_string(),
            slug: "cats".to_string(),
            description: String::new(),
        }]
    }

    fn input(text: &str, group: &str) -> PostFormInput {
        PostFormInput {
            text: text.to_string(),
            group: group.to_string(),
        }
    }

    #[test]
    fn test_clean_without_group() {
        let form = input("  Hello  ", "").clean(&groups()).unwrap();
        assert_eq!(form.text, "Hello");
        assert!(form.group_id.is_none());
    }

    #[test]
    fn test_clean_with_group() {
        let form = input("Hello", "7").clean(&groups()).unwrap();
        assert_eq!(form.group_id, Some(7));
    }

    #[test]
    fn test_text_is_required() {
        let errors = input("   ", "").clean(&groups()).unwrap_err();
        assert_eq!(errors.get("text"), ["This field is required."]);
        assert!(errors.get("group").is_empty());
    }

    #[test]
    fn test_unknown_group_rejected() {
        let errors = input("Hello", "99").clean(&groups()).unwrap_err();
        assert_eq!(errors.get("group"), [INVALID_GROUP_MESSAGE]);

        let errors = input("Hello", "cats").clean(&groups()).unwrap_err();
        assert_eq!(errors.get("group"), [INVALID_GROUP_MESSAGE]);
    }

    #[test]
    fn test_errors_reported_together() {
        let errors = input("", "99").clean(&groups()).unwrap_err();
        assert!(!errors.get("text").is_empty());
        assert!(!errors.get("group").is_empty());
    }

    #[test]
    fn test_control_chars_rejected() {
        let errors = input("Bad\x07text", "").clean(&groups()).unwrap_err();
        assert!(!errors.get("text").is_empty());
    }

    #[test]
    fn test_prefilled() {
        let form = PostFormInput::prefilled("Old", Some(7));
        assert_eq!(form.group, "7");
        assert_eq!(PostFormInput::prefilled("Old", None).group, "");
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let input: PostFormInput = serde_json::from_str(r#"{"text":"Hi"}"#).unwrap();
        assert_eq!(input.text, "Hi");
        assert_eq!(input.group, "");
    }
}

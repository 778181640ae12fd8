//! Submitted HTML forms and their validation.
//!
//! Validators return field-level errors as a JSON object mapping each field
//! name to a list of messages, or `None` when the form is valid.

use serde::Deserialize;
use serde_json::{Value, json};

pub const MAX_CATEGORY_NAME_LEN: usize = 255;
pub const MAX_COMMENT_LEN: usize = 2000;

/// Category creation form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
}

impl CategoryForm {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

/// Comment form posted on an episode page.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub comment: String,
}

impl CommentForm {
    pub fn normalized(self) -> Self {
        Self {
            comment: self.comment.trim().to_string(),
        }
    }
}

/// Sign-in form. Not `Debug`, so the password never reaches a log line.
#[derive(Default, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Program search form on the index page.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SearchForm {
    #[serde(default, rename = "searchField")]
    pub search_field: String,
}

/// Validate a (normalized) category form.
pub fn validate_category(form: &CategoryForm) -> Option<Value> {
    let mut fields = serde_json::Map::new();

    let len = form.name.chars().count();
    if len == 0 {
        fields.insert("name".to_string(), json!(["must not be blank"]));
    } else if len > MAX_CATEGORY_NAME_LEN {
        fields.insert(
            "name".to_string(),
            json!([format!("must be at most {MAX_CATEGORY_NAME_LEN} characters")]),
        );
    }

    if fields.is_empty() {
        None
    } else {
        Some(Value::Object(fields))
    }
}

/// Validate a (normalized) comment form.
pub fn validate_comment(form: &CommentForm) -> Option<Value> {
    let mut fields = serde_json::Map::new();

    let len = form.comment.chars().count();
    if len == 0 {
        fields.insert("comment".to_string(), json!(["must not be blank"]));
    } else if len > MAX_COMMENT_LEN {
        fields.insert(
            "comment".to_string(),
            json!([format!("must be at most {MAX_COMMENT_LEN} characters")]),
        );
    }

    if fields.is_empty() {
        None
    } else {
        Some(Value::Object(fields))
    }
}

/// Messages recorded for one field, in order.
pub fn field_errors<'a>(errors: Option<&'a Value>, field: &str) -> Vec<&'a str> {
    errors
        .and_then(|e| e.get(field))
        .and_then(Value::as_array)
        .map(|msgs| msgs.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_comment_is_rejected_after_trimming() {
        let form = CommentForm {
            comment: "   \n ".into(),
        }
        .normalized();
        let errors = validate_comment(&form).unwrap();
        assert_eq!(field_errors(Some(&errors), "comment"), ["must not be blank"]);
    }

    #[test]
    fn overlong_comment_is_rejected() {
        let form = CommentForm {
            comment: "x".repeat(MAX_COMMENT_LEN + 1),
        };
        assert!(validate_comment(&form).is_some());
    }

    #[test]
    fn comment_is_trimmed() {
        let form = CommentForm {
            comment: "  Great episode  ".into(),
        }
        .normalized();
        assert_eq!(form.comment, "Great episode");
        assert!(validate_comment(&form).is_none());
    }

    #[test]
    fn category_name_limits() {
        let blank = CategoryForm { name: String::new() };
        assert!(validate_category(&blank).is_some());

        let long = CategoryForm {
            name: "é".repeat(MAX_CATEGORY_NAME_LEN),
        };
        assert!(validate_category(&long).is_none());

        let too_long = CategoryForm {
            name: "a".repeat(MAX_CATEGORY_NAME_LEN + 1),
        };
        assert!(validate_category(&too_long).is_some());
    }

    #[test]
    fn field_errors_of_valid_form_are_empty() {
        assert!(field_errors(None, "name").is_empty());
        let errors = json!({ "comment": ["must not be blank"] });
        assert!(field_errors(Some(&errors), "name").is_empty());
    }
}

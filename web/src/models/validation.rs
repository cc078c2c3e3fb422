//! Field-level validation for form DTOs
//!
//! DTOs derive `validator::Validate`; this module holds the checks the
//! crate has no built-in for and flattens `ValidationErrors` into the
//! `FieldError` list the front-end routes return.

use serde::Serialize;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

/// A single failed constraint on a named field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the JSON body
    pub field: String,
    pub message: String,
}

/// Value must contain something other than whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Digits with the usual separators and an optional leading `+`
pub fn phone_number(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '));
    if digits >= 6 && allowed {
        Ok(())
    } else {
        Err(ValidationError::new("phone"))
    }
}

/// One entry per failed constraint, ordered by field name
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            let field = camel_case(&field);
            errors.iter().map(move |error| FieldError {
                field: field.clone(),
                message: error
                    .message
                    .clone()
                    .unwrap_or_else(|| Cow::Owned(error.code.to_string()))
                    .into_owned(),
            })
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(custom(function = "not_blank", message = "Name is required"))]
        full_name: String,
        #[validate(email(message = "Please enter a valid email address"))]
        email: String,
        #[validate(url(message = "Please enter a valid URL"))]
        image_url: Option<String>,
    }

    #[test]
    fn test_errors_use_json_field_names() {
        let form = Form {
            full_name: "   ".to_string(),
            email: "jane".to_string(),
            image_url: Some("not a url".to_string()),
        };
        let errors = field_errors(&form.validate().unwrap_err());
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "fullName", "imageUrl"]);
        assert_eq!(errors[1].message, "Name is required");
    }

    #[test]
    fn test_lenient_formats_are_accepted() {
        let form = Form {
            full_name: "Jane".to_string(),
            email: "jane@localhost".to_string(),
            image_url: Some("ftp://files.example.com/a.jpg".to_string()),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_phone_format() {
        assert!(phone_number("+961 1 234 567").is_ok());
        assert!(phone_number("(555) 123-4567").is_ok());
        assert!(phone_number("call me").is_err());
        assert!(phone_number("12").is_err());
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("display_order"), "displayOrder");
        assert_eq!(camel_case("title"), "title");
    }
}

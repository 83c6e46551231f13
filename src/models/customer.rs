use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;
use validator::Validate;

/// A customer as stored, and as sent over the wire
///
/// `id` is assigned by the store on creation and is absent on bodies for
/// customers that don't exist yet. `created_at` falls back to the current
/// date when a customer is created without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub first_name: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub last_name: String,
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    #[validate(
        length(min = 1, message = "must not be empty"),
        email(message = "must be a well-formed email address")
    )]
    pub email: String,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    #[serde(default)]
    pub photo: Option<String>,
}

/// Struct field to wire name, in the order violations are reported
const VALIDATED_FIELDS: [(&str, &str); 3] = [
    ("first_name", "firstName"),
    ("last_name", "lastName"),
    ("email", "email"),
];

impl Customer {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            id: None,
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            email: email.to_owned(),
            created_at: None,
            photo: None,
        }
    }

    /// Checks the required-field and format constraints
    ///
    /// Returns one message per offending field, formatted as
    /// `field '<name>' <constraint>`
    pub fn validate_fields(&self) -> Result<(), Vec<String>> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };
        let field_errors = errors.field_errors();

        let messages = VALIDATED_FIELDS
            .iter()
            .filter_map(|(field, name)| {
                let error = field_errors.get(*field)?.first()?;
                let constraint = error.message.as_deref().unwrap_or(&*error.code);
                Some(violation(name, constraint))
            })
            .collect();
        Err(messages)
    }
}

pub(crate) fn violation(field: &str, constraint: &str) -> String {
    format!("field '{}' {}", field, constraint)
}

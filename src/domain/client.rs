//! Client domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::ProductCategory;
use crate::config::PHONE_NUMBER_PATTERN;

static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(PHONE_NUMBER_PATTERN).expect("phone number pattern is valid"));

/// Registered client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    /// Human-facing sequential number, distinct from `id`
    pub client_number: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Build a new client record from a registration request
    pub fn register(client_number: i32, input: CreateClient) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_number,
            first_name: input.first_name,
            middle_name: input.middle_name,
            last_name: input.last_name,
            address: input.address,
            phone_number: input.phone_number,
            email: input.email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite contact fields. The email address is never changed.
    pub fn apply(&mut self, changes: UpdateClient) {
        self.first_name = changes.first_name;
        self.middle_name = changes.middle_name;
        self.last_name = changes.last_name;
        self.address = changes.address;
        self.phone_number = changes.phone_number;
        self.updated_at = Utc::now();
    }

    pub fn full_name(&self) -> String {
        full_name(&self.first_name, self.middle_name.as_deref(), &self.last_name)
    }
}

/// Join the present name parts with single spaces.
pub fn full_name(first: &str, middle: Option<&str>, last: &str) -> String {
    [Some(first), middle, Some(last)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Distinct ids in first-seen order
fn distinct(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(*id);
        }
    }
    seen
}

/// Client registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateClient {
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    #[serde(default)]
    #[schema(example = "Q.")]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "12 High Street, York")]
    pub address: String,
    #[validate(regex(path = *PHONE_NUMBER, message = "Invalid phone number format"))]
    #[schema(example = "+44 1904 000000")]
    pub phone_number: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    /// Selected product categories
    #[serde(default)]
    pub product_category_ids: Vec<Uuid>,
}

impl CreateClient {
    pub fn category_selection(&self) -> Vec<Uuid> {
        distinct(&self.product_category_ids)
    }
}

/// Client update request; replaces contact fields and the category selection
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateClient {
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    #[schema(example = "12 High Street, York")]
    pub address: String,
    #[validate(regex(path = *PHONE_NUMBER, message = "Invalid phone number format"))]
    #[schema(example = "+44 1904 000000")]
    pub phone_number: String,
    /// Complete new category selection
    #[serde(default)]
    pub product_category_ids: Vec<Uuid>,
}

impl UpdateClient {
    pub fn category_selection(&self) -> Vec<Uuid> {
        distinct(&self.product_category_ids)
    }
}

/// Client with every associated product category
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClientDetail {
    pub id: Uuid,
    #[schema(example = 100)]
    pub client_number: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub product_categories: Vec<ProductCategory>,
}

impl ClientDetail {
    pub fn new(client: Client, product_categories: Vec<ProductCategory>) -> Self {
        Self {
            id: client.id,
            client_number: client.client_number,
            first_name: client.first_name,
            middle_name: client.middle_name,
            last_name: client.last_name,
            address: client.address,
            phone_number: client.phone_number,
            email: client.email,
            created_at: client.created_at,
            product_categories,
        }
    }
}

/// One client–category association of a listing.
///
/// A client without categories yields a single row with empty category fields.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ClientRow {
    pub id: Uuid,
    #[schema(example = 100)]
    pub client_number: i32,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub product_category_id: Option<Uuid>,
    pub product_category_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ClientRow {
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, self.middle_name.as_deref(), &self.last_name)
    }
}

/// Rendered client listing workbook
#[derive(Debug, Clone)]
pub struct ClientExport {
    pub file_name: String,
    pub content: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> CreateClient {
        CreateClient {
            first_name: "Jane".to_string(),
            middle_name: None,
            last_name: "Doe".to_string(),
            address: "12 High Street".to_string(),
            phone_number: "+44 1904 000000".to_string(),
            email: "jane@example.com".to_string(),
            product_category_ids: vec![],
        }
    }

    #[test]
    fn full_name_skips_missing_middle_name() {
        assert_eq!(full_name("Jane", None, "Doe"), "Jane Doe");
        assert_eq!(full_name("Jane", Some("  "), "Doe"), "Jane Doe");
        assert_eq!(full_name("Jane", Some("Q."), "Doe"), "Jane Q. Doe");
    }

    #[test]
    fn category_selection_drops_duplicates_in_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut input = registration();
        input.product_category_ids = vec![b, a, b, a];

        assert_eq!(input.category_selection(), vec![b, a]);
    }

    #[test]
    fn apply_keeps_email() {
        let mut client = Client::register(100, registration());
        client.apply(UpdateClient {
            first_name: "Janet".to_string(),
            middle_name: Some("R".to_string()),
            last_name: "Roe".to_string(),
            address: "1 Low Street".to_string(),
            phone_number: "+44 1904 111111".to_string(),
            product_category_ids: vec![],
        });

        assert_eq!(client.email, "jane@example.com");
        assert_eq!(client.full_name(), "Janet R Roe");
        assert_eq!(client.phone_number, "+44 1904 111111");
    }

    #[test]
    fn validation_rejects_bad_email_and_phone() {
        let mut input = registration();
        input.email = "not-an-email".to_string();
        input.phone_number = "call me".to_string();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone_number"));
    }

    #[test]
    fn validation_accepts_well_formed_request() {
        assert!(registration().validate().is_ok());
    }
}

//! Filtering, sorting and paging inputs of the client listing.

use std::str::FromStr;

use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            _ => Err(AppError::validation(format!("Unknown sort order '{}'", s))),
        }
    }
}

/// Field a client listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClientSortField {
    #[default]
    CreationTime,
    ClientNumber,
    FirstName,
    MiddleName,
    LastName,
    Address,
    Email,
    PhoneNumber,
    ProductCategoryName,
}

impl FromStr for ClientSortField {
    type Err = AppError;

    /// Case-insensitive; camelCase, PascalCase and snake_case spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "creationtime" | "createdat" => Ok(ClientSortField::CreationTime),
            "clientid" | "clientnumber" => Ok(ClientSortField::ClientNumber),
            "firstname" => Ok(ClientSortField::FirstName),
            "middlename" => Ok(ClientSortField::MiddleName),
            "lastname" => Ok(ClientSortField::LastName),
            "address" => Ok(ClientSortField::Address),
            "email" => Ok(ClientSortField::Email),
            "phonenumber" => Ok(ClientSortField::PhoneNumber),
            "productcategoryname" => Ok(ClientSortField::ProductCategoryName),
            _ => Err(AppError::validation(format!("Unknown sort field '{}'", s))),
        }
    }
}

/// Sort field plus direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientSort {
    pub field: ClientSortField,
    pub order: SortOrder,
}

impl ClientSort {
    /// Parse a `"field [direction]"` sort string.
    ///
    /// A direction inside `sorting` takes precedence over `order`.
    pub fn parse(sorting: Option<&str>, order: Option<&str>) -> AppResult<Self> {
        let mut order = match non_blank(order) {
            Some(order) => order.parse()?,
            None => SortOrder::default(),
        };

        let Some(sorting) = non_blank(sorting) else {
            return Ok(Self {
                field: ClientSortField::default(),
                order,
            });
        };

        let mut parts = sorting.split_whitespace();
        let field = match parts.next() {
            Some(field) => field.parse()?,
            None => ClientSortField::default(),
        };
        if let Some(direction) = parts.next() {
            order = direction.parse()?;
        }
        if parts.next().is_some() {
            return Err(AppError::validation(format!(
                "Invalid sorting '{}': expected a field and an optional direction",
                sorting
            )));
        }

        Ok(Self { field, order })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Row filter of a client listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    /// Trimmed keyword, `None` when blank. Case folding happens in SQL.
    pub search_keyword: Option<String>,
    /// Keep only rows associated with this category
    pub product_category_id: Option<Uuid>,
}

impl ClientFilter {
    pub fn new(search_keyword: Option<&str>, product_category_id: Option<Uuid>) -> Self {
        Self {
            search_keyword: non_blank(search_keyword).map(str::to_string),
            product_category_id,
        }
    }
}

/// Query parameters of the client listing endpoint
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClientListQuery {
    /// Case-insensitive substring matched against number, names, address and email
    pub search_keyword: Option<String>,
    /// Keep only rows of this product category
    pub product_category_id: Option<Uuid>,
    /// Sort field, optionally followed by a direction, e.g. `firstName desc`
    pub sorting: Option<String>,
    /// `asc` (default) or `desc`
    pub sort_order: Option<String>,
    /// Rows to skip
    #[serde(default)]
    pub skip_count: u64,
    /// Rows to take (default 20, at most 100)
    pub max_result_count: Option<u64>,
}

impl ClientListQuery {
    /// Split into filter, sort and page, validating the sort expression.
    pub fn into_parts(self) -> AppResult<(ClientFilter, ClientSort, PageRequest)> {
        let sort = ClientSort::parse(self.sorting.as_deref(), self.sort_order.as_deref())?;
        let filter = ClientFilter::new(self.search_keyword.as_deref(), self.product_category_id);
        let page = PageRequest::new(
            self.skip_count,
            self.max_result_count.unwrap_or(DEFAULT_PAGE_SIZE),
        );

        Ok((filter, sort, page))
    }
}

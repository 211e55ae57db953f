use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::domain::order::Order;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Id,
    CustomerName,
    Product,
    Quantity,
    Price,
    Status,
}

impl SortField {
    /// Column in the `orders` table. Only these names ever reach SQL.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::CustomerName => "customer_name",
            SortField::Product => "product",
            SortField::Quantity => "quantity",
            SortField::Price => "price",
            SortField::Status => "status",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::CustomerName => "customerName",
            SortField::Product => "product",
            SortField::Quantity => "quantity",
            SortField::Price => "price",
            SortField::Status => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SortParseError {
    #[error("unknown sort field: {0}")]
    UnknownField(String),
    #[error("unknown sort direction: {0}")]
    UnknownDirection(String),
}

impl FromStr for SortField {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(SortField::Id),
            "customerName" => Ok(SortField::CustomerName),
            "product" => Ok(SortField::Product),
            "quantity" => Ok(SortField::Quantity),
            "price" => Ok(SortField::Price),
            "status" => Ok(SortField::Status),
            other => Err(SortParseError::UnknownField(other.to_string())),
        }
    }
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(SortParseError::UnknownDirection(s.to_string())),
        }
    }
}

/// Parses `field` or `field,direction`, e.g. `price,desc`.
impl FromStr for Sort {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, direction) = match s.split_once(',') {
            Some((f, d)) => (f.parse()?, d.parse()?),
            None => (s.parse()?, SortDirection::Asc),
        };
        Ok(Self { field, direction })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{}", self.field.as_str(), dir)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Sort,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

impl PageRequest {
    /// Size 0 falls back to the default, oversized requests are clamped.
    pub fn new(page: u32, size: u32, sort: Sort) -> Self {
        let size = match size {
            0 => DEFAULT_PAGE_SIZE,
            s => s.min(MAX_PAGE_SIZE),
        };
        Self { page, size, sort }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size);
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages: if size == 0 {
                0
            } else {
                total_elements.div_ceil(size)
            },
        }
    }
}

/// Orders `a` against `b` under `sort`, ties broken by ascending id.
pub fn compare_orders(a: &Order, b: &Order, sort: &Sort) -> std::cmp::Ordering {
    let ord = match sort.field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::CustomerName => a.customer_name.cmp(&b.customer_name),
        SortField::Product => a.product.cmp(&b.product),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Status => a.status.cmp(&b.status),
    };
    let ord = match sort.direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    };
    ord.then_with(|| a.id.cmp(&b.id))
}

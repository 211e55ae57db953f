use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_STATUS: &str = "PENDING";

const CUSTOMER_NAME_MIN: usize = 3;
const CUSTOMER_NAME_MAX: usize = 100;

/// A stored order. `id` is assigned by the store on creation and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub product: String,
    pub quantity: i32,
    pub price: f64,
    pub status: String,
}

/// Validated order fields without an id. Produced by [`OrderInput::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub product: String,
    pub quantity: i32,
    pub price: f64,
    pub status: String,
}

/// Raw request payload. Every field is optional so that a missing field shows
/// up as a field error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub customer_name: Option<String>,
    pub product: Option<String>,
    pub quantity: Option<i32>,
    pub price: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(thiserror::Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[error("validation failed ({} field errors)", .fields.len())]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &str, message: &str) {
        self.fields.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl OrderInput {
    /// Checks every constraint and reports all failing fields at once.
    pub fn validate(self) -> Result<NewOrder, ValidationErrors> {
        let mut errors = ValidationErrors { fields: Vec::new() };

        let customer_name = self.customer_name.unwrap_or_default();
        if is_blank(&customer_name) {
            errors.push("customerName", "Customer name cannot be blank");
        }
        let len = customer_name.chars().count();
        if !(CUSTOMER_NAME_MIN..=CUSTOMER_NAME_MAX).contains(&len) {
            errors.push(
                "customerName",
                "Customer name must be between 3 and 100 characters",
            );
        }

        let product = self.product.unwrap_or_default();
        if is_blank(&product) {
            errors.push("product", "Product cannot be blank");
        }

        let quantity = match self.quantity {
            None => {
                errors.push("quantity", "Quantity cannot be null");
                None
            }
            Some(q) if q < 1 => {
                errors.push("quantity", "Quantity must be at least 1");
                None
            }
            q => q,
        };

        let price = match self.price {
            None => {
                errors.push("price", "Price cannot be null");
                None
            }
            Some(p) if !(p.is_finite() && p > 0.0) => {
                errors.push("price", "Price must be a positive value");
                None
            }
            p => p,
        };

        match (quantity, price) {
            (Some(quantity), Some(price)) if errors.fields.is_empty() => Ok(NewOrder {
                customer_name,
                product,
                quantity,
                price,
                status: self.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            }),
            _ => Err(errors),
        }
    }
}

impl NewOrder {
    pub fn with_id(self, id: i64) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            product: self.product,
            quantity: self.quantity,
            price: self.price,
            status: self.status,
        }
    }
}

impl Order {
    /// Overwrites every mutable field, keeping the id.
    pub fn replace_fields(&mut self, fields: NewOrder) {
        self.customer_name = fields.customer_name;
        self.product = fields.product;
        self.quantity = fields.quantity;
        self.price = fields.price;
        self.status = fields.status;
    }
}

impl From<Order> for OrderInput {
    fn from(o: Order) -> Self {
        Self {
            customer_name: Some(o.customer_name),
            product: Some(o.product),
            quantity: Some(o.quantity),
            price: Some(o.price),
            status: Some(o.status),
        }
    }
}

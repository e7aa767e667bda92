//! Domain events exchanged between slices over the event bus.
//!
//! Publishers never wait for consumers; every event is a self-contained snapshot.

use serde::{Deserialize, Serialize};

/// A customer asked for a price quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequested {
    pub id: String,
    pub reference_number: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub product_name: String,
    pub message: Option<String>,
}

/// Back office changed the status of a quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteUpdated {
    pub id: String,
    pub reference_number: String,
    pub name: String,
    pub email: String,
    pub product_name: String,
    pub status: String,
    pub quoted_price_cents: Option<u64>,
}

/// A customer asked the team to source a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequested {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub brand: String,
    pub product_name: String,
}

/// A visitor sent a message through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmitted {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
}

pub(crate) mod product_requests;
pub(crate) mod quote_requests;

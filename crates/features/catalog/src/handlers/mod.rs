pub(crate) mod curation;
pub(crate) mod products;

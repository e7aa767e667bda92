pub(crate) mod menu;
pub(crate) mod navbar;

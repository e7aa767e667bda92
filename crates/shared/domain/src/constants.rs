//! Shared identifiers: `OpenAPI` tags, collection names and singleton keys.

// OpenAPI tags
pub const SYSTEM_TAG: &str = "System";
pub const CONTACT_TAG: &str = "Contact";
pub const CONTENT_TAG: &str = "Content";
pub const NAVIGATION_TAG: &str = "Navigation";
pub const CATALOG_TAG: &str = "Catalog";
pub const INQUIRIES_TAG: &str = "Inquiries";
pub const NOTIFICATIONS_TAG: &str = "Notifications";

// Collections
pub const CONTACT_SUBMISSION: &str = "contact_submission";
pub const CONTENT: &str = "content";
pub const HERO_SECTION: &str = "hero_section";
pub const HOMEPAGE_CONTENT: &str = "homepage_content";
pub const SIGNUP_POPUP: &str = "signup_popup";
pub const MENU: &str = "menu";
pub const NAVBAR: &str = "navbar";
pub const PRODUCT: &str = "product";
pub const POPUP_PRODUCT_SELECTION: &str = "popup_product_selection";
pub const SALE_ITEMS_SELECTION: &str = "sale_items_selection";
pub const PRODUCT_REQUEST: &str = "product_request";
pub const QUOTE_REQUEST: &str = "quote_request";
pub const SMS_LOG: &str = "sms_log";

/// Record key shared by all singleton documents (navbar, signup popup, curations).
pub const SINGLETON_KEY: &str = "current";

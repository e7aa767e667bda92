#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the Atelier workspace.
//! They remove the boilerplate around error enums, API data models, `OpenAPI`-documented
//! handlers and feature-slice state handles.
//!
//! See each macro’s docstring for examples; they are `ignore`d to avoid compiling in this crate,
//! but should be copied into consuming crates’ tests as needed.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro for request and response bodies.
///
/// Adds `Debug`, `Serialize` and `Deserialize` when missing, `utoipa::ToSchema` under the
/// consuming crate's `server` feature, and camelCase field names.
///
/// Plain models reject unknown fields. Models marked `stored` are documents read back
/// from the store and accept them, so records written before a field was removed still load.
///
/// # Example
///
/// ```rust,ignore
/// use atelier_derive::api_model;
///
/// #[api_model(stored)]
/// pub struct HeroSection {
///     pub id: String,
///     pub image_url: String,
/// }
///
/// #[api_model]
/// pub struct NewHeroSection {
///     pub image_url: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Attribute macro to bridge Axum handlers with `OpenAPI` documentation.
///
/// Accepts standard `utoipa::path` arguments such as `get`, `post`, `path = "..."`,
/// `params(...)`, `request_body = ...`, `responses(...)`, and `tag = "..."`.
/// The `utoipa::path` attribute is only emitted when the consuming crate enables `server`.
///
/// # Example
///
/// ```rust,ignore
/// #[api_handler(
///     get,
///     path = "/api/navbar",
///     responses((status = OK, body = Navbar)),
///     tag = NAVIGATION_TAG
/// )]
/// pub async fn get_navbar(State(state): State<ApiState>) -> Result<Json<Navbar>, ApiError> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Attribute macro for defining domain-specific error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `#[source]` field.
/// * **Internal Fallback**: Provides `From<&str>` and `From<String>` if an `Internal` variant exists.
/// * **HTTP Mapping**: Every variant may carry `#[status(404)]`; the generated
///   `status_code()` returns it (500 when absent). With `#[atelier_error(http)]` the enum
///   also implements `atelier_kernel::server::error::HttpError`, so `?` converts it into
///   the kernel `ApiError` inside handlers.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected to keep error wiring explicit and reliable.
///
/// # Example
///
/// ```rust,ignore
/// use atelier_derive::atelier_error;
/// use std::borrow::Cow;
///
/// #[atelier_error(http)]
/// pub enum ContactError {
///     #[status(404)]
///     #[error("Submission not found{}: {message}", format_context(.context))]
///     NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Database error{}: {source}", format_context(.context))]
///     Database { source: atelier_database::DatabaseError, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn atelier_error(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(args.into(), input).into()
}

/// Attribute macro to define a feature slice handle.
///
/// This macro transforms a struct into a full Slice pattern:
/// 1. Generates a thread-safe `Arc` wrapper.
/// 2. Implements `Deref` for transparent access to the inner state.
/// 3. Implements `FeatureSlice` for registration in the kernel state registry.
///
/// # Example
/// ```rust,ignore
/// #[atelier_derive::atelier_slice]
/// pub struct Contact {
///     pub submissions: SubmissionRepository,
/// }
///
/// fn init(db: &Database) -> Contact {
///     Contact::new(ContactInner { submissions: SubmissionRepository::new(db) })
/// }
/// ```
#[proc_macro_attribute]
pub fn atelier_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}

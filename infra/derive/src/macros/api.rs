use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, ItemFn, ItemStruct, LitStr};

/// Wire naming shared by every request and response body.
const WIRE_CASE: &str = "camelCase";

/// What a model's serde attributes already say.
#[derive(Default)]
struct SerdePolicy {
    rename_all: Option<LitStr>,
    deny_unknown_fields: bool,
}

/// Expands `#[api_model]` / `#[api_model(stored)]`.
///
/// Request models reject unknown fields. `stored` models are read back from the
/// document store, where older records may carry fields the struct no longer has.
pub fn expand_api_model(args: TokenStream, input: ItemStruct) -> TokenStream {
    let stored = match parse_stored_flag(args) {
        Ok(stored) => stored,
        Err(err) => return err.to_compile_error(),
    };
    let policy = match serde_policy(&input.attrs) {
        Ok(policy) => policy,
        Err(err) => return err.to_compile_error(),
    };

    let mut attrs = Vec::new();
    let derives = derived_traits(&input.attrs);
    let missing: Vec<TokenStream> = [
        ("Debug", quote! { Debug }),
        ("Serialize", quote! { ::serde::Serialize }),
        ("Deserialize", quote! { ::serde::Deserialize }),
    ]
    .into_iter()
    .filter(|(name, _)| !derives.iter().any(|d| d == name))
    .map(|(_, path)| path)
    .collect();
    if !missing.is_empty() {
        attrs.push(quote! { #[derive(#(#missing),*)] });
    }
    if !derives.iter().any(|d| d == "ToSchema") {
        attrs.push(quote! { #[cfg_attr(feature = "server", derive(::utoipa::ToSchema))] });
    }

    match &policy.rename_all {
        Some(existing) if existing.value() != WIRE_CASE => {
            return syn::Error::new_spanned(existing, "api models are always camelCase on the wire")
                .to_compile_error();
        },
        Some(_) => {},
        None => attrs.push(quote! { #[serde(rename_all = #WIRE_CASE)] }),
    }

    if stored && policy.deny_unknown_fields {
        return syn::Error::new_spanned(
            &input.ident,
            "stored models must accept unknown fields; drop serde(deny_unknown_fields)",
        )
        .to_compile_error();
    }
    if !stored && !policy.deny_unknown_fields {
        attrs.push(quote! { #[serde(deny_unknown_fields)] });
    }

    quote! {
        #(#attrs)*
        #input
    }
}

/// Expands `#[api_handler(...)]`: the arguments go to `utoipa::path` under the
/// `server` feature, and the body runs inside a debug span named after the handler.
/// Extractor arguments are skipped so request bodies stay out of the logs.
pub fn expand_api_handler(args: TokenStream, input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, sig, block } = input;
    let span_name = sig.ident.to_string();

    quote! {
        #(#attrs)*
        #[allow(clippy::unused_async)]
        #[cfg_attr(feature = "server", ::utoipa::path(#args))]
        #[::tracing::instrument(name = #span_name, level = "debug", skip_all)]
        #vis #sig #block
    }
}

fn parse_stored_flag(args: TokenStream) -> syn::Result<bool> {
    if args.is_empty() {
        return Ok(false);
    }
    let ident: syn::Ident = syn::parse2(args)?;
    if ident == "stored" {
        Ok(true)
    } else {
        Err(syn::Error::new_spanned(ident, "unsupported argument; expected `stored`"))
    }
}

fn serde_policy(attrs: &[Attribute]) -> syn::Result<SerdePolicy> {
    let mut policy = SerdePolicy::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                policy.rename_all = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("deny_unknown_fields") {
                policy.deny_unknown_fields = true;
            } else if meta.input.peek(syn::Token![=]) {
                let _: syn::Expr = meta.value()?.parse()?;
            }
            Ok(())
        })?;
    }
    Ok(policy)
}

/// Last path segment of every derived trait (`serde::Serialize` → `Serialize`).
fn derived_traits(attrs: &[Attribute]) -> Vec<String> {
    let mut traits = Vec::new();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(segment) = meta.path.segments.last() {
                traits.push(segment.ident.to_string());
            }
            Ok(())
        });
    }
    traits
}

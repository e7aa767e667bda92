use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ItemStruct;

/// Splits `pub struct Catalog { .. }` into `CatalogInner` (the fields) and a cheap
/// `Catalog` handle around `Arc<CatalogInner>` that the kernel registry can store.
pub fn expand_slice(input: ItemStruct) -> TokenStream {
    let ItemStruct { attrs, vis, ident: handle, fields, .. } = input;
    let inner = format_ident!("{handle}Inner");
    let slice_name = handle.to_string().to_lowercase();

    quote! {
        #(#attrs)*
        #[derive(Debug, Clone)]
        #vis struct #inner #fields

        #[doc = concat!("Shared handle to [`", stringify!(#inner), "`].")]
        #[derive(Debug, Clone)]
        #vis struct #handle(std::sync::Arc<#inner>);

        impl #handle {
            /// Registry name of this slice.
            pub const NAME: &'static str = #slice_name;

            #[must_use]
            pub fn new(inner: #inner) -> Self {
                Self(std::sync::Arc::new(inner))
            }
        }

        impl std::ops::Deref for #handle {
            type Target = #inner;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::atelier_kernel::domain::registry::FeatureSlice for #handle {
            fn name(&self) -> &'static str {
                Self::NAME
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        impl From<#handle> for ::atelier_kernel::domain::registry::InitializedSlice {
            fn from(slice: #handle) -> Self {
                Self::new(slice)
            }
        }
    }
}

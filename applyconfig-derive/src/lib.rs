use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

const REQUIRED_FIELDS: [&str; 2] = ["type_meta", "object_meta"];

/// Implements `ObjectApplyConfiguration` for an apply configuration struct.
///
/// The struct must carry a `type_meta: TypeMetaApplyConfiguration` field and an
/// `object_meta: Option<ObjectMetaApplyConfiguration>` field; every metadata
/// mutator and getter then comes from the trait's default methods.
#[proc_macro_derive(ApplyConfiguration)]
pub fn derive_apply_configuration(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = input.ident;

    let mut found = Vec::new();
    if let Data::Struct(data_struct) = &input.data {
        if let Fields::Named(fields_named) = &data_struct.fields {
            for field in &fields_named.named {
                if let Some(ident) = &field.ident {
                    if REQUIRED_FIELDS.iter().any(|required| ident == required) {
                        found.push(ident.to_string());
                    }
                }
            }
        }
    }

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|required| !found.iter().any(|f| f == required))
        .collect();
    if !missing.is_empty() {
        return syn::Error::new_spanned(
            name,
            format!(
                "#[derive(ApplyConfiguration)] requires the field(s): {}",
                missing.join(", ")
            ),
        )
        .to_compile_error()
        .into();
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let expanded = quote! {
        impl #impl_generics crate::applyconfigurations::meta::v1::ObjectApplyConfiguration for #name #ty_generics #where_clause {
            fn type_meta(&self) -> &crate::applyconfigurations::meta::v1::TypeMetaApplyConfiguration {
                &self.type_meta
            }
            fn type_meta_mut(&mut self) -> &mut crate::applyconfigurations::meta::v1::TypeMetaApplyConfiguration {
                &mut self.type_meta
            }
            fn object_meta(&self) -> ::std::option::Option<&crate::applyconfigurations::meta::v1::ObjectMetaApplyConfiguration> {
                self.object_meta.as_ref()
            }
            fn object_meta_mut(&mut self) -> &mut ::std::option::Option<crate::applyconfigurations::meta::v1::ObjectMetaApplyConfiguration> {
                &mut self.object_meta
            }
        }
    };

    TokenStream::from(expanded)
}

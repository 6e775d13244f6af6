mod field;

use darling::{
    FromDeriveInput,
    ast::{Data, Fields},
};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{DeriveInput, ExprPath, Generics, Ident, parse_macro_input};

use crate::field::{Binding, EnvField};

#[proc_macro_derive(EnvBind, attributes(env))]
pub fn derive_env_bind(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match impl_derive(input) {
        Ok(output) => output.into(),
        Err(err) => err.write_errors().into(),
    }
}

fn impl_derive(input: DeriveInput) -> darling::Result<TokenStream> {
    let receiver = EnvBindReceiver::from_derive_input(&input)?;

    receiver.validate()?;

    Ok(receiver.to_token_stream())
}

/// `#[env(constructor = path, default)]` on the struct.
///
/// Declaring either one makes the struct a class: built through `constructor`
/// if its parameters are the bound fields in order, otherwise through
/// `Default` followed by assignment. Without both the struct is a record and
/// every field must be bound.
#[derive(FromDeriveInput)]
#[darling(attributes(env), supports(struct_named))]
struct EnvBindReceiver {
    ident: Ident,
    generics: Generics,
    data: Data<(), EnvField>,
    constructor: Option<ExprPath>,
    #[darling(default)]
    default: bool,
}

struct ConstTokens {
    private_path: TokenStream,
}

impl ToTokens for EnvBindReceiver {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let consts = ConstTokens {
            private_path: quote!(__envbind::__private),
        };

        let impl_struct = self.impl_struct(&consts);
        let impl_env_bind = self.impl_env_bind(&consts);

        tokens.extend(quote! {
            const _: () = {
                extern crate envbind as __envbind;

                #impl_struct

                #impl_env_bind
            };
        });
    }
}

impl EnvBindReceiver {
    fn validate(&self) -> darling::Result<()> {
        let mut errors = darling::Error::accumulator();

        if !self.generics.params.is_empty() {
            errors.push(
                darling::Error::custom("EnvBind derive does not support generic structs")
                    .with_span(&self.generics.params),
            );
        }

        errors.finish()
    }

    fn is_record(&self) -> bool {
        self.constructor.is_none() && !self.default
    }

    fn impl_struct(&self, consts: &ConstTokens) -> TokenStream {
        let struct_name = &self.ident;
        let private_path = &consts.private_path;

        quote! {
            impl #struct_name {
                pub fn from_env() -> ::core::result::Result<Self, #private_path::LoadError> {
                    #private_path::load::<Self>()
                }

                pub fn from_lookup<L>(lookup: &L) -> ::core::result::Result<Self, #private_path::LoadError>
                where
                    L: #private_path::Lookup + ?Sized,
                {
                    #private_path::load_from::<Self, L>(lookup)
                }

                pub fn requirements() -> ::std::string::String {
                    #private_path::requirements::<Self>()
                }
            }
        }
    }

    fn impl_env_bind(&self, consts: &ConstTokens) -> TokenStream {
        let struct_name = &self.ident;
        let private_path = &consts.private_path;

        let description = self.description(consts);
        let construct = self.construct_body(consts);
        let instantiate = if self.default {
            quote!(::core::option::Option::Some(<Self as ::core::default::Default>::default()))
        } else {
            quote!(::core::option::Option::None)
        };
        let assign = self.assign_body(consts);

        quote! {
            impl #private_path::EnvBind for #struct_name {
                fn description() -> &'static #private_path::TypeDescription {
                    static DESCRIPTION: ::std::sync::OnceLock<#private_path::TypeDescription> =
                        ::std::sync::OnceLock::new();
                    DESCRIPTION.get_or_init(|| #description)
                }

                #[allow(unused_mut, unused_variables)]
                fn construct(
                    mut args: #private_path::Arguments,
                ) -> ::core::result::Result<Self, #private_path::TypeConfigurationError> {
                    #construct
                }

                fn instantiate() -> ::core::option::Option<Self> {
                    #instantiate
                }

                #[allow(unused_variables)]
                fn assign(
                    &mut self,
                    index: usize,
                    value: #private_path::Value,
                ) -> ::core::result::Result<(), #private_path::TypeConfigurationError> {
                    #assign
                }
            }
        }
    }

    fn description(&self, consts: &ConstTokens) -> TokenStream {
        let private_path = &consts.private_path;
        let type_name = self.ident.to_string();

        let shape = if self.is_record() {
            quote!(#private_path::Shape::Record)
        } else {
            let default_constructible = self.default;
            let constructor = if self.constructor.is_some() {
                let params = self.bound_fields().map(|(field, _)| {
                    let ty = &field.ty;
                    quote!(<#ty as #private_path::BindValue>::TAG)
                });
                quote!(::core::option::Option::Some(::std::vec![#(#params),*]))
            } else {
                quote!(::core::option::Option::None)
            };

            quote! {
                #private_path::Shape::Class {
                    constructor: #constructor,
                    default_constructible: #default_constructible,
                }
            }
        };

        let fields = self.fields().iter().map(|field| {
            let name = field.ident.to_string();
            let ty = &field.ty;

            match &field.binding {
                Some(binding) => {
                    let tag = quote!(<#ty as #private_path::BindValue>::TAG);
                    let rule = binding_rule(consts, binding);
                    let immutable = binding.immutable;

                    quote! {
                        #private_path::FieldDescription {
                            name: #name,
                            tag: #tag,
                            immutable: #immutable,
                            binding: ::core::option::Option::Some(#rule),
                        }
                    }
                }
                // Unbound fields need not implement `BindValue`.
                None => quote! {
                    #private_path::FieldDescription {
                        name: #name,
                        tag: #private_path::TypeTag::new(
                            #private_path::Kind::Other(::core::stringify!(#ty)),
                        ),
                        immutable: false,
                        binding: ::core::option::Option::None,
                    }
                },
            }
        });

        quote! {
            #private_path::TypeDescription {
                type_name: #type_name,
                shape: #shape,
                fields: ::std::vec![#(#fields),*],
            }
        }
    }

    fn construct_body(&self, consts: &ConstTokens) -> TokenStream {
        let private_path = &consts.private_path;
        let type_name = self.ident.to_string();

        let take = |field: &EnvField| {
            let name = field.ident.to_string();
            let ty = &field.ty;
            quote!(args.take::<#ty>(#name)?)
        };

        if let Some(constructor) = &self.constructor {
            let args = self.bound_fields().map(|(field, _)| take(field));

            return quote! {
                ::core::result::Result::Ok(#constructor(#(#args),*))
            };
        }

        let fields = self.fields();
        let bound = self.bound_fields().count();

        if self.is_record() && bound == fields.len() {
            let inits = fields.iter().map(|field| {
                let ident = &field.ident;
                let value = take(field);
                quote!(#ident: #value)
            });

            quote! {
                ::core::result::Result::Ok(Self {
                    #(#inits,)*
                })
            }
        } else if self.is_record() {
            let total = fields.len();

            quote! {
                ::core::result::Result::Err(#private_path::TypeConfigurationError::UnboundFields {
                    type_name: #type_name,
                    bound: #bound,
                    total: #total,
                })
            }
        } else {
            quote! {
                ::core::result::Result::Err(#private_path::TypeConfigurationError::NoSuitableConstructor {
                    type_name: #type_name,
                })
            }
        }
    }

    fn assign_body(&self, consts: &ConstTokens) -> TokenStream {
        let private_path = &consts.private_path;
        let type_name = self.ident.to_string();

        let arms = self.fields().iter().enumerate().filter_map(|(index, field)| {
            let binding = field.binding.as_ref()?;
            let ident = &field.ident;
            let name = ident.to_string();

            let arm = if binding.immutable {
                quote! {
                    #index => ::core::result::Result::Err(
                        #private_path::TypeConfigurationError::ImmutableField {
                            type_name: #type_name,
                            field: #name,
                        },
                    ),
                }
            } else {
                quote! {
                    #index => {
                        self.#ident = #private_path::BindValue::from_value(value, #name)?;
                        ::core::result::Result::Ok(())
                    }
                }
            };

            Some(arm)
        });

        quote! {
            match index {
                #(#arms)*
                index => ::core::result::Result::Err(
                    #private_path::TypeConfigurationError::UnknownField {
                        type_name: #type_name,
                        index,
                    },
                ),
            }
        }
    }

    fn bound_fields(&self) -> impl Iterator<Item = (&EnvField, &Binding)> {
        self.fields()
            .iter()
            .filter_map(|field| field.binding.as_ref().map(|binding| (field, binding)))
    }

    fn fields(&self) -> &Fields<EnvField> {
        let Data::Struct(fields) = &self.data else {
            unreachable!("darling only accepts named structs");
        };

        fields
    }
}

fn binding_rule(consts: &ConstTokens, binding: &Binding) -> TokenStream {
    let private_path = &consts.private_path;
    let keys = &binding.keys;
    let required = binding.required;
    let allow_blank = binding.allow_blank;
    let fallback = binding
        .fallback
        .as_ref()
        .map(|fallback| quote!(.fallback(#fallback)));

    quote! {
        #private_path::BindingRule::new([#(#keys),*])
            .required(#required)
            .allow_blank(#allow_blank)
            #fallback
    }
}

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitInt, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
};

pub(crate) fn expand_record(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`Record` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`Record` may only be derived on structs with named fields.",
        ))?
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .collect::<Result<Vec<_>>>()?;

    let decoders = fields.iter().map(|FieldMetadata { name, framing }| {
        let value = match framing {
            Framing::Record => quote! {
                ::bytewise::Record::decode(cursor)?
            },
            Framing::Prefix { width, encoding } => quote! {
                cursor.read_string_by_length(
                    ::bytewise::Prefix::#width,
                    ::bytewise::TextEncoding::#encoding,
                )?
            },
            Framing::Terminated {
                encoding,
                include_nul,
            } => quote! {
                cursor.read_string_with(::bytewise::TextEncoding::#encoding, #include_nul)?
            },
        };

        quote! { #name: #value, }
    });

    let encoders = fields.iter().map(|FieldMetadata { name, framing }| match framing {
        Framing::Record => quote! {
            ::bytewise::Record::encode(&self.#name, encoder)?;
        },
        Framing::Prefix { width, encoding } => quote! {
            encoder.put_str_by_length(
                &self.#name,
                ::bytewise::Prefix::#width,
                ::bytewise::TextEncoding::#encoding,
            )?;
        },
        Framing::Terminated { encoding, .. } => quote! {
            encoder.put_str_terminated_with(&self.#name, ::bytewise::TextEncoding::#encoding);
        },
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::bytewise::Record for #name #ty_generics #where_clause {
            fn decode(
                cursor: &mut ::bytewise::decode::Cursor<'_>,
            ) -> ::core::result::Result<Self, ::bytewise::Error> {
                ::core::result::Result::Ok(Self {
                    #(#decoders)*
                })
            }

            fn encode(
                &self,
                encoder: &mut ::bytewise::Encoder,
            ) -> ::core::result::Result<(), ::bytewise::Error> {
                #(#encoders)*
                ::core::result::Result::Ok(())
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    framing: Framing,
}

#[derive(Debug)]
enum Framing {
    Record,
    Prefix { width: Ident, encoding: Ident },
    Terminated { encoding: Ident, include_nul: bool },
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Self> {
        let Some(name) = field.ident.clone() else {
            Err(Error::new_spanned(field, "Field must be named."))?
        };

        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("text")) else {
            return Ok(Self {
                name,
                framing: Framing::Record,
            });
        };

        let list = attr.meta.require_list()?;
        let properties: Punctuated<TextProperty, Token![,]> =
            list.parse_args_with(Punctuated::parse_terminated)?;

        let mut width = None;
        let mut terminated = false;
        let mut include_nul = None;
        let mut encoding = None;

        for property in properties {
            match property {
                TextProperty::Prefix(literal) => {
                    let ident = match literal.base10_parse::<u8>()? {
                        1 => "One",
                        2 => "Two",
                        _ => Err(Error::new_spanned(
                            &literal,
                            "Length prefix must be 1 or 2 bytes wide.",
                        ))?,
                    };

                    width = Some(Ident::new(ident, literal.span()));
                }
                TextProperty::Terminated => terminated = true,
                TextProperty::IncludeNul(ident) => include_nul = Some(ident),
                TextProperty::Encoding(ident) => encoding = Some(ident),
            }
        }

        let encoding = encoding.unwrap_or_else(|| Ident::new("Utf16Le", attr.path().span()));

        let framing = match (width, terminated) {
            (Some(width), false) => {
                if let Some(ident) = include_nul {
                    Err(Error::new_spanned(
                        ident,
                        "`include_nul` only applies to terminated strings.",
                    ))?;
                }

                Framing::Prefix { width, encoding }
            }
            (None, true) => Framing::Terminated {
                encoding,
                include_nul: include_nul.is_some(),
            },
            _ => Err(Error::new_spanned(
                attr,
                "String must be either length-prefixed or terminated.",
            ))?,
        };

        Ok(Self { name, framing })
    }
}

#[derive(Debug)]
enum TextProperty {
    Prefix(LitInt),
    Terminated,
    IncludeNul(Ident),
    Encoding(Ident),
}

impl Parse for TextProperty {
    fn parse(input: ParseStream) -> Result<Self> {
        let key = input.parse::<Ident>()?;

        let property = if key == "prefix" {
            input.parse::<Token![=]>()?;
            TextProperty::Prefix(input.parse()?)
        } else if key == "encoding" {
            input.parse::<Token![=]>()?;
            TextProperty::Encoding(input.parse()?)
        } else if key == "terminated" {
            TextProperty::Terminated
        } else if key == "include_nul" {
            TextProperty::IncludeNul(key)
        } else {
            Err(Error::new_spanned(
                key,
                "Text property must be `prefix`, `terminated`, `include_nul` or `encoding`.",
            ))?
        };

        Ok(property)
    }
}

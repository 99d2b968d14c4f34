//! Implementation of `#[derive(Reflect)]`.
//!
//! The derive builds a constant member table from the struct's named fields
//! plus any computed properties declared on the container, and a
//! `member_value` match that reads each member by name.

use std::collections::HashSet;

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Lit, LitStr, Path, Result, Type};

/// Container-level attributes: `#[reflect(rich_format, name = "...", property(...))]`
#[derive(Default)]
struct ContainerAttrs {
    rich_format: bool,
    name: Option<String>,
    properties: Vec<PropertyAttrs>,
}

/// One `property(name = "...", with = "...", sequence)` entry.
struct PropertyAttrs {
    name: String,
    with: Path,
    sequence: bool,
    span: Span,
}

/// Field-level attributes: `#[reflect(skip)]`, `#[reflect(rename = "...")]`
#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<String>,
}

/// A member as it will appear in the generated registry.
enum Member<'a> {
    Field {
        name: String,
        ident: &'a syn::Ident,
        ty: &'a Type,
    },
    Property(&'a PropertyAttrs),
}

impl Member<'_> {
    fn name(&self) -> &str {
        match self {
            Member::Field { name, .. } => name,
            Member::Property(property) => &property.name,
        }
    }
}

fn parse_string(lit: Lit) -> Result<String> {
    if let Lit::Str(s) = lit {
        Ok(s.value())
    } else {
        Err(Error::new(lit.span(), "expected string literal"))
    }
}

fn parse_container_attrs(input: &DeriveInput) -> Result<ContainerAttrs> {
    let mut attrs = ContainerAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let ident = meta.path.get_ident().map(|i| i.to_string());
            match ident.as_deref() {
                Some("rich_format") => {
                    attrs.rich_format = true;
                }
                Some("name") => {
                    let value: Lit = meta.value()?.parse()?;
                    attrs.name = Some(parse_string(value)?);
                }
                Some("property") => {
                    let span = meta.path.span();
                    let mut name = None;
                    let mut with = None;
                    let mut sequence = false;

                    meta.parse_nested_meta(|inner| {
                        let ident = inner.path.get_ident().map(|i| i.to_string());
                        match ident.as_deref() {
                            Some("name") => {
                                let value: Lit = inner.value()?.parse()?;
                                name = Some(parse_string(value)?);
                            }
                            Some("with") => {
                                let value: LitStr = inner.value()?.parse()?;
                                with = Some(value.parse::<Path>()?);
                            }
                            Some("sequence") => {
                                sequence = true;
                            }
                            _ => {
                                return Err(Error::new(
                                    inner.path.span(),
                                    "unknown property attribute, expected one of: name, with, sequence",
                                ));
                            }
                        }
                        Ok(())
                    })?;

                    let name = name.ok_or_else(|| Error::new(span, "property is missing `name = \"...\"`"))?;
                    let with = with.ok_or_else(|| Error::new(span, "property is missing `with = \"path\"`"))?;
                    attrs.properties.push(PropertyAttrs {
                        name,
                        with,
                        sequence,
                        span,
                    });
                }
                _ => {
                    return Err(Error::new(
                        meta.path.span(),
                        "unknown attribute, expected one of: rich_format, name, property",
                    ));
                }
            }
            Ok(())
        })?;
    }

    Ok(attrs)
}

fn parse_field_attrs(attrs: &[syn::Attribute]) -> Result<FieldAttrs> {
    let mut field_attrs = FieldAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("reflect") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let ident = meta.path.get_ident().map(|i| i.to_string());
            match ident.as_deref() {
                Some("skip") => {
                    field_attrs.skip = true;
                }
                Some("rename") => {
                    let value: Lit = meta.value()?.parse()?;
                    field_attrs.rename = Some(parse_string(value)?);
                }
                _ => {
                    return Err(Error::new(
                        meta.path.span(),
                        "unknown field attribute, expected `skip` or `rename`",
                    ));
                }
            }
            Ok(())
        })?;
    }

    Ok(field_attrs)
}

/// Main implementation of the Reflect derive macro
pub fn reflect_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(Error::new(
                input.span(),
                "Reflect can only be derived for structs",
            ))
        }
    };

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Reflect cannot be derived for generic structs; implement it by hand",
        ));
    }

    let container = parse_container_attrs(&input)?;

    let mut members: Vec<Member> = Vec::new();
    match &data.fields {
        Fields::Named(named) => {
            for field in &named.named {
                let attrs = parse_field_attrs(&field.attrs)?;
                if attrs.skip {
                    continue;
                }
                let Some(ident) = field.ident.as_ref() else {
                    continue;
                };
                members.push(Member::Field {
                    name: attrs.rename.unwrap_or_else(|| ident.to_string()),
                    ident,
                    ty: &field.ty,
                });
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(_) => {
            return Err(Error::new(
                data.fields.span(),
                "Reflect requires named fields",
            ))
        }
    }
    members.extend(container.properties.iter().map(Member::Property));

    let mut seen = HashSet::new();
    for member in &members {
        if member.name().is_empty() {
            return Err(Error::new(input.span(), "member names cannot be empty"));
        }
        if !seen.insert(member.name().to_string()) {
            let span = match member {
                Member::Field { ident, .. } => ident.span(),
                Member::Property(property) => property.span,
            };
            return Err(Error::new(
                span,
                format!("duplicate member name `{}`", member.name()),
            ));
        }
    }

    let infos: Vec<TokenStream> = members
        .iter()
        .map(|member| match member {
            Member::Field { name, ty, .. } => quote! {
                ::richstring::MemberInfo::field(#name, <#ty as ::richstring::AsValue>::SEQUENCE)
            },
            Member::Property(property) => {
                let name = &property.name;
                let sequence = property.sequence;
                quote! {
                    ::richstring::MemberInfo::property(#name, #sequence)
                }
            }
        })
        .collect();

    let arms: Vec<TokenStream> = members
        .iter()
        .map(|member| match member {
            Member::Field { name, ident, .. } => quote! {
                #name => ::richstring::AsValue::as_value(&self.#ident),
            },
            Member::Property(property) => {
                let name = &property.name;
                let with = &property.with;
                quote! {
                    #name => #with(self),
                }
            }
        })
        .collect();

    let type_name = container
        .name
        .unwrap_or_else(|| struct_name.to_string());

    let rich_format = if container.rich_format {
        quote! {
            fn rich_format(&self) -> ::core::option::Option<&dyn ::richstring::RichFormat> {
                ::core::option::Option::Some(self)
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        impl ::richstring::Reflect for #struct_name {
            fn type_name(&self) -> &'static str {
                #type_name
            }

            fn members(&self) -> &'static [::richstring::MemberInfo] {
                const MEMBERS: &[::richstring::MemberInfo] = &[#(#infos),*];
                MEMBERS
            }

            #[allow(unused_variables)]
            fn member_value(&self, name: &str) -> ::richstring::Value<'_> {
                match name {
                    #(#arms)*
                    _ => ::richstring::Value::None,
                }
            }

            #rich_format
        }

        impl ::richstring::AsValue for #struct_name {
            fn as_value(&self) -> ::richstring::Value<'_> {
                ::richstring::Value::Object(self)
            }
        }
    })
}

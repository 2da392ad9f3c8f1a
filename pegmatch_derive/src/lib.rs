use proc_macro2::{Ident, Span, TokenStream};
use proc_macro_crate::FoundCrate;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, Index, Meta,
    NestedMeta,
};

fn crate_name() -> TokenStream {
    match proc_macro_crate::crate_name("pegmatch") {
        // The library declares `extern crate self as pegmatch`, so the absolute path
        // also resolves inside its own unit tests.
        Ok(FoundCrate::Itself) | Err(_) => quote!(::pegmatch),
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!( ::#ident )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Sequence,
    Choice,
}

fn parse_mode(attrs: &[Attribute]) -> syn::Result<Mode> {
    let mut mode = Mode::Sequence;
    for attr in attrs.iter().filter(|a| a.path.is_ident("parse")) {
        let Meta::List(list) = attr.parse_meta()? else {
            return Err(syn::Error::new(
                attr.span(),
                "expected `#[parse(sequence)]` or `#[parse(choice)]`",
            ));
        };
        for nested in &list.nested {
            match nested {
                NestedMeta::Meta(Meta::Path(path)) if path.is_ident("sequence") => {
                    mode = Mode::Sequence;
                }
                NestedMeta::Meta(Meta::Path(path)) if path.is_ident("choice") => {
                    mode = Mode::Choice;
                }
                _ => {
                    return Err(syn::Error::new(
                        nested.span(),
                        "unknown `parse` option, expected `sequence` or `choice`",
                    ))
                }
            }
        }
    }
    Ok(mode)
}

/// Implements `Parse` for a struct whose fields are parsers.
///
/// By default the fields are matched as a sequence in declaration order.
/// With `#[parse(choice)]` they are tried in order as an ordered choice.
#[proc_macro_derive(Parse, attributes(parse))]
pub fn derive_parse_trait(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(expanded) => proc_macro::TokenStream::from(expanded),
        Err(e) => proc_macro::TokenStream::from(e.to_compile_error()),
    }
}

fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let pegmatch = crate_name();
    let mode = parse_mode(&input.attrs)?;
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "`Parse` can only be derived for structs; use `#[parse(choice)]` for alternatives",
            ))
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "`Parse` can only be derived for structs",
            ))
        }
    };

    let name = &input.ident;
    let (_, ty_generics, _) = input.generics.split_for_impl();
    let mut generics = input.generics.clone();
    generics
        .params
        .push(parse_quote!(__C: #pegmatch::Cursor));
    let where_clause = generics.make_where_clause();
    for field in fields.iter() {
        let ty = &field.ty;
        where_clause
            .predicates
            .push(parse_quote!(#ty: #pegmatch::Parse<__C>));
    }
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    let parse = generate_parse_fun_body(&pegmatch, fields, mode);
    Ok(quote! {
        impl #impl_generics #pegmatch::Parse<__C> for #name #ty_generics #where_clause {
            fn parse(&self, cursor: &mut __C) -> bool {
                #parse
            }
        }
    })
}

fn generate_parse_fun_body(pegmatch: &TokenStream, fields: &Fields, mode: Mode) -> TokenStream {
    let parse = fields.iter().enumerate().map(|(i, f)| {
        let member = match &f.ident {
            Some(ident) => quote!(#ident),
            None => {
                let index = Index::from(i);
                quote!(#index)
            }
        };
        quote_spanned! { f.span() => #pegmatch::Parse::<__C>::parse(&self.#member, cursor) }
    });

    match (mode, fields.iter().next().is_none()) {
        (Mode::Sequence, true) => quote! {
            let _ = cursor;
            true
        },
        (Mode::Choice, true) => quote! {
            let _ = cursor;
            false
        },
        (Mode::Sequence, false) => quote! {
            let start = #pegmatch::Cursor::snapshot(cursor);
            if #( #parse )&&* {
                true
            } else {
                #pegmatch::Cursor::restore(cursor, start);
                false
            }
        },
        (Mode::Choice, false) => quote! {
            #( #parse )||*
        },
    }
}

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{self, Attribute, Data, DeriveInput, Field, Fields, Ident, LitStr, Type, TypePath, Variant, parse_quote, punctuated::Punctuated, token::Comma};

///Turns an enum of svg tags into typed attribute records.
///
///Every variant lists the attribute types of one tag. A struct with the same
///name is generated in the `attributes` module, holding an `Option` per
///attribute, plus `from_attributes` which parses each attribute value with
///`FromStr`. The enum variants are rewritten to wrap those structs and the enum
///gains `from_tag`, dispatching on the tag name.
///
///Field names are the snake_case type names, markup names the kebab-case type
///names. Both the tag name and an attribute name can be overridden with
///`#[name("...")]`.
///
///The generated code expects `Attributes` and `AttributeError` to be in scope
///where the enum is declared.
#[proc_macro_attribute]
pub fn svg_tag(_attributes: TokenStream, items: TokenStream) -> TokenStream {
    let mut ast = match syn::parse::<DeriveInput>(items) {
	Ok(ast) => ast,
	Err(e) => return e.to_compile_error().into(),
    };

    match impl_svg_tag(&mut ast) {
	Ok(r) => r.into(),
	Err(e) => e.to_compile_error().into(),
    }
}

fn split_words(input: &str, separator: char) -> String {
    let mut result = String::with_capacity(input.len() + 4);
    let mut after_lower = false;

    for c in input.chars() {
	if c.is_ascii_uppercase() && after_lower {
	    result.push(separator);
	}
	after_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
	result.push(c.to_ascii_lowercase());
    }

    result
}

fn snake_case(input: &str) -> String {
    split_words(input, '_')
}

fn kebab_case(input: &str) -> String {
    split_words(input, '-')
}

///Removes a `#[name("...")]` attribute from `attrs` and returns its value.
fn consume_explicit_name(attrs: &mut Vec<Attribute>) -> syn::Result<Option<LitStr>> {
    let name_attr_pos = match attrs.iter().position(|attr| attr.path.is_ident("name")) {
	Some(pos) => pos,
	None => return Ok(None),
    };

    let name_attr = attrs.remove(name_attr_pos);
    name_attr.parse_args::<LitStr>().map(Some)
}

struct AttributeField {
    ident: Ident,
    markup_name: LitStr,
    ty: TypePath,
}

fn parse_fields(fields: &mut Punctuated<Field, Comma>) -> syn::Result<Vec<AttributeField>> {
    let mut result = Vec::with_capacity(fields.len());

    for field in fields.iter_mut() {
	let explicit_name = consume_explicit_name(&mut field.attrs)?;

	let type_path = match &field.ty {
	    Type::Path(tp) => tp.clone(),
	    other => return Err(syn::Error::new_spanned(other, "fields must only contain type paths")),
	};

	let type_name = match type_path.path.segments.last() {
	    Some(seg) => seg.ident.to_string(),
	    None => return Err(syn::Error::new_spanned(&type_path, "empty type path")),
	};

	let markup_name = explicit_name
	    .unwrap_or_else(|| LitStr::new(&kebab_case(&type_name), Span::call_site()));

	result.push(AttributeField {
	    ident: format_ident!("{}", snake_case(&type_name)),
	    markup_name,
	    ty: type_path,
	});
    }

    Ok(result)
}

struct ParsedVariants {
    attribute_types: proc_macro2::TokenStream,
    variants: Punctuated<Variant, Comma>,
    idents: Vec<Ident>,
    tag_names: Vec<LitStr>,
}

///Generates one attributes struct per variant of the tag enum and the
///rewritten variants wrapping them.
fn parse_variants(mod_name: &Ident,
		  variants: &Punctuated<Variant, Comma>,
		  tag_def: &DeriveInput)
		  -> syn::Result<ParsedVariants>
{
    let derives: Vec<&Attribute> = tag_def.attrs.iter()
	.filter(|attr| attr.path.is_ident("derive"))
	.collect();

    let mut attribute_types = Vec::new();
    let mut new_variants = Punctuated::new();
    let mut idents = Vec::new();
    let mut tag_names = Vec::new();

    for v in variants.iter() {
	let mut variant_attrs = v.attrs.clone();
	let tag_name = consume_explicit_name(&mut variant_attrs)?
	    .unwrap_or_else(|| LitStr::new(&v.ident.to_string().to_lowercase(), Span::call_site()));

	let mut fields = match v.fields.clone() {
	    Fields::Unnamed(fs) => fs.unnamed,
	    Fields::Unit => Punctuated::new(),
	    Fields::Named(fs) => return Err(syn::Error::new_spanned(fs, "must use unnamed fields")),
	};
	let fields = parse_fields(&mut fields)?;

	let name = &v.ident;
	let field_idents: Vec<&Ident> = fields.iter().map(|f| &f.ident).collect();
	let markup_names: Vec<&LitStr> = fields.iter().map(|f| &f.markup_name).collect();
	let field_types: Vec<&TypePath> = fields.iter().map(|f| &f.ty).collect();

	attribute_types.push(quote! {
	    #(#derives)*
	    #(#variant_attrs)*
	    #[derive(Default)]
	    pub struct #name {
		#(pub #field_idents : Option<#field_types>),*
	    }

	    impl #name {
		pub const TAG: &'static str = #tag_name;

		pub fn new() -> Self {
		    Self::default()
		}

		#[allow(unused_mut, unused_variables)]
		pub fn from_attributes(attributes: &Attributes) -> Result<Self, AttributeError> {
		    let mut result = Self::new();

		    #(
			if let Some(value) = attributes.get(#markup_names) {
			    let value: &str = value;
			    let parsed = value.parse::<#field_types>()
				.map_err(|err| AttributeError::new(Self::TAG, #markup_names, value, &err))?;
			    result.#field_idents = Some(parsed);
			}
		    )*

		    Ok(result)
		}
	    }
	});

	let mut new_variant = v.clone();
	new_variant.attrs = Vec::new();
	new_variant.fields = Fields::Unnamed(parse_quote!((#mod_name::#name)));
	new_variants.push(new_variant);

	idents.push(name.clone());
	tag_names.push(tag_name);
    }

    let attribute_types = quote! {
	pub mod #mod_name {
	    use super::*;

	    #(
		#attribute_types
	    )*
	}
    };

    Ok(ParsedVariants {
	attribute_types,
	variants: new_variants,
	idents,
	tag_names,
    })
}

fn impl_svg_tag(tag: &mut DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if !tag.generics.params.is_empty() || tag.generics.where_clause.is_some() {
	return Err(syn::Error::new_spanned(&tag.generics, "generic tag enums are not supported"));
    }

    let data_enum = match &tag.data {
	Data::Enum(data_enum) => data_enum,
	_ => return Err(syn::Error::new_spanned(&tag.ident, "must be defined with an enum")),
    };

    let mod_name = Ident::new("attributes", Span::call_site());
    let parsed = parse_variants(&mod_name, &data_enum.variants, tag)?;

    if let Data::Enum(de) = &mut tag.data {
	de.variants = parsed.variants;
    }

    let enum_name = &tag.ident;
    let attribute_types = &parsed.attribute_types;
    let idents = &parsed.idents;
    let tag_names = &parsed.tag_names;

    let result = quote! {
	#attribute_types

	#tag

	impl #enum_name {
	    ///Parses the attributes of a supported tag. Unsupported tags yield `None`.
	    pub fn from_tag(name: &str, attributes: &Attributes) -> Result<Option<Self>, AttributeError> {
		let tag = match name {
		    #( #tag_names => #enum_name::#idents(#mod_name::#idents::from_attributes(attributes)?), )*
		    _ => return Ok(None),
		};

		Ok(Some(tag))
	    }

	    pub fn name(&self) -> &'static str {
		match self {
		    #( #enum_name::#idents(_) => #tag_names, )*
		}
	    }
	}
    };

    Ok(result)
}

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, Fields, Lit, LitStr, Meta, Token, Type};

/// Derive macro that describes the flat record layout of a struct.
///
/// For each named field, extracts:
/// - Column name (respects #[serde(rename = "...")])
/// - Required (false for Option<T> or #[serde(default)])
/// - Kind ("number", "boolean", "text" or the type name)
/// - Description (from doc comments)
///
/// Generates a `field_schema() -> &'static [FieldSpec]` method. `FieldSpec`
/// must be in scope where the derive is used.
#[proc_macro_derive(FieldSchema, attributes(serde))]
pub fn derive_field_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "FieldSchema requires named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "FieldSchema only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let entries = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let serde = SerdeField::from_attrs(&field.attrs);
        let column = serde.rename.unwrap_or_else(|| ident.to_string());
        let (optional, inner) = unwrap_option(&field.ty);
        let required = !optional && !serde.default;
        let kind = type_kind(inner);
        let description = doc_comment(&field.attrs);
        Some(quote! {
            FieldSpec {
                name: #column,
                required: #required,
                kind: #kind,
                description: #description,
            }
        })
    });

    let expanded = quote! {
        impl #name {
            pub fn field_schema() -> &'static [FieldSpec] {
                static SCHEMA: &[FieldSpec] = &[
                    #(#entries),*
                ];
                SCHEMA
            }
        }
    };

    TokenStream::from(expanded)
}

#[derive(Default)]
struct SerdeField {
    rename: Option<String>,
    default: bool,
}

impl SerdeField {
    fn from_attrs(attrs: &[syn::Attribute]) -> Self {
        let mut out = SerdeField::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            // Unsupported serde forms are skipped rather than rejected; serde
            // itself reports them.
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename = Some(lit.value());
                } else if meta.path.is_ident("default") {
                    out.default = true;
                    if meta.input.peek(Token![=]) {
                        let _: LitStr = meta.value()?.parse()?;
                    }
                } else if meta.input.peek(Token![=]) {
                    let _: Expr = meta.value()?.parse()?;
                }
                Ok(())
            });
        }
        out
    }
}

fn unwrap_option(ty: &Type) -> (bool, &Type) {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            if segment.ident == "Option" {
                if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                        return (true, inner);
                    }
                }
            }
        }
    }
    (false, ty)
}

fn type_kind(ty: &Type) -> String {
    let ident = match ty {
        Type::Path(type_path) => match type_path.path.segments.last() {
            Some(segment) => segment.ident.to_string(),
            None => return "text".to_string(),
        },
        _ => return "text".to_string(),
    };
    match ident.as_str() {
        "Decimal" | "f32" | "f64" | "u8" | "u16" | "u32" | "u64" | "usize" | "i8" | "i16"
        | "i32" | "i64" | "isize" => "number".to_string(),
        "bool" => "boolean".to_string(),
        "String" | "str" => "text".to_string(),
        other => other.to_lowercase(),
    }
}

fn doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(meta) => match &meta.value {
                Expr::Lit(expr_lit) => match &expr_lit.lit {
                    Lit::Str(lit_str) => Some(lit_str.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

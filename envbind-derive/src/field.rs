use darling::FromField;
use syn::{Attribute, Ident, LitBool, LitStr, Type};

/// A named field and whatever `#[env(...)]` declared on it.
pub struct EnvField {
    pub ident: Ident,
    pub ty: Type,
    pub binding: Option<Binding>,
}

/// `#[env(from = "...", ...)]`
pub struct Binding {
    pub keys: Vec<LitStr>,
    pub required: bool,
    pub allow_blank: bool,
    pub fallback: Option<LitStr>,
    pub immutable: bool,
}

#[derive(Default)]
struct Attrs {
    keys: Vec<LitStr>,
    required: Option<bool>,
    allow_blank: bool,
    fallback: Option<LitStr>,
    immutable: bool,
}

impl FromField for EnvField {
    fn from_field(field: &syn::Field) -> darling::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| darling::Error::unsupported_shape("unnamed fields").with_span(field))?;

        let mut errors = darling::Error::accumulator();
        let mut attrs: Option<Attrs> = None;

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("env")) {
            let parsed = attrs.get_or_insert_with(Attrs::default);
            if let Err(err) = parse_env_attr(attr, &ident, parsed) {
                errors.push(err);
            }
        }

        let binding = match attrs {
            None => None,
            Some(attrs) if attrs.keys.is_empty() => {
                errors.push(
                    darling::Error::custom("`#[env]` requires at least one `from`")
                        .with_span(&ident),
                );
                None
            }
            Some(attrs) => Some(Binding {
                keys: attrs.keys,
                required: attrs.required.unwrap_or(true),
                allow_blank: attrs.allow_blank,
                fallback: attrs.fallback,
                immutable: attrs.immutable,
            }),
        };

        errors.finish_with(EnvField {
            ident,
            ty: field.ty.clone(),
            binding,
        })
    }
}

fn parse_env_attr(attr: &Attribute, ident: &Ident, attrs: &mut Attrs) -> darling::Result<()> {
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("from") {
            // `from` on its own reads the upper-cased field name.
            let key = if meta.input.peek(syn::Token![=]) {
                meta.value()?.parse::<LitStr>()?
            } else {
                LitStr::new(&ident.to_string().to_uppercase(), ident.span())
            };
            if key.value().is_empty() {
                return Err(meta.error("`from` key must not be empty"));
            }
            attrs.keys.push(key);
        } else if meta.path.is_ident("required") {
            let required: LitBool = meta.value()?.parse()?;
            attrs.required = Some(required.value);
        } else if meta.path.is_ident("allow_blank") {
            attrs.allow_blank = if meta.input.peek(syn::Token![=]) {
                meta.value()?.parse::<LitBool>()?.value
            } else {
                true
            };
        } else if meta.path.is_ident("fallback") {
            if attrs.fallback.is_some() {
                return Err(meta.error("duplicate `fallback`"));
            }
            attrs.fallback = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("immutable") {
            attrs.immutable = true;
        } else {
            let path = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .unwrap_or_default();
            return Err(meta.error(format!("unsupported env attribute: {path}")));
        }

        Ok(())
    })
    .map_err(darling::Error::from)
}

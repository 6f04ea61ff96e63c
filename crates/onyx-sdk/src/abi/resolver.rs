//! ABI type resolution
//!
//! Raw type signatures from an ABI document are resolved into [`ParamType`]
//! descriptors by an ordered table of matchers. Each matcher owns a pattern
//! predicate over the raw signature plus a construction rule; the first
//! matcher whose pattern accepts the signature wins, so table order encodes
//! precedence (`str[N]` and `Vec<T>` must be tried before the struct
//! matcher, unit before tuple).

use std::collections::HashMap;

use serde::Deserialize;

use super::types::ParamType;
use crate::SdkError;

/// Concrete descriptors bound to generic parameter names
pub type GenericBindings = HashMap<String, ParamType>;

/// Raw type node as it appears in an ABI document.
///
/// Composite declarations carry their children in `components`; generic
/// declarations list their parameter names in `type_parameters` and use
/// sites supply `type_arguments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeApplication {
    /// Component name at the use site (field name, argument name)
    #[serde(default)]
    pub name: String,
    /// Raw type signature, e.g. `u64`, `str[4]`, `struct Point`
    #[serde(rename = "type")]
    pub type_signature: String,
    /// Child nodes: struct fields, tuple elements, the array element
    #[serde(default)]
    pub components: Vec<TypeApplication>,
    /// Declared generic parameter names, in order
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Concrete types supplied for the declared parameters, in order
    #[serde(default)]
    pub type_arguments: Vec<TypeApplication>,
}

impl TypeApplication {
    /// Node with just a signature, for programmatic construction
    pub fn of(type_signature: impl Into<String>) -> Self {
        Self {
            type_signature: type_signature.into(),
            ..Self::default()
        }
    }
}

struct TypeMatcher {
    matches: fn(&str) -> bool,
    build: fn(&TypeApplication, &GenericBindings) -> Result<ParamType, SdkError>,
}

// First match wins; keep narrow patterns ahead of the catch-all composites.
const MATCHERS: &[TypeMatcher] = &[
    TypeMatcher { matches: match_unit, build: build_unit },
    TypeMatcher { matches: match_bool, build: build_bool },
    TypeMatcher { matches: match_u8, build: build_u8 },
    TypeMatcher { matches: match_u16, build: build_u16 },
    TypeMatcher { matches: match_u32, build: build_u32 },
    TypeMatcher { matches: match_u64, build: build_u64 },
    TypeMatcher { matches: match_b256, build: build_b256 },
    TypeMatcher { matches: match_str_array, build: build_str_array },
    TypeMatcher { matches: match_vector, build: build_vector },
    TypeMatcher { matches: match_array, build: build_array },
    TypeMatcher { matches: match_tuple, build: build_tuple },
    TypeMatcher { matches: match_generic, build: build_generic },
    TypeMatcher { matches: match_struct, build: build_struct },
    TypeMatcher { matches: match_enum, build: build_enum },
];

/// Resolve a raw type node into a concrete descriptor.
///
/// Fails with [`SdkError::UnresolvedType`] when no matcher accepts the
/// signature. Generic parameters without a supplied argument stay as
/// [`ParamType::Generic`] placeholders and are rejected later, at encode
/// time.
pub fn resolve(app: &TypeApplication) -> Result<ParamType, SdkError> {
    resolve_with(app, &GenericBindings::new())
}

pub(crate) fn resolve_with(
    app: &TypeApplication,
    bindings: &GenericBindings,
) -> Result<ParamType, SdkError> {
    for matcher in MATCHERS {
        if (matcher.matches)(&app.type_signature) {
            return (matcher.build)(app, bindings);
        }
    }
    Err(SdkError::UnresolvedType(app.type_signature.clone()))
}

/// Replace generic placeholders with the bound concrete descriptors.
///
/// Names without a binding are left in place; encoding rejects them.
pub fn substitute(param: &ParamType, bindings: &GenericBindings) -> ParamType {
    match param {
        ParamType::Generic(name) => bindings
            .get(name)
            .cloned()
            .unwrap_or_else(|| param.clone()),
        ParamType::Array(elem, len) => {
            ParamType::Array(Box::new(substitute(elem, bindings)), *len)
        }
        ParamType::Vector(elem) => ParamType::Vector(Box::new(substitute(elem, bindings))),
        ParamType::Struct { name, fields } => ParamType::Struct {
            name: name.clone(),
            fields: fields.iter().map(|f| substitute(f, bindings)).collect(),
        },
        ParamType::Enum { name, variants } => ParamType::Enum {
            name: name.clone(),
            variants: variants.iter().map(|v| substitute(v, bindings)).collect(),
        },
        ParamType::Tuple(elems) => {
            ParamType::Tuple(elems.iter().map(|e| substitute(e, bindings)).collect())
        }
        _ => param.clone(),
    }
}

// ==================== Matchers ====================

fn match_unit(s: &str) -> bool {
    s == "()"
}

fn match_bool(s: &str) -> bool {
    s == "bool"
}

fn match_u8(s: &str) -> bool {
    s == "u8"
}

fn match_u16(s: &str) -> bool {
    s == "u16"
}

fn match_u32(s: &str) -> bool {
    s == "u32"
}

fn match_u64(s: &str) -> bool {
    s == "u64"
}

fn match_b256(s: &str) -> bool {
    s == "b256"
}

fn match_str_array(s: &str) -> bool {
    s.starts_with("str[") && s.ends_with(']')
}

fn match_vector(s: &str) -> bool {
    s == "Vec" || (s.starts_with("Vec<") && s.ends_with('>'))
}

fn match_array(s: &str) -> bool {
    s.starts_with('[') && s.ends_with(']')
}

fn match_tuple(s: &str) -> bool {
    s.starts_with('(') && s.ends_with(')')
}

fn match_generic(s: &str) -> bool {
    s.starts_with("generic ")
}

fn match_struct(s: &str) -> bool {
    s.starts_with("struct ")
}

fn match_enum(s: &str) -> bool {
    s.starts_with("enum ")
}

// ==================== Construction rules ====================

fn build_unit(_: &TypeApplication, _: &GenericBindings) -> Result<ParamType, SdkError> {
    Ok(ParamType::Unit)
}

fn build_bool(_: &TypeApplication, _: &GenericBindings) -> Result<ParamType, SdkError> {
    Ok(ParamType::Bool)
}

fn build_u8(_: &TypeApplication, _: &GenericBindings) -> Result<ParamType, SdkError> {
    Ok(ParamType::U8)
}

fn build_u16(_: &TypeApplication, _: &GenericBindings) -> Result<ParamType, SdkError> {
    Ok(ParamType::U16)
}

fn build_u32(_: &TypeApplication, _: &GenericBindings) -> Result<ParamType, SdkError> {
    Ok(ParamType::U32)
}

fn build_u64(_: &TypeApplication, _: &GenericBindings) -> Result<ParamType, SdkError> {
    Ok(ParamType::U64)
}

fn build_b256(_: &TypeApplication, _: &GenericBindings) -> Result<ParamType, SdkError> {
    Ok(ParamType::B256)
}

fn build_str_array(app: &TypeApplication, _: &GenericBindings) -> Result<ParamType, SdkError> {
    let len_str = &app.type_signature["str[".len()..app.type_signature.len() - 1];
    let len: usize = len_str
        .parse()
        .map_err(|_| SdkError::UnresolvedType(app.type_signature.clone()))?;
    Ok(ParamType::StrArray(len))
}

fn build_vector(app: &TypeApplication, bindings: &GenericBindings) -> Result<ParamType, SdkError> {
    // The element type comes from the use site's type argument; declarations
    // written without arguments fall back to a single component.
    let elements = if app.type_arguments.is_empty() {
        &app.components
    } else {
        &app.type_arguments
    };
    if elements.len() != 1 {
        return Err(SdkError::UnresolvedType(format!(
            "{}: vector takes exactly one element type, got {}",
            app.type_signature,
            elements.len()
        )));
    }
    let elem = resolve_with(&elements[0], bindings)?;
    Ok(ParamType::Vector(Box::new(elem)))
}

fn build_array(app: &TypeApplication, bindings: &GenericBindings) -> Result<ParamType, SdkError> {
    // "[_; N]"
    let inner = &app.type_signature[1..app.type_signature.len() - 1];
    let len_str = inner
        .rsplit(';')
        .next()
        .map(str::trim)
        .unwrap_or_default();
    let len: usize = len_str
        .parse()
        .map_err(|_| SdkError::UnresolvedType(app.type_signature.clone()))?;
    if app.components.len() != 1 {
        return Err(SdkError::UnresolvedType(format!(
            "{}: array takes exactly one element type, got {}",
            app.type_signature,
            app.components.len()
        )));
    }
    let elem = resolve_with(&app.components[0], bindings)?;
    Ok(ParamType::Array(Box::new(elem), len))
}

fn build_tuple(app: &TypeApplication, bindings: &GenericBindings) -> Result<ParamType, SdkError> {
    let elems = app
        .components
        .iter()
        .map(|c| resolve_with(c, bindings))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ParamType::Tuple(elems))
}

fn build_generic(app: &TypeApplication, bindings: &GenericBindings) -> Result<ParamType, SdkError> {
    let name = app.type_signature["generic ".len()..].trim();
    if name.is_empty() {
        return Err(SdkError::UnresolvedType(app.type_signature.clone()));
    }
    Ok(bindings
        .get(name)
        .cloned()
        .unwrap_or_else(|| ParamType::Generic(name.to_string())))
}

fn build_struct(app: &TypeApplication, bindings: &GenericBindings) -> Result<ParamType, SdkError> {
    let name = app.type_signature["struct ".len()..].trim().to_string();
    let fields = resolve_children(app, bindings)?;
    Ok(ParamType::Struct { name, fields })
}

fn build_enum(app: &TypeApplication, bindings: &GenericBindings) -> Result<ParamType, SdkError> {
    let name = app.type_signature["enum ".len()..].trim().to_string();
    let variants = resolve_children(app, bindings)?;
    Ok(ParamType::Enum { name, variants })
}

/// Resolve a composite's components under its generic bindings.
///
/// Supplied type arguments must match the declared parameter arity exactly;
/// declarations used without arguments keep their placeholders unbound.
fn resolve_children(
    app: &TypeApplication,
    outer: &GenericBindings,
) -> Result<Vec<ParamType>, SdkError> {
    let mut bindings = outer.clone();
    if !app.type_arguments.is_empty() {
        if app.type_arguments.len() != app.type_parameters.len() {
            return Err(SdkError::UnresolvedType(format!(
                "{}: expected {} type arguments, got {}",
                app.type_signature,
                app.type_parameters.len(),
                app.type_arguments.len()
            )));
        }
        for (param, arg) in app.type_parameters.iter().zip(&app.type_arguments) {
            let resolved = resolve_with(arg, outer)?;
            bindings.insert(param.clone(), resolved);
        }
    }

    app.components
        .iter()
        .map(|c| resolve_with(c, &bindings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(sig: &str) -> TypeApplication {
        TypeApplication::of(sig)
    }

    #[test]
    fn test_resolve_primitives() {
        assert_eq!(resolve(&app("u8")).unwrap(), ParamType::U8);
        assert_eq!(resolve(&app("u64")).unwrap(), ParamType::U64);
        assert_eq!(resolve(&app("bool")).unwrap(), ParamType::Bool);
        assert_eq!(resolve(&app("b256")).unwrap(), ParamType::B256);
        assert_eq!(resolve(&app("()")).unwrap(), ParamType::Unit);
    }

    #[test]
    fn test_resolve_str_array() {
        assert_eq!(resolve(&app("str[4]")).unwrap(), ParamType::StrArray(4));
        assert!(matches!(
            resolve(&app("str[x]")),
            Err(SdkError::UnresolvedType(_))
        ));
    }

    #[test]
    fn test_resolve_array() {
        let mut array = app("[_; 3]");
        array.components = vec![app("u64")];
        assert_eq!(
            resolve(&array).unwrap(),
            ParamType::Array(Box::new(ParamType::U64), 3)
        );
    }

    #[test]
    fn test_resolve_struct_with_fields() {
        let mut point = app("struct Point");
        point.components = vec![app("u64"), app("u64")];
        assert_eq!(
            resolve(&point).unwrap(),
            ParamType::Struct {
                name: "Point".to_string(),
                fields: vec![ParamType::U64, ParamType::U64],
            }
        );
    }

    #[test]
    fn test_str_matcher_precedes_struct_matcher() {
        // "str[8]" must never fall through to the struct rule
        assert_eq!(resolve(&app("str[8]")).unwrap(), ParamType::StrArray(8));
    }

    #[test]
    fn test_resolve_vector_arity() {
        let mut vec_app = app("Vec<u8>");
        vec_app.type_arguments = vec![app("u8")];
        assert_eq!(
            resolve(&vec_app).unwrap(),
            ParamType::Vector(Box::new(ParamType::U8))
        );

        let mut bad = app("Vec<u8>");
        bad.type_arguments = vec![app("u8"), app("u64")];
        assert!(matches!(resolve(&bad), Err(SdkError::UnresolvedType(_))));
    }

    #[test]
    fn test_resolve_tuple() {
        let mut pair = app("(_, _)");
        pair.components = vec![app("bool"), app("u64")];
        assert_eq!(
            resolve(&pair).unwrap(),
            ParamType::Tuple(vec![ParamType::Bool, ParamType::U64])
        );
    }

    #[test]
    fn test_unknown_type_fails() {
        assert!(matches!(
            resolve(&app("f64")),
            Err(SdkError::UnresolvedType(_))
        ));
    }

    #[test]
    fn test_generic_left_unbound() {
        let resolved = resolve(&app("generic T")).unwrap();
        assert_eq!(resolved, ParamType::Generic("T".to_string()));
    }

    #[test]
    fn test_generic_substituted_through_struct() {
        let mut wrapper = app("struct Wrapper");
        wrapper.type_parameters = vec!["T".to_string()];
        wrapper.type_arguments = vec![app("u32")];
        wrapper.components = vec![app("generic T")];

        assert_eq!(
            resolve(&wrapper).unwrap(),
            ParamType::Struct {
                name: "Wrapper".to_string(),
                fields: vec![ParamType::U32],
            }
        );
    }

    #[test]
    fn test_type_argument_arity_mismatch() {
        let mut wrapper = app("struct Wrapper");
        wrapper.type_parameters = vec!["T".to_string()];
        wrapper.type_arguments = vec![app("u32"), app("u64")];
        wrapper.components = vec![app("generic T")];

        assert!(matches!(
            resolve(&wrapper),
            Err(SdkError::UnresolvedType(_))
        ));
    }

    #[test]
    fn test_substitute_binds_generics() {
        let param = ParamType::Struct {
            name: "Wrapper".to_string(),
            fields: vec![ParamType::Generic("T".to_string())],
        };
        let mut bindings = GenericBindings::new();
        bindings.insert("T".to_string(), ParamType::U64);

        assert_eq!(
            substitute(&param, &bindings),
            ParamType::Struct {
                name: "Wrapper".to_string(),
                fields: vec![ParamType::U64],
            }
        );
    }
}

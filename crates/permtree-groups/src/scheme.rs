//! Naming schemes: JSON object trees whose leaves become permission paths.
//!
//! ```text
//! { "readFiles": "", "userProfile": { "edit": "" } }    // prefix "app"
//! { "_path": "app",
//!   "readFiles": "app.read-files",
//!   "userProfile": { "_path": "app.user-profile", "edit": "app.user-profile.edit" } }
//! ```

use permtree_core::{Error, PATH_SEPARATOR, Result, kebab_case};
use serde_json::{Map, Value};

/// Property every assembled object carries with its own path.
pub const PATH_PROPERTY: &str = "_path";

/// Assemble `scheme` in place under `base_prefix`.
///
/// A prefix containing a `.` is used verbatim, otherwise it is kebab-cased.
/// Property names are kebab-cased; string values are replaced by their full
/// path and nested objects are assembled recursively.
///
/// # Errors
///
/// Returns [`Error::UnsupportedScheme`] for any value that is neither a
/// string nor an object. Properties visited before the failure stay
/// assembled.
pub fn assemble_scheme(base_prefix: &str, scheme: &mut Map<String, Value>) -> Result<()> {
    let base = if base_prefix.contains(PATH_SEPARATOR) {
        base_prefix.to_owned()
    } else {
        kebab_case(base_prefix)
    };
    scheme.insert(PATH_PROPERTY.to_owned(), Value::String(base.clone()));

    for (property, value) in scheme.iter_mut() {
        if property == PATH_PROPERTY {
            continue;
        }
        let prefix = format!("{base}{PATH_SEPARATOR}{}", kebab_case(property));

        match value {
            Value::String(leaf) => *leaf = prefix,
            Value::Object(nested) => assemble_scheme(&prefix, nested)?,
            other => return Err(Error::unsupported_scheme(property.as_str(), kind_of(other))),
        }
    }
    Ok(())
}

/// Owned variant of [`assemble_scheme`] for an arbitrary JSON value.
///
/// # Errors
///
/// Returns [`Error::UnsupportedScheme`] if `scheme` is not an object or
/// contains an unsupported value.
pub fn assemble_scheme_value(base_prefix: &str, scheme: Value) -> Result<Value> {
    match scheme {
        Value::Object(mut map) => {
            assemble_scheme(base_prefix, &mut map)?;
            Ok(Value::Object(map))
        }
        other => Err(Error::unsupported_scheme(base_prefix, kind_of(&other))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

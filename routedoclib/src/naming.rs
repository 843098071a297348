//! Controller naming conventions.
//!
//! The host framework maps a snake-case controller path such as
//! `api/v1/order_items` to a nested type `Api::V1::OrderItemsController`.
//! [`controller_class_name`] applies that convention to guess the symbol a
//! route dispatches to; it is a best-effort guess, not symbol resolution.
//! [`controller_path`] goes the other way so users can filter by either form.

/// Suffix appended to a controller path before camel-casing.
const CONTROLLER_SUFFIX: &str = "_controller";

/// Separator between namespace segments in a controller path.
const PATH_SEPARATOR: char = '/';

/// Separator between nested namespaces in a symbol path.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Separator between a class and one of its instance methods in a symbol path.
pub const METHOD_SEPARATOR: char = '#';

/// Guess the class name for a controller path.
///
/// ```
/// use routedoclib::naming::controller_class_name;
///
/// assert_eq!(controller_class_name("admin/users"), "Admin::UsersController");
/// assert_eq!(controller_class_name("api/v1/orders"), "Api::V1::OrdersController");
/// ```
pub fn controller_class_name(controller: &str) -> String {
    let full = format!("{}{}", controller, CONTROLLER_SUFFIX);

    full.split(PATH_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .split('_')
                .filter(|word| !word.is_empty())
                .map(upcase_first)
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(NAMESPACE_SEPARATOR)
}

/// Symbol path of an action method on a controller class.
pub fn action_symbol_path(class_name: &str, action: &str) -> String {
    format!("{}{}{}", class_name, METHOD_SEPARATOR, action)
}

/// Normalize a controller filter to a controller path.
///
/// Accepts a class name (`Admin::UsersController`), a path
/// (`admin/users`) or anything in between and returns the path form.
pub fn controller_path(name: &str) -> String {
    let path = name
        .split(NAMESPACE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(underscore)
        .collect::<Vec<_>>()
        .join("/");

    match path.strip_suffix("controller") {
        Some(rest) => rest.trim_end_matches('_').to_string(),
        None => path,
    }
}

fn upcase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Camel-case to snake-case, keeping acronyms together (`APIKeys` -> `api_keys`).
fn underscore(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase() || prev.is_ascii_digit();
            if boundary || (prev.is_uppercase() && next_is_lower) {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}

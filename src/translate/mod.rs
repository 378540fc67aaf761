//! Python type annotations to TypeScript types.
//!
//! Translation is purely syntactic. Primitives map through a fixed table,
//! `List[T]` and `Dict[K, V]` (and their lowercase builtin spellings) are
//! rewritten recursively, and every other descriptor is returned as-is on
//! the assumption that it names an enum or interface emitted alongside it.

pub mod casing;

/// Python primitives and their TypeScript equivalents.
const PRIMITIVES: &[(&str, &str)] = &[
    ("str", "string"),
    ("int", "number"),
    ("float", "number"),
    ("complex", "number"),
    ("bool", "boolean"),
];

const SEQUENCE_PREFIXES: &[&str] = &["List[", "list["];
const MAPPING_PREFIXES: &[&str] = &["Dict[", "dict["];

/// Look up the TypeScript name of a Python primitive.
pub fn primitive(name: &str) -> Option<&'static str> {
    PRIMITIVES
        .iter()
        .find(|(python, _)| *python == name)
        .map(|(_, typescript)| *typescript)
}

/// Translate a Python type descriptor into TypeScript.
///
/// Unknown descriptors are never an error: they come back unchanged.
pub fn translate_type(descriptor: &str) -> String {
    if let Some(typescript) = primitive(descriptor) {
        return typescript.to_string();
    }

    if let Some(element) = container_args(descriptor, SEQUENCE_PREFIXES) {
        return format!("{}[]", translate_type(element.trim()));
    }

    if let Some(args) = container_args(descriptor, MAPPING_PREFIXES) {
        if let Some((key, value)) = split_top_level_comma(args) {
            return format!("Record<{}, {}>", translate_type(key), translate_type(value));
        }
    }

    // Anything else should be an enum or interface name
    descriptor.to_string()
}

/// Return the bracketed argument list of `Prefix[...]` if `descriptor` is a
/// well-bracketed container with one of the given prefixes.
fn container_args<'a>(descriptor: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    let args = prefixes
        .iter()
        .find_map(|prefix| descriptor.strip_prefix(prefix))?
        .strip_suffix(']')?;

    let mut depth = 0usize;
    for c in args.chars() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.checked_sub(1)?,
            _ => {}
        }
    }

    (depth == 0 && !args.trim().is_empty()).then_some(args)
}

/// Split on the first comma outside any brackets, so that the value type of
/// a dictionary may itself be a dictionary.
fn split_top_level_comma(args: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, c) in args.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                let key = args[..i].trim();
                let value = args[i + 1..].trim();
                if key.is_empty() || value.is_empty() {
                    return None;
                }
                return Some((key, value));
            }
            _ => {}
        }
    }
    None
}

/// Split a bracketed argument list on every comma outside nested brackets.
pub(crate) fn split_top_level(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

/// Convert a snake_case identifier to camelCase.
///
/// The first segment is kept as written; every later segment gets its first
/// character uppercased and the rest left alone. Empty segments produced by
/// leading, trailing or doubled underscores are skipped, so `_id` becomes
/// `id` and `a__b` becomes `aB`. An identifier made only of underscores is
/// returned unchanged.
pub fn to_camel_case(identifier: &str) -> String {
    let mut segments = identifier.split('_').filter(|segment| !segment.is_empty());

    let Some(first) = segments.next() else {
        return identifier.to_string();
    };

    let mut camel = String::with_capacity(identifier.len());
    camel.push_str(first);
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(head) = chars.next() {
            camel.extend(head.to_uppercase());
            camel.push_str(chars.as_str());
        }
    }
    camel
}

use regex::Regex;
use std::sync::OnceLock;

pub const CLASS_PREFIX: &str = "class ";

/// Header suffixes that make a class an enum
pub const ENUM_MARKERS: &[&str] = &["(Enum):", "(str, Enum):"];

/// Line prefixes dropped before grouping
pub const IGNORED_PREFIXES: &[&str] = &["from ", "import ", "#", "@"];

static STRING_CONSTANT: OnceLock<Regex> = OnceLock::new();

fn string_constant_regex() -> &'static Regex {
    STRING_CONSTANT.get_or_init(|| {
        Regex::new(r#"^([A-Za-z_][A-Za-z0-9_]*).*? = (?:"(.*)"|'(.*)')$"#)
            .expect("string constant pattern is valid")
    })
}

/// Check whether a line should be skipped entirely
pub fn is_ignored(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || IGNORED_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

pub fn is_enum_header(line: &str) -> bool {
    line.starts_with(CLASS_PREFIX) && ENUM_MARKERS.iter().any(|marker| line.ends_with(marker))
}

pub fn is_record_header(line: &str) -> bool {
    line.starts_with(CLASS_PREFIX) && !is_enum_header(line)
}

pub fn is_string_constant_line(line: &str) -> bool {
    string_constant_regex().is_match(line)
}

/// Extract `(name, value)` from a top-level string constant line.
pub fn string_constant_parts(line: &str) -> Option<(&str, &str)> {
    let captures = string_constant_regex().captures(line)?;
    let name = captures.get(1)?.as_str();
    let value = captures.get(2).or_else(|| captures.get(3))?.as_str();
    Some((name, value))
}

/// Cut a trailing `# comment` that is not inside a string literal.
pub fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '#' => return line[..i].trim_end(),
            None => {}
        }
    }

    line
}

/// Check whether a line opens a new declaration group
pub fn starts_group(line: &str) -> bool {
    is_record_header(line) || is_enum_header(line) || is_string_constant_line(line)
}

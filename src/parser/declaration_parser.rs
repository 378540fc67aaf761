use super::classify::{self, CLASS_PREFIX};
use super::{
    Declaration, EnumDeclaration, EnumMember, Field, LineGroup, RecordDeclaration, SourceLine,
    StringConstant,
};
use crate::error::ParseError;
use crate::translate::split_top_level;

/// Build a declaration from one line group.
///
/// The header alone decides the kind: an enum marker makes an enum, a quoted
/// string assignment makes a constant and any other `class` line a record.
pub fn parse_group(group: &LineGroup) -> Result<Declaration, ParseError> {
    let header = group.header;

    if classify::is_enum_header(header.text) {
        parse_enum(group).map(Declaration::Enum)
    } else if classify::is_string_constant_line(header.text) {
        parse_string_constant(group).map(Declaration::Constant)
    } else if classify::is_record_header(header.text) {
        parse_record(group).map(Declaration::Record)
    } else {
        Err(ParseError::UnrecognizedHeader {
            line: header.number,
            text: header.text.to_string(),
        })
    }
}

fn parse_record(group: &LineGroup) -> Result<RecordDeclaration, ParseError> {
    let fields = group
        .body
        .iter()
        .map(|line| parse_field(*line))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecordDeclaration {
        name: class_name(group.header.text),
        fields,
    })
}

fn parse_enum(group: &LineGroup) -> Result<EnumDeclaration, ParseError> {
    let members = group
        .body
        .iter()
        .map(|line| parse_member(*line))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EnumDeclaration {
        name: class_name(group.header.text),
        members,
    })
}

fn parse_string_constant(group: &LineGroup) -> Result<StringConstant, ParseError> {
    let header = group.header;
    let (name, value) = classify::string_constant_parts(header.text).ok_or_else(|| {
        ParseError::MalformedConstant {
            line: header.number,
            text: header.text.to_string(),
        }
    })?;

    // A constant is always a group of one line
    if let Some(extra) = group.body.first() {
        return Err(ParseError::TrailingConstantLine {
            line: extra.number,
            name: name.to_string(),
            text: extra.text.to_string(),
        });
    }

    Ok(StringConstant {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Parse `name: Type`, `name: Type = None` or `name: Union[Type, None]`.
pub fn parse_field(line: SourceLine) -> Result<Field, ParseError> {
    let malformed = || ParseError::MalformedField {
        line: line.number,
        text: line.text.to_string(),
    };

    let (raw_name, annotation) = line.text.trim().split_once(": ").ok_or_else(malformed)?;
    let raw_name = raw_name.trim();
    if !is_identifier(raw_name) {
        return Err(malformed());
    }

    // Defaults other than None are dropped without making the field optional
    let (python_type, default) = match annotation.split_once(" = ") {
        Some((python_type, default)) => (python_type.trim(), Some(default.trim())),
        None => (annotation.trim(), None),
    };
    if python_type.is_empty() {
        return Err(malformed());
    }

    let absent_default = default == Some("None");
    let field = match strip_optional_wrapper(python_type) {
        Some(inner) => Field::new(raw_name, inner, true),
        None => Field::new(raw_name, python_type, absent_default),
    };
    Ok(field)
}

/// Parse `NAME = "value"`.
pub fn parse_member(line: SourceLine) -> Result<EnumMember, ParseError> {
    let malformed = || ParseError::MalformedMember {
        line: line.number,
        text: line.text.to_string(),
    };

    let (name, value) = line.text.trim().split_once(" = ").ok_or_else(malformed)?;
    let name = name.trim();
    if !is_identifier(name) {
        return Err(malformed());
    }

    Ok(EnumMember {
        name: name.to_string(),
        value: strip_quotes(value.trim()).to_string(),
    })
}

/// Return the inner type if `python_type` is one of the "may be None" forms:
/// `Optional[T]`, `Union[..., None, ...]`, `T | None` or `None | T`.
fn strip_optional_wrapper(python_type: &str) -> Option<String> {
    if let Some(inner) = bracketed(python_type, "Optional[") {
        return Some(inner.trim().to_string());
    }

    if let Some(args) = bracketed(python_type, "Union[") {
        let members = split_top_level(args);
        let remaining: Vec<&str> = members
            .iter()
            .copied()
            .filter(|member| *member != "None")
            .collect();
        return match remaining.len() {
            n if n == members.len() || n == 0 => None,
            1 => Some(remaining[0].to_string()),
            _ => Some(format!("Union[{}]", remaining.join(", "))),
        };
    }

    if let Some(rest) = python_type.strip_suffix("None") {
        if let Some(inner) = rest.trim_end().strip_suffix('|') {
            return Some(inner.trim().to_string());
        }
    }

    if let Some(rest) = python_type.strip_prefix("None") {
        if let Some(inner) = rest.trim_start().strip_prefix('|') {
            return Some(inner.trim().to_string());
        }
    }

    None
}

fn bracketed<'a>(python_type: &'a str, prefix: &str) -> Option<&'a str> {
    python_type.strip_prefix(prefix)?.strip_suffix(']')
}

/// Name of a `class Name:` / `class Name(Base):` header
fn class_name(header: &str) -> String {
    let rest = header.strip_prefix(CLASS_PREFIX).unwrap_or(header);
    let end = rest.find(|c: char| c == '(' || c == ':').unwrap_or(rest.len());
    rest[..end].trim().to_string()
}

/// Remove one pair of matching surrounding quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::DeclarationKind;

    fn line(text: &str) -> SourceLine<'_> {
        SourceLine { number: 1, text }
    }

    fn group<'a>(header: &'a str, body: &[&'a str]) -> LineGroup<'a> {
        let mut group = LineGroup::new(SourceLine {
            number: 1,
            text: header,
        });
        group.body = body
            .iter()
            .enumerate()
            .map(|(i, text)| SourceLine {
                number: i + 2,
                text: *text,
            })
            .collect();
        group
    }

    #[test]
    fn test_parse_field() {
        let field = parse_field(line("    field: MyEnum")).unwrap();
        assert_eq!(field, Field::new("field", "MyEnum", false));
    }

    #[test]
    fn test_parse_field_camel_cases_name() {
        let field = parse_field(line("    created_at_utc: str")).unwrap();
        assert_eq!(field.name, "createdAtUtc");
        assert_eq!(field.python_type, "str");
    }

    #[test]
    fn test_parse_field_none_default() {
        let field = parse_field(line("    nickname: str = None")).unwrap();
        assert!(field.optional);
        assert_eq!(field.python_type, "str");
    }

    #[test]
    fn test_parse_field_other_default_is_not_optional() {
        let field = parse_field(line("    retries: int = 3")).unwrap();
        assert!(!field.optional);
        assert_eq!(field.python_type, "int");
    }

    #[test]
    fn test_parse_field_optional_wrappers() {
        let cases = [
            ("strange_type: Union[List[int], None]", "List[int]"),
            ("strange_type: Union[None, List[int]]", "List[int]"),
            ("strange_type: Optional[Dict[str, int]]", "Dict[str, int]"),
            ("strange_type: MyEnum | None", "MyEnum"),
            ("strange_type: None | MyEnum", "MyEnum"),
            ("strange_type: Union[int, str, None]", "Union[int, str]"),
        ];
        for (text, inner) in cases {
            let field = parse_field(line(text)).unwrap();
            assert!(field.optional, "{text}");
            assert_eq!(field.name, "strangeType");
            assert_eq!(field.python_type, inner, "{text}");
        }
    }

    #[test]
    fn test_parse_field_union_without_none_is_kept() {
        let field = parse_field(line("value: Union[int, str]")).unwrap();
        assert!(!field.optional);
        assert_eq!(field.python_type, "Union[int, str]");
    }

    #[test]
    fn test_parse_field_malformed() {
        for text in ["    field MyEnum", "    field:MyEnum", "    def run(self): pass", "    : int"] {
            let err = parse_field(line(text)).unwrap_err();
            assert_eq!(
                err,
                ParseError::MalformedField {
                    line: 1,
                    text: text.to_string()
                }
            );
        }
    }

    #[test]
    fn test_parse_member() {
        let member = parse_member(line(r#"    FIRST = "Number One""#)).unwrap();
        assert_eq!(member.name, "FIRST");
        assert_eq!(member.value, "Number One");

        let member = parse_member(line("    snake_case = 'single'")).unwrap();
        assert_eq!(member.name, "snake_case");
        assert_eq!(member.value, "single");
    }

    #[test]
    fn test_parse_member_malformed() {
        let err = parse_member(line(r#"    FIRST="Number One""#)).unwrap_err();
        assert!(matches!(err, ParseError::MalformedMember { line: 1, .. }));
    }

    #[test]
    fn test_parse_group_enum() {
        let decl = parse_group(&group(
            "class MyEnum(Enum):",
            &[r#"    FIRST = "Number One""#, r#"    SECOND = "Number Two""#],
        ))
        .unwrap();

        assert_eq!(decl.kind(), DeclarationKind::Enum);
        let Declaration::Enum(enum_decl) = decl else {
            panic!("expected enum");
        };
        assert_eq!(enum_decl.name, "MyEnum");
        assert_eq!(enum_decl.members.len(), 2);
        assert_eq!(enum_decl.members[1].value, "Number Two");
    }

    #[test]
    fn test_parse_group_str_enum() {
        let decl = parse_group(&group("class Colour(str, Enum):", &[r#"    RED = "red""#])).unwrap();
        assert_eq!(decl.kind(), DeclarationKind::Enum);
        assert_eq!(decl.name(), "Colour");
    }

    #[test]
    fn test_parse_group_record_preserves_field_order() {
        let decl = parse_group(&group(
            "class Child(Base):",
            &["    zeta: int", "    alpha: str", "    mid_point: float"],
        ))
        .unwrap();

        let Declaration::Record(record) = decl else {
            panic!("expected record");
        };
        assert_eq!(record.name, "Child");
        let names: Vec<&str> = record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "midPoint"]);
    }

    #[test]
    fn test_parse_group_constant() {
        let decl = parse_group(&group(r#"API_URL: str = "https://example.com""#, &[])).unwrap();
        assert_eq!(
            decl,
            Declaration::Constant(StringConstant {
                name: "API_URL".to_string(),
                value: "https://example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_group_constant_with_body_fails() {
        let err = parse_group(&group(r#"NAME = "x""#, &["    stray: int"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::TrailingConstantLine {
                line: 2,
                name: "NAME".to_string(),
                text: "    stray: int".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_group_unrecognized_header() {
        let err = parse_group(&group("LIMIT = 5", &[])).unwrap_err();
        assert!(matches!(err, ParseError::UnrecognizedHeader { line: 1, .. }));
    }

    #[test]
    fn test_field_error_reports_line_number() {
        let err = parse_group(&group("class Broken:", &["    ok: int", "    broken"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedField {
                line: 3,
                text: "    broken".to_string(),
            }
        );
    }
}

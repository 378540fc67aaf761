//! Whole-file conversion: filter, group, parse, emit, join.

pub mod folder;

use crate::emit::emit_declaration;
use crate::error::ParseError;
use crate::parser::classify;
use crate::parser::declaration_parser::parse_group;
use crate::parser::{Declaration, DeclarationKind, LineGroup, SourceLine};

/// Options applied to every converted file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Banner placed above the first declaration, e.g. an eslint directive
    pub header: Option<String>,
}

/// Convert the text of one Python module into TypeScript.
pub fn convert_source(source: &str, options: &ConvertOptions) -> Result<String, ParseError> {
    let declarations = parse_source(source)?;
    Ok(render(&declarations, options))
}

/// Parse every declaration in `source`, in source order.
pub fn parse_source(source: &str) -> Result<Vec<Declaration>, ParseError> {
    group_lines(&significant_lines(source))
        .iter()
        .map(|group| {
            let declaration = parse_group(group)?;
            tracing::debug!(
                line = group.header.number,
                kind = declaration.kind().as_str(),
                name = declaration.name(),
                "Parsed declaration"
            );
            Ok(declaration)
        })
        .collect()
}

/// Drop blank, import, comment and decorator lines, and trailing comments.
fn significant_lines(source: &str) -> Vec<SourceLine<'_>> {
    source
        .lines()
        .enumerate()
        .filter(|(_, text)| !classify::is_ignored(text))
        .map(|(i, text)| SourceLine {
            number: i + 1,
            text: classify::strip_comment(text).trim_end(),
        })
        .collect()
}

/// Split lines into declaration groups.
///
/// Class headers and string constants each open a new group; every other
/// line joins the group before it. A line with no group before it opens one
/// of its own and is rejected when the group is parsed.
fn group_lines<'a>(lines: &[SourceLine<'a>]) -> Vec<LineGroup<'a>> {
    let mut groups: Vec<LineGroup<'a>> = Vec::new();

    for line in lines {
        match groups.last_mut() {
            Some(group) if !classify::starts_group(line.text) => group.body.push(*line),
            _ => groups.push(LineGroup::new(*line)),
        }
    }

    groups
}

/// Join rendered declarations.
///
/// Consecutive string constants sit on adjacent lines; every other pair of
/// declarations is separated by one blank line. The result always ends with
/// exactly one newline.
pub fn render(declarations: &[Declaration], options: &ConvertOptions) -> String {
    let mut typescript = String::new();

    if let Some(header) = options.header.as_deref().map(str::trim) {
        if !header.is_empty() {
            typescript.push_str(header);
            typescript.push_str("\n\n");
        }
    }

    let mut previous: Option<DeclarationKind> = None;
    for declaration in declarations {
        let kind = declaration.kind();
        match (previous, kind) {
            (None, _) => {}
            (Some(DeclarationKind::Constant), DeclarationKind::Constant) => typescript.push('\n'),
            (Some(_), _) => typescript.push_str("\n\n"),
        }
        typescript.push_str(&emit_declaration(declaration));
        previous = Some(kind);
    }

    let mut output = typescript.trim_matches('\n').to_string();
    output.push('\n');
    output
}

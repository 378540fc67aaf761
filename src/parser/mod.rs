pub mod classify;
pub mod declaration_parser;

use crate::translate::casing::to_camel_case;

/// A source line that survived filtering, with its 1-based line number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// A header line and the body lines that follow it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineGroup<'a> {
    pub header: SourceLine<'a>,
    pub body: Vec<SourceLine<'a>>,
}

impl<'a> LineGroup<'a> {
    pub fn new(header: SourceLine<'a>) -> Self {
        Self {
            header,
            body: Vec::new(),
        }
    }
}

/// A dataclass field, rendered as an interface property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// camelCase name; the original spelling is not kept
    pub name: String,
    /// Python type with any optional wrapper already removed
    pub python_type: String,
    pub optional: bool,
}

impl Field {
    pub fn new(raw_name: &str, python_type: impl Into<String>, optional: bool) -> Self {
        Self {
            name: to_camel_case(raw_name),
            python_type: python_type.into(),
            optional,
        }
    }
}

/// A dataclass, rendered as an interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDeclaration {
    pub name: String,
    pub fields: Vec<Field>,
}

/// One enum member. The name is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDeclaration {
    pub name: String,
    pub members: Vec<EnumMember>,
}

/// A top-level `NAME = "value"` binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringConstant {
    pub name: String,
    pub value: String,
}

/// One parsed declaration, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Record(RecordDeclaration),
    Enum(EnumDeclaration),
    Constant(StringConstant),
}

impl Declaration {
    pub fn kind(&self) -> DeclarationKind {
        match self {
            Declaration::Record(_) => DeclarationKind::Record,
            Declaration::Enum(_) => DeclarationKind::Enum,
            Declaration::Constant(_) => DeclarationKind::Constant,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Declaration::Record(record) => &record.name,
            Declaration::Enum(enum_decl) => &enum_decl.name,
            Declaration::Constant(constant) => &constant.name,
        }
    }
}

/// Type of declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Record,
    Enum,
    Constant,
}

impl DeclarationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclarationKind::Record => "interface",
            DeclarationKind::Enum => "enum",
            DeclarationKind::Constant => "const",
        }
    }
}

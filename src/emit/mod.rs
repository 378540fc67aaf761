use crate::parser::{Declaration, EnumDeclaration, RecordDeclaration, StringConstant};
use crate::translate::translate_type;

const INDENT: &str = "    ";

/// Render a declaration as TypeScript, without a trailing newline.
pub fn emit_declaration(declaration: &Declaration) -> String {
    match declaration {
        Declaration::Record(record) => emit_record(record),
        Declaration::Enum(enum_decl) => emit_enum(enum_decl),
        Declaration::Constant(constant) => emit_constant(constant),
    }
}

/// `export interface Name { ... }`; field types are translated here.
pub fn emit_record(record: &RecordDeclaration) -> String {
    let mut typescript = format!("export interface {} {{\n", record.name);
    for field in &record.fields {
        let marker = if field.optional { "?" } else { "" };
        typescript.push_str(&format!(
            "{INDENT}{}{}: {};\n",
            field.name,
            marker,
            translate_type(&field.python_type)
        ));
    }
    typescript.push('}');
    typescript
}

pub fn emit_enum(enum_decl: &EnumDeclaration) -> String {
    let mut typescript = format!("export enum {} {{\n", enum_decl.name);
    for member in &enum_decl.members {
        typescript.push_str(&format!("{INDENT}{} = '{}',\n", member.name, member.value));
    }
    typescript.push('}');
    typescript
}

pub fn emit_constant(constant: &StringConstant) -> String {
    format!("export const {} = '{}';", constant.name, constant.value)
}

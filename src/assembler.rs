//! Final document assembly.
//!
//! Section order is fixed:
//!
//! 1. header guard open
//! 2. advisory comment for unresolved dependencies (only when there are any)
//! 3. include directives
//! 4. blank separator
//! 5. comparator macros, in synthesis order
//! 6. assertion macros, in synthesis order
//! 7. header guard close

use crate::registry::{DependencyRegistry, Unresolved};
use std::fmt::Write;

/// One generated macro: its doc comment and its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroBlock {
    pub name: String,
    /// Doc comment, possibly empty.
    pub doc: String,
    /// Definition text, newline-terminated.
    pub text: String,
}

impl MacroBlock {
    /// Doc followed by definition.
    pub fn render(&self) -> String {
        format!("{}{}", self.doc, self.text)
    }
}

pub struct OutputAssembler<'a> {
    guard: &'a str,
}

impl<'a> OutputAssembler<'a> {
    pub fn new(guard: &'a str) -> Self {
        Self { guard }
    }

    pub fn assemble(
        &self,
        registry: &DependencyRegistry,
        comparators: &[MacroBlock],
        assertions: &[MacroBlock],
    ) -> String {
        let mut out = String::new();

        writeln!(out, "#ifndef {}", self.guard).unwrap();
        writeln!(out, "#define {}", self.guard).unwrap();
        writeln!(out).unwrap();

        let unresolved = registry.unresolved();
        if !unresolved.is_empty() {
            out.push_str(&advisory_block(&unresolved));
            writeln!(out).unwrap();
        }

        for header in registry.includes() {
            writeln!(out, "#include <{}>", header).unwrap();
        }
        writeln!(out).unwrap();

        for block in comparators.iter().chain(assertions) {
            out.push_str(&block.render());
            writeln!(out).unwrap();
        }

        writeln!(out, "#endif /* {} */", self.guard).unwrap();
        out
    }
}

/// Comment listing dependencies the run could not supply.
///
/// Comparators are listed with the signature they must have and the call
/// form the assertions use; other names are listed bare.
pub fn advisory_block(unresolved: &[Unresolved]) -> String {
    let mut out = String::new();
    writeln!(out, "/*").unwrap();
    writeln!(
        out,
        " * Unresolved dependencies; define these before using the macros below:"
    )
    .unwrap();
    writeln!(out, " *").unwrap();

    for dep in unresolved {
        let users = dep.requested_by.join(", ");
        match dep.comparator_type() {
            Some(ty) => {
                writeln!(out, " *   int {}({} a, {} b);", dep.name, ty, ty).unwrap();
                if users.is_empty() {
                    writeln!(out, " *       called as {}({}1,{}2)", dep.name, ty, ty).unwrap();
                } else {
                    writeln!(
                        out,
                        " *       called as {}({}1,{}2) by {}",
                        dep.name, ty, ty, users
                    )
                    .unwrap();
                }
            }
            None => {
                writeln!(out, " *   {}", dep.name).unwrap();
                if !users.is_empty() {
                    writeln!(out, " *       required by {}", users).unwrap();
                }
            }
        }
    }

    writeln!(out, " */").unwrap();
    out
}

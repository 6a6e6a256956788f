//! Comparator macro synthesis.

use crate::assembler::MacroBlock;
use crate::config::GeneratorConfig;
use crate::doc::DocBlock;
use crate::registry::DependencyRegistry;
use crate::types::{CompareSpec, CompareStyle};

/// Turns a [`CompareSpec`] into a three-way comparator macro.
pub struct CompareSynthesizer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> CompareSynthesizer<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Emit the comparator and record it, with its header, in `registry`.
    pub fn synthesize(&self, spec: &CompareSpec, registry: &mut DependencyRegistry) -> MacroBlock {
        let name = spec.name();
        let ty = spec.type_tag.as_str();

        let mut doc = match spec.style {
            CompareStyle::Arithmetic => DocBlock::new(format!("Compares two {} values.", ty)),
            CompareStyle::StringOrder => {
                DocBlock::new(format!("Compares two {} values in lexical order.", ty))
            }
            CompareStyle::ByteWise => DocBlock::new(format!(
                "Compares two {} values byte by byte.",
                ty
            ))
            .paragraph(format!(
                "Byte-wise comparison is unsound for structures with padding, pointers \
                 or floating-point members; define {} by hand for such types.",
                name
            )),
        };
        doc = doc
            .param("a", format!("the first {}", ty))
            .param("b", format!("the second {}", ty))
            .returns(return_bands(spec.style));

        match spec.style {
            CompareStyle::Arithmetic => {}
            CompareStyle::StringOrder | CompareStyle::ByteWise => {
                registry.require_include(&self.config.string_header);
            }
        }
        registry.define(&name);

        let text = format!("#define {}(a, b) {}\n", name, spec.comparison_expr());
        MacroBlock {
            name,
            doc: doc.render(self.config.wrap_width),
            text,
        }
    }
}

/// The `>0`, `0` and `<0` bands of a comparator's result.
fn return_bands(style: CompareStyle) -> Vec<String> {
    let (subject, object) = match style {
        CompareStyle::ByteWise => ("the bytes of a are", "those of b"),
        CompareStyle::Arithmetic | CompareStyle::StringOrder => ("a is", "b"),
    };
    [(">0", "greater than", ","), (" 0", "equal to", ","), ("<0", "less than", "")]
        .iter()
        .map(|(band, relation, sep)| format!("{} if {} {} {}{}", band, subject, relation, object, sep))
        .collect()
}

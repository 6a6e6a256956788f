//! Assertion macro synthesis.

use crate::assembler::MacroBlock;
use crate::config::GeneratorConfig;
use crate::doc::{DocBlock, VARIADIC_PARAM};
use crate::registry::DependencyRegistry;
use crate::types::{comparator_name, is_c_identifier, quote_c, AssertionSpec, ConditionKind};

const INDENT: &str = "    ";

/// Turns an [`AssertionSpec`] into a variadic reporting macro.
pub struct MacroSynthesizer<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> MacroSynthesizer<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// The boolean expression that must hold for the assertion to pass.
    pub fn expression(&self, spec: &AssertionSpec) -> String {
        let arg = |idx: usize| spec.args.get(idx).map(String::as_str).unwrap_or_default();

        let test = match &spec.kind {
            ConditionKind::Boolean | ConditionKind::TruthValue => format!("({})", arg(0)),
            ConditionKind::ResultStatus => {
                format!("(({}) {})", arg(0), self.config.failure_condition)
            }
            ConditionKind::NullCheck(op) => format!("({}) {} NULL", arg(0), op.symbol()),
            ConditionKind::LiteralEquality { value, op } => {
                format!("({}) {} {}", arg(0), op.symbol(), value)
            }
            ConditionKind::Relational(op) => format!(
                "({}({},{}) {} 0)",
                comparator_name(&spec.type_tag),
                arg(0),
                arg(1),
                op.base().symbol()
            ),
            ConditionKind::Identity(op) => {
                format!("({}) {} ({})", arg(0), op.symbol(), arg(1))
            }
        };

        if spec.invert {
            format!("!{}", test)
        } else {
            test
        }
    }

    /// Emit the macro and record its name, header and comparator needs.
    pub fn synthesize(&self, spec: &AssertionSpec, registry: &mut DependencyRegistry) -> MacroBlock {
        match &spec.kind {
            ConditionKind::NullCheck(_) => registry.require_include(&self.config.null_header),
            ConditionKind::Relational(_) => {
                if let Some(comparator) = spec.comparator() {
                    registry.require_by(&comparator, &spec.name);
                }
            }
            _ => {}
        }
        registry.define(&spec.name);

        let descriptions = spec.kind.arg_descriptions(&spec.type_tag);
        let mut doc = DocBlock::new(spec.doc.clone());
        for (name, description) in spec.args.iter().zip(descriptions) {
            doc = doc.param(name.clone(), description);
        }
        doc = doc.param(VARIADIC_PARAM.0, VARIADIC_PARAM.1);

        let text = format!(
            "#define {name}({args}, ...) \\\n\
             {indent}{report}({expr}, __FILE__, __LINE__, \\\n\
             {indent}{indent}{message}, ## __VA_ARGS__, {sentinel})\n",
            name = spec.name,
            args = spec.args.join(", "),
            indent = INDENT,
            report = self.config.report_function,
            expr = self.expression(spec),
            message = spec.message.to_c_literal(),
            sentinel = self.config.sentinel,
        );

        MacroBlock {
            name: spec.name.clone(),
            doc: doc.render(self.config.wrap_width),
            text,
        }
    }

    /// Placeholder for a name that could not be decoded.
    ///
    /// Using the placeholder fails compilation with a message naming the
    /// token. Tokens that are not C identifiers cannot be macro names, so
    /// they become a bare `#error` instead.
    pub fn diagnostic(&self, token: &str, registry: &mut DependencyRegistry) -> MacroBlock {
        registry.define(token);
        let message = quote_c(&format!("unrecognized assertion name: {}", token));

        if is_c_identifier(token) {
            MacroBlock {
                name: token.to_string(),
                doc: format!("/* {}: unrecognized assertion name */\n", token),
                text: format!(
                    "#define {}(...) \\\n{}_Static_assert(0, {})\n",
                    token, INDENT, message
                ),
            }
        } else {
            MacroBlock {
                name: token.to_string(),
                doc: String::new(),
                text: format!("#error {}\n", message),
            }
        }
    }
}

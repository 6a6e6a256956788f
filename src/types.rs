//! Core types decoded from assertion and comparator names.

use std::fmt;

/// Default operand type for relational names with no explicit type.
pub const DEFAULT_TYPE_TAG: &str = "Number";

/// Which prefix a name was spelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// `Assert_<Rest>` or bare `Assert`.
    Assert,
    /// `Assert_not<Rest>`.
    AssertNot,
    /// `Fail_if<Rest>`.
    FailIf,
    /// `Fail_unless<Rest>`.
    FailUnless,
}

impl Polarity {
    /// Prefixes in match order, longest first where they overlap.
    pub const ALL: [Polarity; 4] = [
        Polarity::FailUnless,
        Polarity::FailIf,
        Polarity::AssertNot,
        Polarity::Assert,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Polarity::Assert => "Assert",
            Polarity::AssertNot => "Assert_not",
            Polarity::FailIf => "Fail_if",
            Polarity::FailUnless => "Fail_unless",
        }
    }

    /// Whether this prefix negates the positive sense of the condition.
    pub fn inverts(self) -> bool {
        matches!(self, Polarity::FailIf | Polarity::AssertNot)
    }
}

/// Relational operator spelled as a name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
    Ne,
}

impl RelOp {
    /// Recognized suffix spellings. `Equal`/`equal` are long forms of `EQ`.
    pub const SUFFIXES: [(&'static str, RelOp); 8] = [
        ("Equal", RelOp::Eq),
        ("equal", RelOp::Eq),
        ("LT", RelOp::Lt),
        ("LE", RelOp::Le),
        ("EQ", RelOp::Eq),
        ("GE", RelOp::Ge),
        ("GT", RelOp::Gt),
        ("NE", RelOp::Ne),
    ];

    /// Split `rest` into `(type_part, op)` when it ends in an operator suffix.
    pub fn split_suffix(rest: &str) -> Option<(&str, RelOp)> {
        Self::SUFFIXES
            .iter()
            .find(|(suffix, _)| rest.ends_with(suffix))
            .map(|(suffix, op)| (&rest[..rest.len() - suffix.len()], *op))
    }

    /// The operator actually emitted: `NE` is written as a negated `EQ`.
    pub fn base(self) -> RelOp {
        match self {
            RelOp::Ne => RelOp::Eq,
            op => op,
        }
    }

    /// Whether this operator carries an inversion of its base.
    pub fn is_negated(self) -> bool {
        self == RelOp::Ne
    }

    pub fn negated(self) -> RelOp {
        match self {
            RelOp::Lt => RelOp::Ge,
            RelOp::Le => RelOp::Gt,
            RelOp::Eq => RelOp::Ne,
            RelOp::Ge => RelOp::Lt,
            RelOp::Gt => RelOp::Le,
            RelOp::Ne => RelOp::Eq,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Eq => "==",
            RelOp::Ge => ">=",
            RelOp::Gt => ">",
            RelOp::Ne => "!=",
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            RelOp::Lt => "less than",
            RelOp::Le => "less than or equal to",
            RelOp::Eq => "equal to",
            RelOp::Ge => "greater than or equal to",
            RelOp::Gt => "greater than",
            RelOp::Ne => "not equal to",
        }
    }
}

/// Equality operator that an inversion has been folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Equality {
    Equal,
    NotEqual,
}

impl Equality {
    pub fn from_invert(invert: bool) -> Self {
        if invert {
            Equality::NotEqual
        } else {
            Equality::Equal
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Equality::Equal => "==",
            Equality::NotEqual => "!=",
        }
    }

    fn is_equal(self) -> bool {
        self == Equality::Equal
    }
}

/// What kind of test a name encodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionKind {
    /// Plain boolean expression.
    Boolean,
    /// Status of an operation; the base test is "the operation failed".
    ResultStatus,
    /// `True`/`False` check of an expression.
    TruthValue,
    /// Comparison against `NULL`, inversion folded into the operator.
    NullCheck(Equality),
    /// Comparison against a decoded numeral, inversion folded into the operator.
    LiteralEquality { value: u64, op: Equality },
    /// Ordering through `<Type>_compare`.
    Relational(RelOp),
    /// Two expressions are the same, inversion folded into the operator.
    Identity(Equality),
}

impl ConditionKind {
    /// Argument names used by macros of this kind.
    pub fn arg_names(&self, type_tag: &str) -> Vec<String> {
        match self {
            ConditionKind::Relational(_) => {
                vec![format!("{}1", type_tag), format!("{}2", type_tag)]
            }
            ConditionKind::Identity(_) => vec!["arg1".to_string(), "arg2".to_string()],
            _ => vec!["expr".to_string()],
        }
    }

    /// One description per argument, in the order of [`arg_names`](Self::arg_names).
    pub fn arg_descriptions(&self, type_tag: &str) -> Vec<String> {
        match self {
            ConditionKind::Boolean | ConditionKind::TruthValue => {
                vec!["the condition to test".to_string()]
            }
            ConditionKind::ResultStatus => {
                vec!["the status-returning operation to test".to_string()]
            }
            ConditionKind::NullCheck(_) => vec!["the pointer to test".to_string()],
            ConditionKind::LiteralEquality { .. } => vec!["the value to test".to_string()],
            ConditionKind::Relational(_) => vec![
                format!("the first {} operand", type_tag),
                format!("the second {} operand", type_tag),
            ],
            ConditionKind::Identity(_) => vec![
                "the first operand".to_string(),
                "the second operand".to_string(),
            ],
        }
    }

    /// Whether the polarity inversion has been folded into an operator.
    pub fn folds_inversion(&self) -> bool {
        matches!(
            self,
            ConditionKind::NullCheck(_)
                | ConditionKind::LiteralEquality { .. }
                | ConditionKind::Identity(_)
        )
    }

    /// Describe the base test (`holds`) or its negation.
    pub fn phrase(&self, args: &[String], holds: bool) -> Template {
        let first = args.first().cloned().unwrap_or_default();
        let mut t = Template::new();
        match self {
            ConditionKind::Boolean | ConditionKind::TruthValue => {
                t.arg(first).text(if holds { " is true" } else { " is false" });
            }
            ConditionKind::ResultStatus => {
                t.arg(first)
                    .text(if holds { " failed" } else { " did not fail" });
            }
            ConditionKind::NullCheck(op) => {
                let equal = op.is_equal() == holds;
                t.arg(first)
                    .text(if equal { " is NULL" } else { " is not NULL" });
            }
            ConditionKind::LiteralEquality { value, op } => {
                let equal = op.is_equal() == holds;
                let verb = if equal { " is " } else { " is not " };
                t.arg(first).text(format!("{}{}", verb, value));
            }
            ConditionKind::Relational(op) => {
                let rel = if holds { op.base() } else { op.base().negated() };
                let second = args.get(1).cloned().unwrap_or_default();
                t.arg(first)
                    .text(format!(" is {} ", rel.phrase()))
                    .arg(second);
            }
            ConditionKind::Identity(op) => {
                let equal = op.is_equal() == holds;
                let second = args.get(1).cloned().unwrap_or_default();
                t.arg(first).text(" and ").arg(second).text(if equal {
                    " are the same"
                } else {
                    " are not the same"
                });
            }
        }
        t
    }
}

/// A piece of text that may name macro arguments.
///
/// Docs render arguments by name; failure messages render them as the
/// stringified source text of the caller's argument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Template {
    pieces: Vec<Piece>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Piece {
    Text(String),
    Arg(String),
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.pieces.push(Piece::Text(text.into()));
        self
    }

    pub fn arg(&mut self, name: impl Into<String>) -> &mut Self {
        self.pieces.push(Piece::Arg(name.into()));
        self
    }

    /// Render with argument names inline, for documentation.
    pub fn to_plain(&self) -> String {
        self.pieces
            .iter()
            .map(|p| match p {
                Piece::Text(text) | Piece::Arg(text) => text.as_str(),
            })
            .collect()
    }

    /// Render as a sequence of C string literals with `#arg` stringification,
    /// each argument wrapped in single quotes.
    ///
    /// `'expr' is NULL` becomes `"'" #expr "' is NULL"`.
    pub fn to_c_literal(&self) -> String {
        let mut parts = Vec::new();
        let mut literal = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => literal.push_str(text),
                Piece::Arg(name) => {
                    literal.push('\'');
                    parts.push(quote_c(&literal));
                    parts.push(format!("#{}", name));
                    literal = "'".to_string();
                }
            }
        }
        if !literal.is_empty() || parts.is_empty() {
            parts.push(quote_c(&literal));
        }
        parts.join(" ")
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain())
    }
}

/// Quote `text` as a C string literal.
pub fn quote_c(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Whether `name` is usable as a C identifier.
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Decoded assertion name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionSpec {
    /// The macro name, exactly as given.
    pub name: String,
    pub polarity: Polarity,
    /// Whether the base test is negated. Always false once folded into an operator.
    pub invert: bool,
    pub kind: ConditionKind,
    pub type_tag: String,
    pub args: Vec<String>,
    /// Default failure message.
    pub message: Template,
    /// One-sentence description.
    pub doc: String,
}

impl AssertionSpec {
    /// Build a spec, deriving arguments, message and description from the kind.
    pub fn new(
        name: impl Into<String>,
        polarity: Polarity,
        invert: bool,
        kind: ConditionKind,
        type_tag: impl Into<String>,
    ) -> Self {
        let type_tag = type_tag.into();
        let invert = invert && !kind.folds_inversion();
        let args = kind.arg_names(&type_tag);

        let mut spec = Self {
            name: name.into(),
            polarity,
            invert,
            kind,
            type_tag,
            args,
            message: Template::new(),
            doc: String::new(),
        };
        spec.message = spec.default_message();
        spec.doc = spec.describe();
        spec
    }

    /// Phrase for when the assertion passes (`true`) or fails (`false`).
    pub fn condition(&self, passes: bool) -> Template {
        self.kind.phrase(&self.args, passes != self.invert)
    }

    fn default_message(&self) -> Template {
        match self.kind {
            ConditionKind::Boolean => {
                let mut t = Template::new();
                t.text(if self.invert {
                    "Negative assertion "
                } else {
                    "Assertion "
                })
                .arg(self.args[0].clone())
                .text(" failed");
                t
            }
            _ => self.condition(false),
        }
    }

    fn describe(&self) -> String {
        match self.polarity {
            Polarity::Assert | Polarity::AssertNot => {
                format!("Asserts that {}.", self.condition(true))
            }
            Polarity::FailIf => format!("Fails if {}.", self.condition(false)),
            Polarity::FailUnless => format!("Fails unless {}.", self.condition(true)),
        }
    }

    /// The comparator macro a relational assertion calls.
    pub fn comparator(&self) -> Option<String> {
        match self.kind {
            ConditionKind::Relational(_) => Some(comparator_name(&self.type_tag)),
            _ => None,
        }
    }
}

/// How a comparator orders its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareStyle {
    /// Arithmetic difference, for `Number`.
    Arithmetic,
    /// `strcmp`, for `String`.
    StringOrder,
    /// `memcmp` over `sizeof(type)`, for anything else.
    ByteWise,
}

/// Decoded `<Type>_compare` name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareSpec {
    pub type_tag: String,
    pub style: CompareStyle,
}

impl CompareSpec {
    pub fn new(type_tag: impl Into<String>) -> Self {
        let type_tag = type_tag.into();
        let style = match type_tag.as_str() {
            "Number" => CompareStyle::Arithmetic,
            "String" => CompareStyle::StringOrder,
            _ => CompareStyle::ByteWise,
        };
        Self { type_tag, style }
    }

    pub fn name(&self) -> String {
        comparator_name(&self.type_tag)
    }

    /// Body of the comparator over parameters `a` and `b`.
    pub fn comparison_expr(&self) -> String {
        match self.style {
            CompareStyle::Arithmetic => "((a) - (b))".to_string(),
            CompareStyle::StringOrder => "strcmp((a), (b))".to_string(),
            CompareStyle::ByteWise => format!("memcmp(&(a), &(b), sizeof({}))", self.type_tag),
        }
    }
}

/// Suffix naming a comparator macro.
pub const COMPARE_SUFFIX: &str = "_compare";

pub fn comparator_name(type_tag: &str) -> String {
    format!("{}{}", type_tag, COMPARE_SUFFIX)
}

/// Result of decoding one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Assertion(AssertionSpec),
    Compare(CompareSpec),
    Unrecognized(String),
}

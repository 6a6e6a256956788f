//! Decoder for assertion and comparator names.
//!
//! A name is a polarity prefix followed by a condition:
//!
//! ```text
//! Fail_if<Rest> | Fail_unless<Rest> | Assert_not<Rest> | Assert[_]<Rest>
//! ```
//!
//! `Rest` is classified by an ordered rule table; the first rule that
//! accepts it wins. Names of the form `<Type>_compare` decode to a
//! comparator instead.

use crate::numeral::parse_numeral;
use crate::types::{
    is_c_identifier, AssertionSpec, CompareSpec, ConditionKind, Equality, Parsed, Polarity,
    RelOp, COMPARE_SUFFIX, DEFAULT_TYPE_TAG,
};

/// A classified condition before argument and message derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Condition {
    kind: ConditionKind,
    invert: bool,
    type_tag: String,
}

impl Condition {
    fn new(kind: ConditionKind, invert: bool) -> Self {
        Self {
            kind,
            invert,
            type_tag: DEFAULT_TYPE_TAG.to_string(),
        }
    }
}

type Rule = fn(rest: &str, invert: bool) -> Option<Condition>;

/// Condition rules in priority order.
const RULES: &[(&str, Rule)] = &[
    ("boolean", rule_boolean),
    ("result-status", rule_result_status),
    ("truth-value", rule_truth_value),
    ("null-check", rule_null_check),
    ("literal-equality", rule_literal_equality),
    ("identity", rule_identity),
    ("relational", rule_relational),
];

fn rule_boolean(rest: &str, invert: bool) -> Option<Condition> {
    rest.is_empty()
        .then(|| Condition::new(ConditionKind::Boolean, invert))
}

fn rule_result_status(rest: &str, invert: bool) -> Option<Condition> {
    match rest {
        // Base test is "did fail"; success is its negation.
        "Error" | "error" | "Failure" | "failure" => {
            Some(Condition::new(ConditionKind::ResultStatus, invert))
        }
        "Success" | "success" => Some(Condition::new(ConditionKind::ResultStatus, !invert)),
        _ => None,
    }
}

fn rule_truth_value(rest: &str, invert: bool) -> Option<Condition> {
    match rest {
        "True" | "true" => Some(Condition::new(ConditionKind::TruthValue, invert)),
        "False" | "false" => Some(Condition::new(ConditionKind::TruthValue, !invert)),
        _ => None,
    }
}

fn rule_null_check(rest: &str, invert: bool) -> Option<Condition> {
    (rest == "NULL").then(|| {
        Condition::new(
            ConditionKind::NullCheck(Equality::from_invert(invert)),
            false,
        )
    })
}

fn rule_literal_equality(rest: &str, invert: bool) -> Option<Condition> {
    let value = parse_numeral(rest)?;
    Some(Condition::new(
        ConditionKind::LiteralEquality {
            value,
            op: Equality::from_invert(invert),
        },
        false,
    ))
}

fn rule_identity(rest: &str, invert: bool) -> Option<Condition> {
    matches!(rest, "Same" | "same").then(|| {
        Condition::new(ConditionKind::Identity(Equality::from_invert(invert)), false)
    })
}

fn rule_relational(rest: &str, invert: bool) -> Option<Condition> {
    let (type_part, op) = RelOp::split_suffix(rest)?;
    let type_tag = if type_part.is_empty() {
        DEFAULT_TYPE_TAG
    } else if is_c_identifier(type_part) {
        type_part
    } else {
        return None;
    };

    Some(Condition {
        kind: ConditionKind::Relational(op),
        invert: invert != op.is_negated(),
        type_tag: type_tag.to_string(),
    })
}

/// Strip the polarity prefix, returning the polarity and the remainder.
///
/// A single `_` directly after the prefix is a separator, not part of the
/// condition.
pub fn split_polarity(token: &str) -> Option<(Polarity, &str)> {
    Polarity::ALL.iter().find_map(|&polarity| {
        let rest = token.strip_prefix(polarity.prefix())?;
        Some((polarity, rest.strip_prefix('_').unwrap_or(rest)))
    })
}

/// Decode the comparator type from a `<Type>_compare` name.
pub fn split_comparator(token: &str) -> Option<&str> {
    let type_tag = token.strip_suffix(COMPARE_SUFFIX)?;
    is_c_identifier(type_tag).then(|| type_tag)
}

/// Classify the condition part of an assertion name.
fn classify(rest: &str, invert: bool) -> Option<Condition> {
    RULES.iter().find_map(|(_, rule)| rule(rest, invert))
}

/// Decode one name.
///
/// Assertion prefixes take precedence over the comparator suffix, so
/// `Assert_Foo_compare` is an (unrecognized) assertion, not a comparator.
pub fn parse_token(token: &str) -> Parsed {
    if let Some((polarity, rest)) = split_polarity(token) {
        return match classify(rest, polarity.inverts()) {
            Some(cond) => Parsed::Assertion(AssertionSpec::new(
                token,
                polarity,
                cond.invert,
                cond.kind,
                cond.type_tag,
            )),
            None => Parsed::Unrecognized(token.to_string()),
        };
    }

    match split_comparator(token) {
        Some(type_tag) => Parsed::Compare(CompareSpec::new(type_tag)),
        None => Parsed::Unrecognized(token.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompareStyle;

    fn assertion(token: &str) -> AssertionSpec {
        match parse_token(token) {
            Parsed::Assertion(spec) => spec,
            other => panic!("{} did not decode to an assertion: {:?}", token, other),
        }
    }

    #[test]
    fn test_polarity_prefixes() {
        assert_eq!(split_polarity("Assert"), Some((Polarity::Assert, "")));
        assert_eq!(split_polarity("Assert_NULL"), Some((Polarity::Assert, "NULL")));
        assert_eq!(split_polarity("AssertStringEQ"), Some((Polarity::Assert, "StringEQ")));
        assert_eq!(split_polarity("Assert_notNULL"), Some((Polarity::AssertNot, "NULL")));
        assert_eq!(split_polarity("Fail_if0x10"), Some((Polarity::FailIf, "0x10")));
        assert_eq!(split_polarity("Fail_unless"), Some((Polarity::FailUnless, "")));
        assert_eq!(split_polarity("Fail_if_NULL"), Some((Polarity::FailIf, "NULL")));
        assert_eq!(split_polarity("Check_foo"), None);
    }

    #[test]
    fn test_inverting_prefixes() {
        assert!(!assertion("Assert").invert);
        assert!(assertion("Assert_not").invert);
        assert!(assertion("Fail_if").invert);
        assert!(!assertion("Fail_unless").invert);
    }

    #[test]
    fn test_boolean() {
        let spec = assertion("Assert");
        assert_eq!(spec.kind, ConditionKind::Boolean);
        assert_eq!(spec.args, vec!["expr"]);
        assert_eq!(spec.doc, "Asserts that expr is true.");

        let spec = assertion("Fail_if");
        assert_eq!(spec.doc, "Fails if expr is true.");
        assert_eq!(spec.message.to_plain(), "Negative assertion expr failed");
    }

    #[test]
    fn test_result_status() {
        let error = assertion("Assert_Error");
        assert_eq!(error.kind, ConditionKind::ResultStatus);
        assert!(!error.invert);
        assert_eq!(error.message.to_plain(), "expr did not fail");

        let success = assertion("Assert_Success");
        assert!(success.invert);
        assert_eq!(success.message.to_plain(), "expr failed");

        // fail-if and success cancel out
        let spec = assertion("Fail_ifsuccess");
        assert!(!spec.invert);
        assert_eq!(spec.doc, "Fails if expr did not fail.");

        assert!(assertion("Fail_iffailure").invert);
    }

    #[test]
    fn test_truth_value() {
        let spec = assertion("Assert_True");
        assert_eq!(spec.kind, ConditionKind::TruthValue);
        assert!(!spec.invert);
        assert_eq!(spec.message.to_plain(), "expr is false");

        let spec = assertion("Assert_notfalse");
        assert!(!spec.invert);

        let spec = assertion("Assert_False");
        assert!(spec.invert);
        assert_eq!(spec.message.to_plain(), "expr is true");
    }

    #[test]
    fn test_null_check_folds_inversion() {
        let spec = assertion("Assert_notNULL");
        assert_eq!(spec.kind, ConditionKind::NullCheck(Equality::NotEqual));
        assert!(!spec.invert);
        assert_eq!(spec.doc, "Asserts that expr is not NULL.");

        let spec = assertion("Fail_unlessNULL");
        assert_eq!(spec.kind, ConditionKind::NullCheck(Equality::Equal));
        assert_eq!(spec.doc, "Fails unless expr is NULL.");
    }

    #[test]
    fn test_literal_equality() {
        let spec = assertion("Fail_if0x10");
        assert_eq!(
            spec.kind,
            ConditionKind::LiteralEquality {
                value: 16,
                op: Equality::NotEqual
            }
        );
        assert!(!spec.invert);
        assert_eq!(spec.doc, "Fails if expr is 16.");

        let spec = assertion("Assert_017");
        assert_eq!(
            spec.kind,
            ConditionKind::LiteralEquality {
                value: 15,
                op: Equality::Equal
            }
        );

        let spec = assertion("Assert_0b11");
        assert!(matches!(spec.kind, ConditionKind::LiteralEquality { value: 3, .. }));
    }

    #[test]
    fn test_identity() {
        let same = assertion("Assert_Same");
        assert_eq!(same.kind, ConditionKind::Identity(Equality::Equal));
        assert_eq!(same.args, vec!["arg1", "arg2"]);

        let not_same = assertion("Assert_notSame");
        assert_eq!(not_same.kind, ConditionKind::Identity(Equality::NotEqual));
        assert_eq!(not_same.args, vec!["arg1", "arg2"]);
        assert_eq!(not_same.doc, "Asserts that arg1 and arg2 are not the same.");
    }

    #[test]
    fn test_relational() {
        let spec = assertion("AssertStringEQ");
        assert_eq!(spec.kind, ConditionKind::Relational(RelOp::Eq));
        assert_eq!(spec.type_tag, "String");
        assert_eq!(spec.args, vec!["String1", "String2"]);
        assert_eq!(spec.comparator().as_deref(), Some("String_compare"));

        let spec = assertion("Assert_LT");
        assert_eq!(spec.type_tag, "Number");
        assert_eq!(spec.args, vec!["Number1", "Number2"]);
        assert_eq!(spec.doc, "Asserts that Number1 is less than Number2.");
    }

    #[test]
    fn test_relational_ne_inverts_eq() {
        let spec = assertion("Assert_FooNE");
        assert_eq!(spec.kind, ConditionKind::Relational(RelOp::Ne));
        assert!(spec.invert);
        assert_eq!(spec.doc, "Asserts that Foo1 is not equal to Foo2.");

        // two inversions cancel
        let spec = assertion("Assert_notNE");
        assert!(!spec.invert);
        assert_eq!(spec.doc, "Asserts that Number1 is equal to Number2.");
    }

    #[test]
    fn test_relational_fail_if_describes_failure() {
        let spec = assertion("Fail_ifGE");
        assert!(spec.invert);
        assert_eq!(spec.doc, "Fails if Number1 is greater than or equal to Number2.");
        assert_eq!(spec.message.to_plain(), "Number1 is greater than or equal to Number2");
    }

    #[test]
    fn test_equal_spelling() {
        let spec = assertion("Assert_StringEqual");
        assert_eq!(spec.kind, ConditionKind::Relational(RelOp::Eq));
        assert_eq!(spec.type_tag, "String");
    }

    #[test]
    fn test_comparator() {
        assert_eq!(
            parse_token("Foo_compare"),
            Parsed::Compare(CompareSpec {
                type_tag: "Foo".to_string(),
                style: CompareStyle::ByteWise
            })
        );
        assert_eq!(
            parse_token("_compare"),
            Parsed::Unrecognized("_compare".to_string())
        );
    }

    #[test]
    fn test_unrecognized() {
        for token in ["Assert_Bogus123", "Assertion", "Fail_ifMaybe", "Assert_0x1GE", "Assert_08", "Assert_Foo_compare", "Check"] {
            assert_eq!(
                parse_token(token),
                Parsed::Unrecognized(token.to_string()),
                "{}",
                token
            );
        }
    }

    fn rule_name(rest: &str) -> Option<&'static str> {
        RULES
            .iter()
            .find(|(_, rule)| rule(rest, false).is_some())
            .map(|(name, _)| *name)
    }

    #[test]
    fn test_rule_priority() {
        assert_eq!(rule_name(""), Some("boolean"));
        assert_eq!(rule_name("Success"), Some("result-status"));
        assert_eq!(rule_name("NULL"), Some("null-check"));
        assert_eq!(rule_name("0"), Some("literal-equality"));
        assert_eq!(rule_name("TrueEQ"), Some("relational"));
        assert_eq!(rule_name("Bogus"), None);
    }
}

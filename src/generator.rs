//! One generation run: tokens in, header text out.

use crate::assembler::{MacroBlock, OutputAssembler};
use crate::assertion::MacroSynthesizer;
use crate::compare::CompareSynthesizer;
use crate::config::GeneratorConfig;
use crate::errors::GenResult;
use crate::parser::parse_token;
use crate::registry::DependencyRegistry;
use crate::source::{is_token_shape, IterSource, TokenSource};
use crate::types::Parsed;

/// What happened to a fed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Assertion,
    Comparator,
    /// Emitted as a diagnostic placeholder.
    Unrecognized,
    /// A macro of that name was already emitted.
    Duplicate,
}

/// Accumulates generated sections for a single run.
///
/// Feed tokens in arrival order, then call [`finish`](Self::finish). The
/// registry lives exactly as long as the run.
pub struct Generator {
    config: GeneratorConfig,
    registry: DependencyRegistry,
    comparators: Vec<MacroBlock>,
    assertions: Vec<MacroBlock>,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config: config.normalized(),
            registry: DependencyRegistry::new(),
            comparators: Vec::new(),
            assertions: Vec::new(),
        }
    }

    pub fn registry(&self) -> &DependencyRegistry {
        &self.registry
    }

    /// Decode one token and append its macro to the matching section.
    ///
    /// The token is assumed to already pass [`is_token_shape`].
    pub fn feed(&mut self, token: &str) -> Outcome {
        let parsed = parse_token(token);
        let name = match &parsed {
            Parsed::Assertion(spec) => spec.name.clone(),
            Parsed::Compare(spec) => spec.name(),
            Parsed::Unrecognized(token) => token.clone(),
        };

        if self.registry.is_defined(&name) {
            tracing::warn!(token, "skipping duplicate macro");
            return Outcome::Duplicate;
        }

        match parsed {
            Parsed::Assertion(spec) => {
                tracing::debug!(token, kind = ?spec.kind, invert = spec.invert, "assertion");
                let block = MacroSynthesizer::new(&self.config).synthesize(&spec, &mut self.registry);
                self.assertions.push(block);
                Outcome::Assertion
            }
            Parsed::Compare(spec) => {
                tracing::debug!(token, style = ?spec.style, "comparator");
                let block = CompareSynthesizer::new(&self.config).synthesize(&spec, &mut self.registry);
                self.comparators.push(block);
                Outcome::Comparator
            }
            Parsed::Unrecognized(token) => {
                tracing::warn!(token = %token, "unrecognized assertion name");
                let block = MacroSynthesizer::new(&self.config).diagnostic(&token, &mut self.registry);
                self.assertions.push(block);
                Outcome::Unrecognized
            }
        }
    }

    /// Feed every token-shaped entry from `source`.
    pub fn run(&mut self, source: &mut dyn TokenSource) -> GenResult<()> {
        while let Some(token) = source.next_token()? {
            let token = token.trim();
            if is_token_shape(token) {
                self.feed(token);
            }
        }
        Ok(())
    }

    /// Resolve built-in comparators and assemble the document.
    pub fn finish(mut self) -> String {
        let resolved = self
            .registry
            .resolve_builtins(&CompareSynthesizer::new(&self.config));
        self.comparators.extend(resolved);

        let unresolved = self.registry.unresolved();
        if !unresolved.is_empty() {
            tracing::info!(
                count = unresolved.len(),
                "comparators left unresolved; listed in advisory block"
            );
        }

        OutputAssembler::new(&self.config.guard).assemble(
            &self.registry,
            &self.comparators,
            &self.assertions,
        )
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

/// Run the whole pipeline over in-memory tokens with the given config.
pub fn generate_with<I, S>(config: GeneratorConfig, tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut generator = Generator::new(config);
    let mut source = IterSource(tokens.into_iter());
    // in-memory sources cannot fail
    if let Err(e) = generator.run(&mut source) {
        tracing::error!(error = %e, "token source failed");
    }
    generator.finish()
}

/// Run the whole pipeline over in-memory tokens with the default config.
pub fn generate<I, S>(tokens: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    generate_with(GeneratorConfig::default(), tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_outcomes() {
        let mut generator = Generator::default();
        assert_eq!(generator.feed("Assert"), Outcome::Assertion);
        assert_eq!(generator.feed("Foo_compare"), Outcome::Comparator);
        assert_eq!(generator.feed("Assert_Bogus123"), Outcome::Unrecognized);
        assert_eq!(generator.feed("Assert"), Outcome::Duplicate);
        assert_eq!(generator.feed("Assert_Bogus123"), Outcome::Duplicate);
    }

    #[test]
    fn test_comparator_token_after_use_satisfies_need() {
        let mut generator = Generator::default();
        generator.feed("AssertFooEQ");
        assert!(generator.registry().is_needed("Foo_compare"));
        generator.feed("Foo_compare");
        assert!(!generator.registry().is_needed("Foo_compare"));

        let out = generator.finish();
        assert!(!out.contains("Unresolved dependencies"));
        assert!(out.contains("#define Foo_compare(a, b) memcmp"));
    }

    #[test]
    fn test_run_filters_token_shapes() {
        let mut generator = Generator::default();
        let mut source = IterSource(vec!["", "  Assert  ", "# comment", "helper", "Fail_if"].into_iter());
        generator.run(&mut source).unwrap();
        assert_eq!(
            generator.registry().defined().collect::<Vec<_>>(),
            vec!["Assert", "Fail_if"]
        );
    }

    #[test]
    fn test_builtin_resolved_once() {
        let out = generate(vec!["Assert_LT", "Assert_GT", "Number_compare"]);
        assert_eq!(out.matches("#define Number_compare").count(), 1);
        assert!(!out.contains("Unresolved dependencies"));
    }

    #[test]
    fn test_builtin_comparators_precede_assertions() {
        let out = generate(vec!["AssertStringEQ"]);
        let comparator = out.find("#define String_compare").unwrap();
        let assertion = out.find("#define AssertStringEQ").unwrap();
        assert!(comparator < assertion);
        assert!(out.contains("#include <string.h>"));
    }
}

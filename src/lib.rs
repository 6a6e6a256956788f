#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Naming-convention compiler for C assertion macros.
//!
//! Each input name encodes an assertion's polarity, condition and operand
//! type. The generator decodes the name and emits a documented, variadic
//! macro with a default failure message, plus any comparator macros the
//! relational assertions depend on.
//!
//! ```text
//! Assert_notNULL   ->  #define Assert_notNULL(expr, ...)  ... (expr) != NULL ...
//! Fail_if0x10      ->  #define Fail_if0x10(expr, ...)     ... (expr) != 16 ...
//! AssertStringEQ   ->  #define AssertStringEQ(String1, String2, ...)
//!                      ... (String_compare(String1,String2) == 0) ...
//! ```
//!
//! ## Modules
//!
//! - [`parser`] - Decodes a name into an [`AssertionSpec`] or [`CompareSpec`]
//! - [`assertion`] - Assertion macro synthesis
//! - [`compare`] - Comparator macro synthesis
//! - [`registry`] - Needed comparators, includes and emitted names for a run
//! - [`assembler`] - Orders the generated sections into one document
//! - [`generator`] - Drives a run from a [`TokenSource`]
//! - [`doc`] - Doc comment wrapping and alignment
//! - [`config`] - TOML-loadable generator settings
//! - [`errors`] - Error types
//!
//! ## Usage
//!
//! ```
//! let header = layered_assertgen::generate(["Assert_notNULL", "AssertStringEQ"]);
//! assert!(header.contains("#define String_compare(a, b) strcmp((a), (b))"));
//! ```

pub mod assembler;
pub mod assertion;
pub mod compare;
pub mod config;
pub mod doc;
pub mod errors;
pub mod generator;
pub mod numeral;
pub mod parser;
pub mod registry;
pub mod source;
pub mod types;

pub use assembler::{MacroBlock, OutputAssembler};
pub use assertion::MacroSynthesizer;
pub use compare::CompareSynthesizer;
pub use config::GeneratorConfig;
pub use errors::{GenError, GenResult};
pub use generator::{generate, generate_with, Generator, Outcome};
pub use parser::parse_token;
pub use registry::{DependencyRegistry, Unresolved};
pub use source::{is_token_shape, IterSource, LineSource, TokenSource};
pub use types::{
    AssertionSpec, CompareSpec, CompareStyle, ConditionKind, Equality, Parsed, Polarity, RelOp,
};

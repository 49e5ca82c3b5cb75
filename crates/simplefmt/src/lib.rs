//! A compiler for a compact textual constraint language.
//!
//! A constraint is written as
//! `view1.attribute relation multiplier * view2.attribute + constant @ priority`,
//! where the multiplier, constant and priority are optional and may be
//! numeric literals or names looked up in a caller-supplied metrics table.
//!
//! ```
//! use std::collections::HashMap;
//!
//! struct View(&'static str);
//!
//! let views = HashMap::from([("v", View("child")), ("superview", View("root"))]);
//! let metrics = HashMap::from([("pad", 20.0)]);
//!
//! let c = simplefmt::compile("v.width = 0.5 * superview.width - pad @ 750", &metrics, &views)?;
//! assert_eq!(c.first_item.0, "child");
//! assert_eq!(c.multiplier, 0.5);
//! assert_eq!(c.constant, -20.0);
//! assert_eq!(c.priority, 750.0);
//! # Ok::<(), simplefmt::CompileError>(())
//! ```

pub mod attribute;
pub mod compile;
pub mod descriptor;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolve;
pub mod syntax;
pub mod table;
mod util;

pub use crate::{
    attribute::Attribute,
    compile::{compile, compile_all, BatchError, Config, REQUIRED_PRIORITY},
    descriptor::Constraint,
    error::{CompileError, Diagnostic},
    resolve::{ResolutionError, ResolutionErrorKind},
    syntax::Relation,
    table::SymbolTable,
};

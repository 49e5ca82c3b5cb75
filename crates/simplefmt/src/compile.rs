//! Compilation entry points.

use crate::{
    descriptor::{self, Constraint},
    error::CompileError,
    lexer, parser, resolve,
    table::SymbolTable,
};

/// The priority of a constraint that must be satisfied.
pub const REQUIRED_PRIORITY: f64 = 1000.0;

/// Compilation settings.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// The priority assigned when a statement has no `@ priority` clause,
    /// and the upper bound for explicit priorities.
    pub required_priority: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            required_priority: REQUIRED_PRIORITY,
        }
    }
}

/// A failure of one format string within a batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("constraint #{index}: {source}")]
pub struct BatchError {
    pub index: usize,
    pub source: CompileError,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required_priority(mut self, priority: f64) -> Self {
        self.required_priority = priority;
        self
    }

    /// Compile a single format string.
    pub fn compile<'v, W, M>(
        &self,
        format: &str,
        metrics: &M,
        views: &'v W,
    ) -> Result<Constraint<'v, W::Value>, CompileError>
    where
        W: SymbolTable + ?Sized,
        M: SymbolTable + ?Sized,
        M::Value: Copy + Into<f64>,
    {
        let span = tracing::trace_span!("compile", format);
        let _entered = span.enter();

        let tokens = lexer::tokenize(format)?;
        tracing::trace!("tokens: {:?}", tokens);

        let statement = parser::parse(&tokens)?;
        let resolved = resolve::resolve(&statement, views, metrics, self)?;
        Ok(descriptor::build(&resolved, self))
    }

    /// Compile every format string against the same tables.
    ///
    /// Stops at the first failure; no descriptors are returned for a batch
    /// that contains any error.
    pub fn compile_all<'v, I, W, M>(
        &self,
        formats: I,
        metrics: &M,
        views: &'v W,
    ) -> Result<Vec<Constraint<'v, W::Value>>, BatchError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        W: SymbolTable + ?Sized,
        M: SymbolTable + ?Sized,
        M::Value: Copy + Into<f64>,
    {
        let constraints = formats
            .into_iter()
            .enumerate()
            .map(|(index, format)| {
                self.compile(format.as_ref(), metrics, views)
                    .map_err(|source| BatchError { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("compiled {} constraints", constraints.len());
        Ok(constraints)
    }

    /// Compile every format string and report all failures instead of the
    /// first one.
    pub fn check_all<I, W, M>(&self, formats: I, metrics: &M, views: &W) -> Vec<BatchError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        W: SymbolTable + ?Sized,
        M: SymbolTable + ?Sized,
        M::Value: Copy + Into<f64>,
    {
        let errors: Vec<_> = formats
            .into_iter()
            .enumerate()
            .filter_map(|(index, format)| {
                self.compile(format.as_ref(), metrics, views)
                    .err()
                    .map(|source| BatchError { index, source })
            })
            .collect();
        tracing::debug!("checked batch: {} failures", errors.len());
        errors
    }
}

/// Compile a single format string with the default [`Config`].
pub fn compile<'v, W, M>(
    format: &str,
    metrics: &M,
    views: &'v W,
) -> Result<Constraint<'v, W::Value>, CompileError>
where
    W: SymbolTable + ?Sized,
    M: SymbolTable + ?Sized,
    M::Value: Copy + Into<f64>,
{
    Config::default().compile(format, metrics, views)
}

/// Compile a batch of format strings with the default [`Config`].
pub fn compile_all<'v, I, W, M>(
    formats: I,
    metrics: &M,
    views: &'v W,
) -> Result<Vec<Constraint<'v, W::Value>>, BatchError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    W: SymbolTable + ?Sized,
    M: SymbolTable + ?Sized,
    M::Value: Copy + Into<f64>,
{
    Config::default().compile_all(formats, metrics, views)
}

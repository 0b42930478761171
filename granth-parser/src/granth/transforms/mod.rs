//! Transform pipeline infrastructure
//!
//! Segmentation is a chain of stages, each taking the previous stage's output:
//!
//! ```text
//! Document --Classification--> Vec<Line> --Segmentation--> Vec<Paragraph>
//!          --BlockMerge--> Vec<Paragraph> --Recombination--> Vec<Paragraph>
//! ```
//!
//! # The `Runnable` Trait
//!
//! The interface for every stage. Any type implementing `Runnable<I, O>` turns an `I` into
//! an `O`:
//!
//! ```rust,ignore
//! pub trait Runnable<I, O> {
//!     fn run(&self, input: I) -> Result<O, TransformError>;
//! }
//! ```
//!
//! # The `Transform<I, O>` Type
//!
//! A wrapper that enables composition. `.then()` appends a stage whose input type is the
//! current output type, so a mis-ordered pipeline does not compile:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(|document: Document| Ok(document))
//!     .then(Classification::new(lexer))   // Document → Vec<Line>
//!     .then(Segmentation::new());         // Vec<Line> → Vec<Paragraph>
//! ```
//!
//! Because stages depend on the run's [`ScanConfig`](crate::granth::config::ScanConfig),
//! the complete pipeline is built per configuration, see
//! [`standard::segmentation_pipeline`]. A built pipeline is `Send + Sync` and can be shared
//! by every document of a batch.
//!
//! # Module Organization
//!
//! - [`stages`]: lexing and phase 1 stages (the assembling stages live in
//!   [assembling](crate::granth::assembling))
//! - [`standard`]: the pre-built full pipeline

pub mod stages;
pub mod standard;

use thiserror::Error;

/// Error raised by a failing stage
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },
}

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, TransformError>;
}

/// A composable transformation pipeline from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, TransformError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, TransformError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Append a stage, returning a transform with the stage's output type.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, TransformError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, TransformError> {
        Transform::run(self, input)
    }
}

//! Provides `Learner` trait.

use crate::Result;
use std::ops::ControlFlow;

/// The trait [`Learner`] defines the standard framework
/// of an anytime model search.
///
/// In each step `t = 1, 2, ...`,
/// the learner evaluates one candidate configuration
/// and decides whether to keep it.
/// The search stops when every candidate has been evaluated
/// or when [`Learner::step`] breaks early (e.g., time limit).
///
/// # Required Methods
/// - [`Learner::name`]
/// - [`Learner::preprocess`]
/// - [`Learner::step`]
/// - [`Learner::postprocess`]
/// - [`Learner::info`] ... optional.
///
/// # Provided Methods
/// - [`Learner::run`]
pub trait Learner {
    /// The model output by the search.
    type Output;

    /// Returns the name of the search.
    fn name(&self) -> &str;

    /// Returns the parameters of the search as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }

    /// A main function that runs the search.
    fn run(&mut self) -> Result<Self::Output> {
        self.preprocess()?;

        for iteration in 1.. {
            if self.step(iteration)?.is_break() { break; }
        }

        self.postprocess()
    }

    /// Pre-processing for `self`.
    /// As you can see in [`Learner::run`],
    /// this method is called before the first step.
    fn preprocess(&mut self) -> Result<()>;

    /// Search step per iteration.
    /// This method returns
    /// `ControlFlow::Continue(())` if there are candidates left,
    /// `ControlFlow::Break(terminated_iter)` otherwise.
    fn step(&mut self, iteration: usize) -> Result<ControlFlow<usize>>;

    /// Post-processing.
    fn postprocess(&mut self) -> Result<Self::Output>;
}

//! Diff-strategy selection and presentation.
//!
//! 1) [`select::select_strategy`] — pure, ordered guards over the inputs;
//! 2) [`plan::build_plan`]        — writes temp artifacts, yields a [`DiffPlan`];
//! 3) [`plan::present_plan`]      — issues presenter calls for the plan.

pub mod plan;
pub mod select;

pub use plan::{DiffPlan, build_plan, present_plan};
pub use select::{LocalFile, Selection, Strategy, select_strategy};

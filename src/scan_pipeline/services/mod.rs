/// Pure services over aligned query results
mod result_filter;
mod result_grouper;

pub use result_filter::{ResultFilter, SuppressionSummary};
pub use result_grouper::ResultGrouper;

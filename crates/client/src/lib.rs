//! Client-side flow of a quiz attempt: fetching a quiz from the server,
//! stepping through its questions, and reviewing the results.

pub mod fetch;
pub mod results;
pub mod session;

pub use fetch::Fetcher;
pub use results::Review;
pub use session::{Outcome, Session};

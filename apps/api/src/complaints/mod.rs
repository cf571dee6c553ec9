// Complaint intake, status transitions, voting, and summaries.
// Tallies and summaries are recomputed from current rows on every call;
// nothing here is cached.

pub mod handlers;
pub mod status;
pub mod summary;
pub mod voting;

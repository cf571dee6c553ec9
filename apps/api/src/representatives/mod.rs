// Representative directory: seeding, listing, and complaint attachment.
// Attachment is a point-in-time snapshot taken at complaint creation;
// re-seeding later does not re-run it.

pub mod attach;
pub mod handlers;

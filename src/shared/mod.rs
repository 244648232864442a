pub mod de;
pub mod messages;
pub mod snapshot;

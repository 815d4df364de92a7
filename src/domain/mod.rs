//! Domain logic - pure parsing and formatting rules independent of git access

pub mod branch;
pub mod commit;
pub mod tag;

pub use branch::BranchContext;
pub use commit::CommitIdentity;
pub use tag::{find_closest_tag, parse_decoration_line, TagCandidate};

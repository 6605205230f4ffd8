pub mod graph;
pub mod structural;

pub use graph::{RelationGraph, RelationKind, RelationMeta};
pub use structural::{MemberOf, MemberOfSources};

pub mod drop;
pub mod engine;
pub mod geometry;
pub mod hit_test;

pub use drop::{DropAction, DropTarget};
pub use engine::{CursorHint, DragEngine, DragSession, DragState, Release};
pub use geometry::{Point, Rect};
pub use hit_test::{CandidateKind, DropCandidate, HitRegions, SpatialQuery};

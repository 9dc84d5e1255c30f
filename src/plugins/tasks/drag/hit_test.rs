//! Finding what is under the pointer.
//!
//! The engine never looks at the rendering layer directly. It asks a
//! [`SpatialQuery`] for the drop candidates at a point, topmost first, and
//! picks a target from that list.

use super::drop::DropTarget;
use super::geometry::{Point, Rect};
use crate::plugins::tasks::helpers::{find_task_in, owning_folder};
use crate::plugins::tasks::types::TaskData;

#[derive(Debug, Clone, PartialEq)]
pub enum CandidateKind {
    /// A task row. `folder_id` is the enclosing folder when the host knows
    /// it; otherwise it is looked up in the task data.
    Task { folder_id: Option<String> },
    /// A folder container (header or task list area).
    Folder,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropCandidate {
    pub kind: CandidateKind,
    pub id: String,
    pub bounds: Rect,
}

impl DropCandidate {
    pub fn task(id: impl Into<String>, folder_id: Option<&str>, bounds: Rect) -> Self {
        Self {
            kind: CandidateKind::Task {
                folder_id: folder_id.map(str::to_string),
            },
            id: id.into(),
            bounds,
        }
    }

    pub fn folder(id: impl Into<String>, bounds: Rect) -> Self {
        Self {
            kind: CandidateKind::Folder,
            id: id.into(),
            bounds,
        }
    }
}

pub trait SpatialQuery {
    /// Every candidate under `point`, ordered topmost first.
    fn candidates_at(&self, point: Point) -> Vec<DropCandidate>;
}

/// Registry of on-screen task and folder rectangles. The host re-registers
/// regions whenever its layout changes.
#[derive(Debug, Default)]
pub struct HitRegions {
    regions: Vec<(i32, DropCandidate)>,
}

impl HitRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a region. Higher `z` is on top.
    ///
    /// A task row is keyed by its id alone, so registering it again after a
    /// move to another folder drops the old row.
    pub fn register(&mut self, z: i32, candidate: DropCandidate) {
        let kind = std::mem::discriminant(&candidate.kind);
        self.regions.retain(|(_, existing)| {
            !(existing.id == candidate.id && std::mem::discriminant(&existing.kind) == kind)
        });
        self.regions.push((z, candidate));
    }

    pub fn remove(&mut self, id: &str) {
        self.regions.retain(|(_, candidate)| candidate.id != id);
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl SpatialQuery for HitRegions {
    fn candidates_at(&self, point: Point) -> Vec<DropCandidate> {
        let mut hits: Vec<(usize, &(i32, DropCandidate))> = self
            .regions
            .iter()
            .enumerate()
            .filter(|(_, (_, candidate))| candidate.bounds.contains(point))
            .collect();
        // Later registrations win ties, like paint order.
        hits.sort_by(|(ia, (za, _)), (ib, (zb, _))| zb.cmp(za).then(ib.cmp(ia)));
        hits.into_iter()
            .map(|(_, (_, candidate))| candidate.clone())
            .collect()
    }
}

/// Picks the drop target from `candidates` (topmost first).
///
/// The first task that is not the dragged one wins, split at its vertical
/// midpoint. Failing that, the first folder other than the task's current
/// folder becomes a whole-folder target. Otherwise there is no target.
pub fn resolve_drop_target(
    candidates: &[DropCandidate],
    pointer: Point,
    dragged_task_id: &str,
    origin_folder_id: &str,
    data: &TaskData,
) -> Option<DropTarget> {
    for candidate in candidates {
        let CandidateKind::Task { folder_id } = &candidate.kind else {
            continue;
        };
        if candidate.id == dragged_task_id {
            continue;
        }
        let folder_id = match folder_id {
            Some(id) => find_task_in(data, &candidate.id, id).map(|_| id.clone()),
            None => owning_folder(data, &candidate.id).map(|folder| folder.id.clone()),
        };
        // A row whose folder can't be resolved, or that no longer holds the
        // task, is stale; keep scanning.
        let Some(folder_id) = folder_id else {
            continue;
        };
        return Some(DropTarget::Task {
            task_id: candidate.id.clone(),
            folder_id,
            insert_after: !candidate.bounds.is_top_half(pointer.y),
        });
    }

    candidates
        .iter()
        .find(|candidate| candidate.kind == CandidateKind::Folder && candidate.id != origin_folder_id)
        .map(|candidate| DropTarget::Folder {
            folder_id: candidate.id.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::tasks::types::{Folder, FolderLayout, Task};

    fn data() -> TaskData {
        let mut f1 = Folder::new("F1", "One", "#8b5cf6", FolderLayout::default());
        f1.tasks = ["A", "B"]
            .iter()
            .map(|id| Task {
                id: id.to_string(),
                text: id.to_string(),
                completed: false,
                colour: "#111827".into(),
            })
            .collect();
        let f2 = Folder::new("F2", "Two", "#8b5cf6", FolderLayout::default());
        TaskData::new(vec![f1, f2])
    }

    #[test]
    fn test_regions_are_returned_topmost_first() {
        let mut regions = HitRegions::new();
        regions.register(0, DropCandidate::folder("F1", Rect::new(0.0, 0.0, 100.0, 100.0)));
        regions.register(1, DropCandidate::task("A", Some("F1"), Rect::new(0.0, 0.0, 100.0, 20.0)));
        regions.register(0, DropCandidate::folder("F2", Rect::new(200.0, 0.0, 100.0, 100.0)));

        let hits = regions.candidates_at(Point::new(10.0, 10.0));
        let ids: Vec<&str> = hits.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "F1"]);
    }

    #[test]
    fn test_register_replaces_same_region() {
        let mut regions = HitRegions::new();
        regions.register(0, DropCandidate::folder("F1", Rect::new(0.0, 0.0, 10.0, 10.0)));
        regions.register(0, DropCandidate::folder("F1", Rect::new(50.0, 0.0, 10.0, 10.0)));
        assert_eq!(regions.len(), 1);
        assert!(regions.candidates_at(Point::new(5.0, 5.0)).is_empty());
    }

    #[test]
    fn test_task_beats_folder_and_skips_dragged_task() {
        let candidates = vec![
            DropCandidate::task("A", None, Rect::new(0.0, 0.0, 100.0, 20.0)),
            DropCandidate::task("B", None, Rect::new(0.0, 0.0, 100.0, 20.0)),
            DropCandidate::folder("F2", Rect::new(0.0, 0.0, 100.0, 100.0)),
        ];
        let target = resolve_drop_target(&candidates, Point::new(5.0, 15.0), "A", "F1", &data());
        assert_eq!(
            target,
            Some(DropTarget::Task {
                task_id: "B".into(),
                folder_id: "F1".into(),
                insert_after: true,
            })
        );
    }

    #[test]
    fn test_origin_folder_is_not_a_folder_target() {
        let candidates = vec![
            DropCandidate::task("A", Some("F1"), Rect::new(0.0, 0.0, 100.0, 20.0)),
            DropCandidate::folder("F1", Rect::new(0.0, 0.0, 100.0, 100.0)),
        ];
        assert_eq!(
            resolve_drop_target(&candidates, Point::new(5.0, 5.0), "A", "F1", &data()),
            None
        );

        let candidates = vec![DropCandidate::folder("F2", Rect::new(0.0, 0.0, 100.0, 100.0))];
        assert_eq!(
            resolve_drop_target(&candidates, Point::new(5.0, 5.0), "A", "F1", &data()),
            Some(DropTarget::Folder {
                folder_id: "F2".into()
            })
        );
    }

    #[test]
    fn test_unknown_task_row_is_skipped() {
        let candidates = vec![
            DropCandidate::task("ghost", None, Rect::new(0.0, 0.0, 100.0, 20.0)),
            DropCandidate::folder("F2", Rect::new(0.0, 0.0, 100.0, 100.0)),
        ];
        assert_eq!(
            resolve_drop_target(&candidates, Point::new(5.0, 5.0), "A", "F1", &data()),
            Some(DropTarget::Folder {
                folder_id: "F2".into()
            })
        );
    }

    #[test]
    fn test_register_after_move_replaces_task_row() {
        let mut regions = HitRegions::new();
        regions.register(0, DropCandidate::folder("F1", Rect::new(0.0, 0.0, 100.0, 100.0)));
        regions.register(1, DropCandidate::task("A", Some("F1"), Rect::new(0.0, 20.0, 100.0, 20.0)));
        regions.register(1, DropCandidate::task("A", Some("F2"), Rect::new(200.0, 20.0, 100.0, 20.0)));
        assert_eq!(regions.len(), 2);

        let mut data = data();
        let a = data.folders[0].tasks.remove(0);
        data.folders[1].tasks.push(a);

        let old_row = Point::new(10.0, 25.0);
        let hits = regions.candidates_at(old_row);
        assert_eq!(
            resolve_drop_target(&hits, old_row, "B", "F3", &data),
            Some(DropTarget::Folder {
                folder_id: "F1".into()
            })
        );
    }

    #[test]
    fn test_task_row_in_wrong_folder_is_skipped() {
        let candidates = vec![
            DropCandidate::task("A", Some("F2"), Rect::new(0.0, 0.0, 100.0, 20.0)),
            DropCandidate::folder("F2", Rect::new(0.0, 0.0, 100.0, 100.0)),
        ];
        assert_eq!(
            resolve_drop_target(&candidates, Point::new(5.0, 5.0), "B", "F1", &data()),
            Some(DropTarget::Folder {
                folder_id: "F2".into()
            })
        );
    }

    #[test]
    fn test_remove_and_clear_regions() {
        let mut regions = HitRegions::new();
        regions.register(0, DropCandidate::folder("F1", Rect::new(0.0, 0.0, 100.0, 100.0)));
        regions.register(1, DropCandidate::task("A", Some("F1"), Rect::new(0.0, 0.0, 100.0, 20.0)));
        regions.register(0, DropCandidate::folder("F2", Rect::new(200.0, 0.0, 100.0, 100.0)));

        regions.remove("A");
        assert_eq!(regions.len(), 2);
        let ids: Vec<String> = regions
            .candidates_at(Point::new(10.0, 10.0))
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["F1"]);

        regions.clear();
        assert!(regions.is_empty());
    }
}

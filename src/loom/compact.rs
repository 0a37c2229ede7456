//! Compaction: move unused frames or treadles to the top and drop them.

use super::{occurrences, Axis, Loom};
use tracing::debug;

impl Loom {
    /// Renumber frames (or treadles) so the used ones come first in their
    /// original order, then remove unused slots from the top down to the
    /// configured minimum.
    ///
    /// The tie-up axis is permuted together with the assignments. Returns
    /// true if any index moved or the count shrank.
    pub fn compact(&mut self, axis: Axis) -> bool {
        let num = self.capacity(axis);
        let min = self.minimum(axis);

        let counts: Vec<usize> = (0..num)
            .map(|idx| occurrences(self.assignments(axis), idx))
            .collect();
        let (used, free): (Vec<usize>, Vec<usize>) = (0..num).partition(|&idx| counts[idx] > 0);
        if free.is_empty() {
            return false;
        }

        // order[new] = old
        let order: Vec<usize> = used.iter().chain(free.iter()).copied().collect();
        let moved = order.iter().enumerate().any(|(new, &old)| new != old);

        if moved {
            let mut renumber = vec![0; num];
            for (new, &old) in order.iter().enumerate() {
                renumber[old] = new;
            }
            for slot in self.assignments_mut(axis).iter_mut() {
                if let Some(old) = *slot {
                    if old < num {
                        *slot = Some(renumber[old]);
                    }
                }
            }
            match axis {
                Axis::Frames => self.tieup.permute_frames(&order),
                Axis::Treadles => self.tieup.permute_treadles(&order),
            }
        }

        let mut removed = 0;
        for idx in (min..num).rev() {
            if counts[order[idx]] != 0 {
                break;
            }
            match axis {
                Axis::Frames => self.tieup.pop_frame(),
                Axis::Treadles => self.tieup.pop_treadle(),
            };
            removed += 1;
        }

        debug!(
            ?axis,
            ?order,
            removed,
            remaining = self.capacity(axis),
            "Compacted loom"
        );
        moved || removed > 0
    }

    /// Compact frames, then treadles. True if either changed.
    pub fn compact_all(&mut self) -> bool {
        let frames = self.compact(Axis::Frames);
        let treadles = self.compact(Axis::Treadles);
        frames || treadles
    }
}

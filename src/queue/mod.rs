use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub mod bucket;
pub mod ordered;

pub use bucket::BucketQueue;
pub use ordered::OrderedQueue;

/// Index of a half-edge in the beach line arena.
pub type HalfEdgeId = usize;

/// Position of a circle event: the bottom of the circle through three sites.
///
/// `y` is the vertex height plus the circle radius, `x` is the vertex abscissa.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventKey {
    pub y: f64,
    pub x: f64,
}

impl EventKey {
    pub fn new(vertex: Point, offset: f64) -> Self {
        Self {
            y: vertex.y + offset,
            x: vertex.x,
        }
    }

    /// The sweep position of this event, comparable to sites with [`Point::sweep_cmp`].
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn sweep_cmp(&self, other: &EventKey) -> Ordering {
        self.y.total_cmp(&other.y).then_with(|| self.x.total_cmp(&other.x))
    }
}

/// Which priority queue backs the circle events of a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// Buckets over the y-range of the sites, each an ordered chain.
    #[default]
    Buckets,
    /// A balanced tree keyed by event position.
    Ordered,
}

/// Trait defining the pending circle events of a sweep.
/// This allows swapping between the bucketed queue and a tree-backed one.
///
/// Entries are ordered by [`EventKey::sweep_cmp`]. Among entries with equal keys the
/// most recently inserted one is extracted first. Implementations must agree on this,
/// as the order of equal events decides the numbering of vertices.
pub trait EventQueue {
    /// Schedule the circle event owned by half-edge `he`.
    fn insert(&mut self, he: HalfEdgeId, key: EventKey);

    /// Remove the event owned by `he`, which was inserted with `key`.
    /// Returns `false` if `he` had no pending event.
    fn delete(&mut self, he: HalfEdgeId, key: EventKey) -> bool;

    /// Position of the earliest pending event.
    fn min_key(&mut self) -> Option<EventKey>;

    /// Remove and return the earliest pending event.
    fn extract_min(&mut self) -> Option<(HalfEdgeId, EventKey)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<Q: EventQueue>(queue: &mut Q) -> Vec<HalfEdgeId> {
        let mut order = Vec::new();
        while let Some((he, _)) = queue.extract_min() {
            order.push(he);
        }
        order
    }

    fn scenario<Q: EventQueue>(queue: &mut Q) -> Vec<HalfEdgeId> {
        queue.insert(10, EventKey { y: 5.0, x: 1.0 });
        queue.insert(11, EventKey { y: 2.0, x: 9.0 });
        queue.insert(12, EventKey { y: 5.0, x: 0.0 });
        queue.insert(13, EventKey { y: 5.0, x: 1.0 });
        queue.insert(14, EventKey { y: 9.5, x: 3.0 });
        queue.insert(15, EventKey { y: 0.5, x: 3.0 });
        assert!(queue.delete(15, EventKey { y: 0.5, x: 3.0 }));
        assert!(!queue.delete(99, EventKey { y: 1.0, x: 1.0 }));
        drain(queue)
    }

    #[test]
    fn test_queues_agree() {
        let mut buckets = BucketQueue::new(6, 0.0, 10.0);
        let mut ordered = OrderedQueue::new();

        let a = scenario(&mut buckets);
        let b = scenario(&mut ordered);

        // 13 was inserted after 10 with an equal key, so it comes first.
        assert_eq!(a, vec![11, 12, 13, 10, 14]);
        assert_eq!(a, b);
        assert!(buckets.is_empty());
        assert!(ordered.is_empty());
    }
}

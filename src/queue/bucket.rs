use crate::queue::{EventKey, EventQueue, HalfEdgeId};
use std::cmp::Ordering;

/// A circle event queue based on uniform buckets over the y-range of the sites.
///
/// Each bucket is a chain kept in event order. Deleting an event only scans the
/// bucket its key maps to, and the minimum is found by advancing a cursor over
/// the buckets, which never has to move back further than the lowest insertion.
pub struct BucketQueue {
    /// Ordered chains of events, one per bucket.
    buckets: Vec<Vec<(EventKey, HalfEdgeId)>>,
    /// Lowest bucket that may hold an event.
    min_bucket: usize,
    /// Number of pending events.
    count: usize,
    /// Lowest site y.
    ymin: f64,
    /// Height of the site extents.
    deltay: f64,
}

impl BucketQueue {
    /// Creates a queue sized for `site_count` sites spanning `ymin..=ymax`.
    ///
    /// The bucket count is `4 * floor(sqrt(site_count + 4))`.
    pub fn new(site_count: usize, ymin: f64, ymax: f64) -> Self {
        let sqrt_sites = ((site_count + 4) as f64).sqrt() as usize;
        let size = 4 * sqrt_sites;
        BucketQueue {
            buckets: vec![Vec::new(); size],
            min_bucket: 0,
            count: 0,
            ymin,
            deltay: ymax - ymin,
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Maps an event height to its bucket, clamping out-of-range and undefined heights.
    pub fn bucket_index(&self, y: f64) -> usize {
        let size = self.buckets.len();
        let b = ((y - self.ymin) / self.deltay * size as f64).floor();
        // A flat site set gives deltay == 0, and NaN lands in the first bucket.
        if b.is_nan() || b < 0.0 {
            0
        } else if b >= size as f64 {
            size - 1
        } else {
            b as usize
        }
    }
}

impl EventQueue for BucketQueue {
    fn insert(&mut self, he: HalfEdgeId, key: EventKey) {
        let b = self.bucket_index(key.y);
        let chain = &mut self.buckets[b];
        let pos = chain
            .iter()
            .position(|(other, _)| key.sweep_cmp(other) != Ordering::Greater)
            .unwrap_or(chain.len());
        chain.insert(pos, (key, he));

        if b < self.min_bucket {
            self.min_bucket = b;
        }
        self.count += 1;
    }

    fn delete(&mut self, he: HalfEdgeId, key: EventKey) -> bool {
        let b = self.bucket_index(key.y);
        let chain = &mut self.buckets[b];
        match chain.iter().position(|&(_, id)| id == he) {
            Some(pos) => {
                chain.remove(pos);
                self.count -= 1;
                true
            }
            None => false,
        }
    }

    fn min_key(&mut self) -> Option<EventKey> {
        if self.count == 0 {
            return None;
        }
        while self.buckets[self.min_bucket].is_empty() {
            self.min_bucket += 1;
        }
        self.buckets[self.min_bucket].first().map(|&(key, _)| key)
    }

    fn extract_min(&mut self) -> Option<(HalfEdgeId, EventKey)> {
        self.min_key()?;
        let (key, he) = self.buckets[self.min_bucket].remove(0);
        self.count -= 1;
        Some((he, key))
    }

    fn len(&self) -> usize {
        self.count
    }
}

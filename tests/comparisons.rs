use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use vorosweep::{build, Point, QueueKind, SiteId, Voronoi, VoronoiConfig};

fn random_sites(count: u32, seed: u64) -> Vec<(SiteId, Point)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|id| (id, Point::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0))))
        .collect()
}

fn voronoi_from(sites: &[(SiteId, Point)]) -> Voronoi {
    let mut voronoi = Voronoi::new();
    for &(id, p) in sites {
        voronoi.insert(id, p);
    }
    voronoi
}

/// Andrew's monotone chain; returns the number of strict hull vertices.
fn hull_size(points: &[Point]) -> usize {
    let mut pts: Vec<Point> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    let cross = |o: &Point, a: &Point, b: &Point| (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x);

    let mut hull: Vec<Point> = Vec::new();
    for pass in 0..2 {
        let start = hull.len();
        let iter: Box<dyn Iterator<Item = &Point>> = if pass == 0 {
            Box::new(pts.iter())
        } else {
            Box::new(pts.iter().rev())
        };
        for p in iter {
            while hull.len() >= start + 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
                hull.pop();
            }
            hull.push(*p);
        }
        hull.pop();
    }
    hull.len()
}

#[test]
fn test_queue_kinds_agree() {
    for seed in 0..5 {
        let sites = random_sites(400, seed);
        let buckets = build(&sites, &VoronoiConfig::default());
        let ordered = build(
            &sites,
            &VoronoiConfig {
                queue: QueueKind::Ordered,
                ..Default::default()
            },
        );
        assert_eq!(buckets, ordered, "seed {}", seed);
    }
}

#[test]
fn test_open_edges_match_hull() {
    for seed in 10..15 {
        let sites = random_sites(250, seed);
        let diagram = build(&sites, &VoronoiConfig::default());
        let points: Vec<Point> = sites.iter().map(|&(_, p)| p).collect();

        assert_eq!(diagram.open_edge_count(), hull_size(&points), "seed {}", seed);
        // Euler: a connected planar diagram of n cells has at most 3n - 6 edges.
        assert!(diagram.edges().len() <= 3 * sites.len() - 6);
    }
}

#[test]
fn test_vertices_are_empty_circle_centers() {
    let sites = random_sites(300, 21);
    let positions: BTreeMap<SiteId, Point> = sites.iter().copied().collect();
    let diagram = build(&sites, &VoronoiConfig::default());

    for edge in diagram.edges() {
        let a = positions[&edge.sites[0]];
        let b = positions[&edge.sites[1]];
        for v in edge.vertices.iter().flatten() {
            let v = diagram.vertices()[*v];
            let r = v.distance(&a);
            assert!((r - v.distance(&b)).abs() < 1e-6 * r.max(1.0));

            // No site is strictly inside the circle.
            for p in positions.values() {
                assert!(v.distance(p) >= r - 1e-6 * r.max(1.0));
            }
        }
    }
}

#[test]
fn test_closest_matches_brute_force() {
    let sites = random_sites(200, 31);
    let mut voronoi = voronoi_from(&sites);
    let mut rng = StdRng::seed_from_u64(32);

    for _ in 0..500 {
        let q = Point::new(rng.gen_range(-600.0..600.0), rng.gen_range(-600.0..600.0));
        let expected = sites
            .iter()
            .min_by(|a, b| a.1.distance(&q).total_cmp(&b.1.distance(&q)))
            .map(|&(id, _)| id);
        assert_eq!(voronoi.closest_to(q), expected);
    }

    // A site's own coordinate resolves to itself.
    for &(id, p) in &sites {
        assert_eq!(voronoi.closest_to(p), Some(id));
    }
}

#[test]
fn test_containment_consistency() {
    let sites = random_sites(150, 41);
    let mut voronoi = voronoi_from(&sites);

    for &(id, p) in &sites {
        assert!(voronoi.contains(id, p), "site {} not in its own cell", id);
    }

    // The cell of the nearest site always holds a point.
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let q = Point::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
        let nearest = voronoi.closest_to(q).unwrap();
        assert!(voronoi.contains(nearest, q));

        let holders = sites.iter().filter(|&&(id, _)| voronoi.contains(id, q)).count();
        assert!(holders >= 1);
    }
}

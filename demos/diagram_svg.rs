use plotters::prelude::*;
use rand::Rng;
use vorosweep::{Point, QueueKind, Voronoi, VoronoiConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_example("voronoi_buckets.svg", QueueKind::Buckets, None)?;
    run_example("voronoi_ordered.svg", QueueKind::Ordered, None)?;
    run_example("voronoi_boundary.svg", QueueKind::Buckets, Some((Point::new(50.0, 50.0), 25.0)))?;
    Ok(())
}

/// Plots edges and sites of a random diagram. With an area of interest, the
/// boundary neighbors of that circle are highlighted.
fn run_example(
    filename: &str,
    queue: QueueKind,
    aoi: Option<(Point, f64)>,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .build_cartesian_2d(0.0..100.0, 0.0..100.0)?;

    let config = VoronoiConfig { queue, ..Default::default() };
    let mut voronoi = Voronoi::with_config(config)?;

    let mut rng = rand::thread_rng();
    for id in 0..300 {
        voronoi.insert(id, (rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)));
    }

    let highlighted = match aoi {
        Some((center, radius)) => voronoi.boundary_neighbors(center, radius),
        None => Vec::new(),
    };

    // Draw edges
    // Cocircular sites leave zero-length edges behind.
    let segments: Vec<_> = voronoi
        .edges()
        .iter()
        .filter_map(|e| e.segment)
        .filter(|s| s.length() > 0.0)
        .collect();
    for segment in segments {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(segment.p1.x, segment.p1.y), (segment.p2.x, segment.p2.y)],
            BLACK.mix(0.5),
        )))?;
    }

    // Draw area of interest
    if let Some((center, radius)) = aoi {
        let ring: Vec<(f64, f64)> = (0..=128)
            .map(|i| {
                let t = i as f64 / 128.0 * std::f64::consts::TAU;
                (center.x + radius * t.cos(), center.y + radius * t.sin())
            })
            .collect();
        chart.draw_series(std::iter::once(PathElement::new(ring, BLUE.stroke_width(2))))?;
    }

    // Draw sites
    let sites: Vec<(u32, (f64, f64))> = voronoi.all_sites().iter().map(|(&id, p)| (id, (p.x, p.y))).collect();
    chart.draw_series(sites.iter().map(|&(id, p)| {
        let color = if highlighted.contains(&id) { BLUE } else { RED };
        Circle::new(p, 3, color.filled())
    }))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}

//! # vorosweep
//!
//! `vorosweep` is a Rust library for planar Voronoi diagrams over a dynamic set of sites,
//! designed to be used in Rust as well as compiled to WebAssembly (WASM). The diagram is
//! built with Fortune's sweep-line algorithm and answers proximity queries for spatial
//! publish/subscribe overlays: who contains a point, who borders whom, and whose cell
//! reaches past an area of interest.
//!
//! ## Features
//!
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript and TypeScript.
//! - **Lazy rebuilds**: Inserting, moving or removing sites only marks the diagram stale; the next query rebuilds it.
//! - **Swappable event queues**: Circle events run through a bucketed queue or a balanced tree ([`QueueKind`]).
//! - **Neighbor queries**: Enclosing neighbors, multi-level rings, area-of-interest and boundary neighbors.
//!
//! ## Example
//!
//! See the `demos/` directory for plotting a diagram to SVG.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Voronoi`] struct, which owns the sites and the last built [`Diagram`].

mod bounds;
mod config;
mod diagram;
mod error;
mod geometry;
mod query;
pub mod queue;
mod sweep;
mod voronoi;
pub mod wasm;

pub use bounds::BoundingBox;
pub use config::VoronoiConfig;
pub use config::DEFAULT_BOUNDARY_EPSILON;
pub use config::DEFAULT_PADDING;
pub use config::DEFAULT_PARALLEL_EPSILON;
pub use diagram::Cell;
pub use diagram::Diagram;
pub use diagram::Edge;
pub use error::Result;
pub use error::VoronoiError;
pub use geometry::Line;
pub use geometry::Point;
pub use geometry::Segment;
pub use queue::QueueKind;
pub use sweep::build;
pub use voronoi::SiteId;
pub use voronoi::Voronoi;

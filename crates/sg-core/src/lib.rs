pub mod brush;
pub mod model;
pub mod sampler;

pub use brush::{BristlePoint, BristleSegment, Brush, StrokeFrame};
pub use model::{BoardSetup, BrushConfig, Color, GuideLayout, GuideRing};

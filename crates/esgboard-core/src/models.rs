pub mod metric;
pub mod office;

pub use metric::{DataPoint, MetricRecord, Target};
pub use office::{Coordinates, Office};

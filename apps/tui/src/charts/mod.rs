pub mod binding;
pub mod tween;

pub use binding::{ChartBinding, TopicCharts};
pub use tween::{Tween, ENTRANCE_DURATION};

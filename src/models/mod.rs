pub mod conversion;
pub mod point;
pub mod stopover;

pub use conversion::{ConversionResult, Mode};
pub use point::{PointRecord, TrackTime};
pub use stopover::{Endpoint, StopoverRecord};

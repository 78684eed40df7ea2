pub mod records;

pub use records::{PointRecord, RecordGenerator};

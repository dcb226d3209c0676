/// Safe numeric conversion helpers.
///
/// Converts between `f64` and `usize` without silent data loss; used for
/// list indexing and length reporting.
pub mod num;

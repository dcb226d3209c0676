/// The parsing algorithm.
///
/// Contains the two-cursor handle parser that reshapes the flat token
/// sequence into nested nodes using nothing but the priority table.
pub mod core;
/// Operator priorities.
///
/// Declares the `(left, right)` priority pair, the keyed table with its
/// fallback lookup, and the definitional Teacup priority instance.
pub mod priority;

/// Filters operating on multiple types.
pub mod common;
/// Filters operating on numbers.
pub mod number;
/// Filters operating on strings.
pub mod string;

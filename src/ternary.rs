/// Conditional expression.  Rust's `if` is already an expression, but
/// `cargo fmt` spreads every one of them over five lines, and the edge
/// rules of the energy and cost tables (left edge, right edge, bottom
/// row) read far better as one-liners.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

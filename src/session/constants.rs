/// Value every expression must reach
pub const TARGET: f64 = 10.0;
/// Tolerance for the win check
pub const EPSILON: f64 = 1e-6;
/// Decimal places shown for the running value
pub const DISPLAY_DECIMALS: i32 = 3;

pub const INDEX_KEY: &str = "make10_problem_index";
pub const LOCALE_KEY: &str = "make10_locale";

//! Brand colours.

pub const NAIBLE_GREEN: &str = "#00B67A";
pub const NAIBLE_DARK_GREEN: &str = "#009966";
pub const NAIBLE_LIGHT_GREEN: &str = "#33CC99";
pub const NAIBLE_ACCENT_BLUE: &str = "#4F46E5";
pub const NAIBLE_DARK: &str = "#1A1A2E";

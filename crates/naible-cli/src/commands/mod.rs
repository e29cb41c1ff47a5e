pub mod a11y;
pub mod data;
pub mod onboard;
pub mod serve;
pub mod theme;
pub mod user;
pub mod utils;

pub mod objective;
pub mod plan;
pub mod steps;
pub mod window;

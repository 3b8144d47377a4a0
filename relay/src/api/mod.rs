pub mod predict;
pub mod welcome;

pub use predict::{predict, PredictionResponse};
pub use welcome::{welcome, WELCOME_MESSAGE};

pub mod gate;

pub use gate::{validate, Rejection};

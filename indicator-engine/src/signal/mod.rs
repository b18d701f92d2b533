//! Signal states and indicator readings

pub mod category;
pub mod reading;

pub use category::*;
pub use reading::*;

pub mod model;
pub mod requests;

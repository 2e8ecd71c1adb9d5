//! Restaurant lookup data

pub mod model;
pub mod repository;

pub use model::Restaurant;
pub use repository::RestaurantRepository;

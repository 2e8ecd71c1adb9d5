//! Community feed records. The booking core only seeds them.

pub mod model;
pub mod repository;

pub use model::{Comment, Favorite, Post};
pub use repository::CommunityRepository;

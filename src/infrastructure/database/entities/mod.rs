//! Database entities module

pub mod comment;
pub mod favorite;
pub mod post;
pub mod reservation;
pub mod restaurant;
pub mod user;

pub use comment::Entity as Comment;
pub use favorite::Entity as Favorite;
pub use post::Entity as Post;
pub use reservation::Entity as Reservation;
pub use restaurant::Entity as Restaurant;
pub use user::Entity as User;

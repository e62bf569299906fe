//! Domain entities - the core business objects.

mod group;
mod post;
mod user;

pub use group::Group;
pub use post::{Post, PostEntry, PostFilter};
pub use user::{Author, User};

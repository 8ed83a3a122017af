mod post;
mod user;

pub use post::{Post, PostWithAuthor};
pub use user::{User, UserWithPostCount};

mod list;
mod login;
mod profile;

pub use list::list;
pub use login::login;
pub use profile::delete_profile;

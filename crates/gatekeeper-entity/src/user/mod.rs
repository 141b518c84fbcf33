//! User domain entities.

pub mod access_list;
pub mod lifetime;
pub mod model;

pub use access_list::AccessList;
pub use lifetime::{MAX_LIFETIME_DAYS, TokenLifetime};
pub use model::{NewUser, User, UserUpdate};

pub mod directory;
pub mod permissions;
pub mod user;

pub use directory::*;
pub use permissions::*;
pub use user::*;

mod links;
mod users;
mod utils;

pub use utils::test_store;

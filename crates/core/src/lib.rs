pub mod error;
pub mod model;
pub mod slug;
pub mod types;

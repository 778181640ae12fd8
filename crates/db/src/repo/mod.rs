pub mod actors;
pub mod categories;
pub mod comments;
pub mod episodes;
pub mod programs;
pub mod seasons;
pub mod users;

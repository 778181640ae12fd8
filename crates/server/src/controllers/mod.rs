pub mod category;
pub mod session;
pub mod wild;

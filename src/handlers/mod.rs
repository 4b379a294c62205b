pub mod articles;
pub mod queries;

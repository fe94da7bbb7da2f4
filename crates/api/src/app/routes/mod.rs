pub mod posts;
pub mod system;

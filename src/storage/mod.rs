pub mod memory;
pub mod postgres;

pub use memory::InMemorySongRepository;
pub use postgres::{ensure_schema, PostgresSongRepository};

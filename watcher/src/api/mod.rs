pub mod practicum;

pub use practicum::PracticumClient;

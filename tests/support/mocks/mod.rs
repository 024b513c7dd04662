// tests/support/mocks/mod.rs
pub mod media;
pub mod repos;
pub mod security;
pub mod time;

pub use media::{DummyMediaStorage, FailingMediaStorage, SelectiveMediaStorage};
pub use repos::InMemoryUserRepo;
pub use security::{BrokenTokenManager, DummyPasswordHasher, SeqTokenManager, StrictPasswordHasher};
pub use time::DummyClock;

pub mod states;
pub mod error;
pub mod arena;
pub mod forces;
pub mod scheduler;
pub mod engine;
pub mod scenario;

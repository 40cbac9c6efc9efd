pub mod event;
pub mod session;
pub mod setup;
pub mod step;
pub mod world;

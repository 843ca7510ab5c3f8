//! Event system for bubblewrap.
//! Handlers override only the events they need; dispatch is synchronous.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::RunEventHandler;

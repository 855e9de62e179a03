//! Terminal event loop for the interactive `evoflap` commands.
//!
//! [`Runtime::run`] drives an [`App`]: game ticks at a configurable rate,
//! rendering according to a [`RenderMode`], and terminal input in between.
//! When the loop falls behind (high tick rates, slow frames), the missed ticks
//! are delivered in a batch so simulated time stays in step with wall-clock
//! time.

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;

//! Minimal terminal runtime: a clock, a render-on-change loop and the
//! [`App`] trait that ties them to an application.

pub use self::{app::App, runner::Tui};

mod app;
mod event;
mod event_loop;
mod runner;

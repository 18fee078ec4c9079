mod command;
mod mouse;
mod run;
mod state;
mod types;
mod worker;


pub use state::{App, BoxedPlayer, BoxedSettings};
pub use worker::{Job, Reply, Worker};

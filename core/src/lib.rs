#![no_std]

extern crate alloc;

pub use board::*;
pub use error::*;
pub use frame::*;
pub use session::*;
pub use types::*;

pub use lightsout_protocol as protocol;

mod board;
mod error;
mod frame;
mod session;
mod types;

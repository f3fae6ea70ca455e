//! Commands understood by a multimap-enabled server and the replies they produce.
//!
//! A [`Cmd`] is built either directly by the benchmark or by parsing an argument vector. It can be
//! turned back into an argument vector or into a [`redis::Cmd`] ready to be sent.

mod cmd;
mod response;

pub use cmd::{Cmd, CmdError, DEL, INSERT, LEN, SET, VALUES};
pub use response::Response;

//! JSONL dispatch of launcher calls onto the runner.
//!
//! Each connection carries one call. The client sends a single JSONL line
//! naming the interface, object path, member, and string arguments:
//!
//! ```json
//! {"interface":"org.kde.krunner1","path":"/runner","member":"Match","arguments":["!github"]}
//! ```
//!
//! The daemon answers with the member's reply (if any) followed by a terminal
//! `exit` message:
//!
//! ```json
//! {"kind":"matches","matches":[["gh/github","Copy \"gh/github\"","edit-copy",100,1.0,{"category":"Brand","subtext":"github"}]]}
//! {"kind":"exit","status":0}
//! ```
//!
//! Calls the runner cannot accept (bad JSON, unknown interface, object or
//! member, wrong argument count) are answered with a `stream` message on
//! `stderr` and a non-zero exit. They never reach the runner.

mod errors;
mod handler;
mod request;
mod response;
mod router;

pub use self::errors::DispatchError;
pub(crate) use self::handler::DispatchConnectionHandler;

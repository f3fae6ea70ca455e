//! The multimap value type: string keys mapped to ordered lists of string values.
//!
//! [`MultiMap`] is the data structure itself. [`Keyspace`] stores multimaps alongside plain
//! strings under top-level keys and executes [`Cmd`][protocol::Cmd]s against them, which is what a
//! server with the multimap type loaded does for `MULTIMAP.*` and `SET`. The [`snapshot`] module
//! persists a single map and rewrites it back into commands.
//!
//! The `mmbench` driver only uses [`Keyspace`], in its in-process benches. Snapshots are for
//! anything that hosts the type and has to keep a map across restarts or replay it elsewhere:
//!
//! ```
//! use multimap::{snapshot, Keyspace, MultiMap};
//!
//! let mut map = MultiMap::new();
//! map.insert("abcde", ["one".to_owned(), "two".to_owned()]);
//!
//! let mut file = Vec::new();
//! snapshot::save(&map, &mut file)?;
//! let loaded = snapshot::load(&*file)?;
//! assert_eq!(loaded, map);
//!
//! let mut keyspace = Keyspace::new();
//! for cmd in snapshot::rewrite("map", &loaded) {
//!     assert!(!keyspace.handle_cmd(cmd).is_err());
//! }
//! assert_eq!(keyspace.map("map"), Some(&map));
//! # Ok::<(), multimap::Error>(())
//! ```

mod error;
mod keyspace;
mod multi_map;
pub mod snapshot;

pub use error::{Error, Result};
pub use keyspace::Keyspace;
pub use multi_map::MultiMap;

//! A [`Keyspace`] executes commands against values stored under top-level keys.

use std::borrow::Cow;

use hashbrown::HashMap;
use protocol::{Cmd, Response};
use tracing::{debug, trace};

use crate::MultiMap;

/// A value stored under a top-level key.
#[derive(Debug)]
enum Value {
    String(String),
    MultiMap(MultiMap),
}

/// Top-level keys and their values, either plain strings or multimaps.
#[derive(Debug, Default)]
pub struct Keyspace {
    keys: HashMap<String, Value>,
}

impl Keyspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a command and returns the reply a server would send.
    ///
    /// Multimap commands against a key holding a string get a `WRONGTYPE` error. `Set` replaces
    /// whatever was stored, multimaps included.
    pub fn handle_cmd(&mut self, cmd: Cmd<'_>) -> Response<'_> {
        trace!(%cmd, "Handling command");
        match cmd {
            Cmd::Insert(map, key, values) => {
                let value = self
                    .keys
                    .entry(map.into_owned())
                    .or_insert_with(|| Value::MultiMap(MultiMap::new()));
                match value {
                    Value::MultiMap(m) => {
                        m.insert(key, values.into_iter().map(Cow::into_owned));
                        Response::Ok
                    }
                    Value::String(_) => Response::wrong_type(),
                }
            }
            Cmd::Len(map, key) => match self.keys.get(&*map) {
                None => Response::Integer(0),
                Some(Value::MultiMap(m)) => Response::Integer(m.key_len(&key) as i64),
                Some(Value::String(_)) => Response::wrong_type(),
            },
            Cmd::Values(map, key) => match self.keys.get(&*map) {
                None => Response::Array(Vec::new()),
                Some(Value::MultiMap(m)) => {
                    let values = m.values(&key).unwrap_or_default();
                    Response::Array(values.iter().map(|v| Cow::Borrowed(v.as_str())).collect())
                }
                Some(Value::String(_)) => Response::wrong_type(),
            },
            Cmd::Del(map, key) => match self.keys.get_mut(&*map) {
                None => Response::Integer(0),
                Some(Value::MultiMap(m)) => Response::Integer(m.delete_key(&key) as i64),
                Some(Value::String(_)) => Response::wrong_type(),
            },
            Cmd::Set(key, value) => {
                if let Some(Value::MultiMap(_)) = self
                    .keys
                    .insert(key.into_owned(), Value::String(value.into_owned()))
                {
                    debug!("Overwrote a multimap with a string");
                }
                Response::Ok
            }
        }
    }

    /// The multimap stored under `name`, if there is one.
    pub fn map(&self, name: &str) -> Option<&MultiMap> {
        match self.keys.get(name) {
            Some(Value::MultiMap(m)) => Some(m),
            _ => None,
        }
    }

    /// The string stored under `key`, if there is one.
    pub fn string(&self, key: &str) -> Option<&str> {
        match self.keys.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Stores `map` under `name`, replacing anything already there.
    pub fn restore(&mut self, name: impl Into<String>, map: MultiMap) {
        self.keys.insert(name.into(), Value::MultiMap(map));
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

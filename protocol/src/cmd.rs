//! [`Cmd`] represents a request to read or modify a key.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;
use tracing::debug;

pub const INSERT: &str = "MULTIMAP.INSERT";
pub const LEN: &str = "MULTIMAP.LEN";
pub const VALUES: &str = "MULTIMAP.VALUES";
pub const DEL: &str = "MULTIMAP.DEL";
pub const SET: &str = "SET";

/// Enumeration of commands that can be issued.
///
/// The multimap commands all address a map stored under a top-level key, then a key inside that
/// map. `Set` is the plain string command used as a baseline.
#[derive(Clone, Debug, PartialEq)]
pub enum Cmd<'a> {
    /// Append one or more values to `key` inside `map`.
    Insert(Cow<'a, str>, Cow<'a, str>, Vec<Cow<'a, str>>),
    /// Count the values stored for `key` inside `map`.
    Len(Cow<'a, str>, Cow<'a, str>),
    /// List the values stored for `key` inside `map`.
    Values(Cow<'a, str>, Cow<'a, str>),
    /// Remove `key` from `map`.
    Del(Cow<'a, str>, Cow<'a, str>),
    /// Set a string key to a value.
    Set(Cow<'a, str>, Cow<'a, str>),
}

/// Reasons an argument vector isn't a valid [`Cmd`]. The messages follow the server's error
/// replies.
#[derive(Debug, Error, PartialEq)]
pub enum CmdError {
    #[error("ERR empty command")]
    Empty,

    #[error("ERR unknown command '{0}'")]
    UnknownCommand(String),

    #[error("ERR wrong number of arguments for '{0}' command")]
    WrongArity(&'static str),
}

impl<'a> Cmd<'a> {
    /// Parses a `Cmd` out of a full argument vector, command name included. Names are matched
    /// case-insensitively.
    pub fn parse<S: AsRef<str>>(argv: &'a [S]) -> Result<Self, CmdError> {
        let (name, args) = argv.split_first().ok_or(CmdError::Empty)?;
        let name = name.as_ref();
        debug!(name, args = args.len(), "Parsing command");

        let arg = move |i: usize| -> Cow<'a, str> { Cow::Borrowed(args[i].as_ref()) };
        if name.eq_ignore_ascii_case(INSERT) {
            if args.len() < 3 {
                return Err(CmdError::WrongArity(INSERT));
            }
            let values = args[2..].iter().map(|v| Cow::Borrowed(v.as_ref())).collect();
            Ok(Self::Insert(arg(0), arg(1), values))
        } else if name.eq_ignore_ascii_case(LEN) {
            ensure_arity(args, 2, LEN)?;
            Ok(Self::Len(arg(0), arg(1)))
        } else if name.eq_ignore_ascii_case(VALUES) {
            ensure_arity(args, 2, VALUES)?;
            Ok(Self::Values(arg(0), arg(1)))
        } else if name.eq_ignore_ascii_case(DEL) {
            ensure_arity(args, 2, DEL)?;
            Ok(Self::Del(arg(0), arg(1)))
        } else if name.eq_ignore_ascii_case(SET) {
            ensure_arity(args, 2, SET)?;
            Ok(Self::Set(arg(0), arg(1)))
        } else {
            Err(CmdError::UnknownCommand(name.to_owned()))
        }
    }

    /// The command name as sent on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Insert(..) => INSERT,
            Self::Len(..) => LEN,
            Self::Values(..) => VALUES,
            Self::Del(..) => DEL,
            Self::Set(..) => SET,
        }
    }

    /// The arguments following the command name.
    pub fn args(&self) -> Vec<&str> {
        match self {
            Self::Insert(map, key, values) => {
                let mut args = Vec::with_capacity(2 + values.len());
                args.push(&**map);
                args.push(&**key);
                args.extend(values.iter().map(|v| &**v));
                args
            }
            Self::Len(map, key) | Self::Values(map, key) | Self::Del(map, key) => {
                vec![&**map, &**key]
            }
            Self::Set(key, value) => vec![&**key, &**value],
        }
    }

    /// The full argument vector, name first. Parsing this yields an equal `Cmd`.
    pub fn argv(&self) -> Vec<&str> {
        let mut argv = vec![self.name()];
        argv.extend(self.args());
        argv
    }

    /// Builds the [`redis::Cmd`] that sends this command.
    pub fn to_redis(&self) -> redis::Cmd {
        let mut cmd = redis::cmd(self.name());
        for arg in self.args() {
            cmd.arg(arg);
        }
        cmd
    }

    /// Detaches the command from whatever it was borrowing.
    pub fn into_owned(self) -> Cmd<'static> {
        fn own(s: Cow<'_, str>) -> Cow<'static, str> {
            Cow::Owned(s.into_owned())
        }

        match self {
            Self::Insert(map, key, values) => {
                Cmd::Insert(own(map), own(key), values.into_iter().map(own).collect())
            }
            Self::Len(map, key) => Cmd::Len(own(map), own(key)),
            Self::Values(map, key) => Cmd::Values(own(map), own(key)),
            Self::Del(map, key) => Cmd::Del(own(map), own(key)),
            Self::Set(key, value) => Cmd::Set(own(key), own(value)),
        }
    }
}

impl fmt::Display for Cmd<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        for arg in self.args() {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

fn ensure_arity<S>(args: &[S], expected: usize, name: &'static str) -> Result<(), CmdError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(CmdError::WrongArity(name))
    }
}

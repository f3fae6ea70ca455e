//! Responses to a [`Cmd`][crate::Cmd].

use std::borrow::Cow;
use std::fmt;

pub(crate) const WRONG_TYPE: &str =
    "WRONGTYPE Operation against a key holding the wrong kind of value";

/// A reply to a [`Cmd`][crate::Cmd], shaped like the replies a server sends.
#[derive(Debug, PartialEq)]
pub enum Response<'a> {
    /// The command succeeded and has nothing to report. Sent for `Insert` and `Set`.
    Ok,
    /// A count. Sent for `Len`, and for `Del` as 1 if the key existed and 0 otherwise.
    Integer(i64),
    /// The values for a key, in insertion order. Sent for `Values`.
    Array(Vec<Cow<'a, str>>),
    /// The command failed.
    Err(Cow<'a, str>),
}

impl Response<'_> {
    /// The error returned when a command addresses a key holding another type.
    pub fn wrong_type() -> Self {
        Self::Err(WRONG_TYPE.into())
    }

    pub fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }
}

/// Renders the response the way `redis-cli` prints it.
impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::Integer(n) => write!(f, "(integer) {n}"),
            Self::Array(values) if values.is_empty() => f.write_str("(empty array)"),
            Self::Array(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str("\n")?;
                    }
                    write!(f, "{}) \"{value}\"", i + 1)?;
                }
                Ok(())
            }
            Self::Err(e) => write!(f, "(error) {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_like_cli() {
        assert_eq!(Response::Ok.to_string(), "OK");
        assert_eq!(Response::Integer(3).to_string(), "(integer) 3");
        assert_eq!(Response::Array(vec![]).to_string(), "(empty array)");
        assert_eq!(
            Response::Array(vec!["a".into(), "b".into()]).to_string(),
            "1) \"a\"\n2) \"b\""
        );
        assert_eq!(
            Response::wrong_type().to_string(),
            format!("(error) {WRONG_TYPE}")
        );
    }

    #[test]
    fn only_errors_are_errors() {
        assert!(Response::wrong_type().is_err());
        assert!(!Response::Ok.is_err());
        assert!(!Response::Integer(0).is_err());
    }
}

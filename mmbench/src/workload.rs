//! The commands being compared and how their arguments are generated.

use std::borrow::Cow;

use clap::ValueEnum;
use payload::Generator;
use protocol::{Cmd, INSERT, SET};

/// Sizes and names shared by every generated command.
#[derive(Debug, Clone)]
pub struct Shape {
    /// Top-level key every `MULTIMAP.INSERT` goes to.
    pub map: String,
    pub key_len: usize,
    pub value_len: usize,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            map: "map".to_owned(),
            key_len: 5,
            value_len: 10,
        }
    }
}

/// A command to benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Workload {
    /// `MULTIMAP.INSERT <map> <key> <value>`
    #[value(name = "multimap.insert")]
    MultimapInsert,
    /// `SET <key> <value>`
    #[value(name = "set")]
    Set,
}

impl Workload {
    /// Name of the command this workload sends.
    pub fn name(self) -> &'static str {
        match self {
            Self::MultimapInsert => INSERT,
            Self::Set => SET,
        }
    }

    /// Builds the next command with a fresh random key and value.
    pub fn build<'s>(self, generator: &mut Generator, shape: &'s Shape) -> Cmd<'s> {
        let key = Cow::Owned(generator.string(shape.key_len));
        let value = Cow::Owned(generator.string(shape.value_len));
        match self {
            Self::MultimapInsert => {
                Cmd::Insert(Cow::Borrowed(shape.map.as_str()), key, vec![value])
            }
            Self::Set => Cmd::Set(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use payload::ALPHABET;

    use super::*;

    fn is_letters(s: &str, len: usize) -> bool {
        s.len() == len && s.bytes().all(|b| ALPHABET.contains(&b))
    }

    #[test]
    fn insert_shape() {
        let shape = Shape::default();
        let mut generator = Generator::from_seed(1);
        match Workload::MultimapInsert.build(&mut generator, &shape) {
            Cmd::Insert(map, key, values) => {
                assert_eq!(map, "map");
                assert!(is_letters(&key, 5));
                assert_eq!(values.len(), 1);
                assert!(is_letters(&values[0], 10));
            }
            other => panic!("Unexpected command {other:?}"),
        }
    }

    #[test]
    fn set_shape() {
        let shape = Shape {
            map: "unused".to_owned(),
            key_len: 3,
            value_len: 0,
        };
        let mut generator = Generator::from_seed(1);
        match Workload::Set.build(&mut generator, &shape) {
            Cmd::Set(key, value) => {
                assert!(is_letters(&key, 3));
                assert_eq!(value, "");
            }
            other => panic!("Unexpected command {other:?}"),
        }
    }

    #[test]
    fn names_match_commands() {
        let shape = Shape::default();
        let mut generator = Generator::from_seed(1);
        for workload in Workload::value_variants() {
            assert_eq!(workload.build(&mut generator, &shape).name(), workload.name());
        }
    }

    #[test]
    fn parses_from_cli_names() {
        assert_eq!(
            Workload::from_str("multimap.insert", false),
            Ok(Workload::MultimapInsert)
        );
        assert_eq!(Workload::from_str("set", false), Ok(Workload::Set));
        assert!(Workload::from_str("get", false).is_err());
    }
}

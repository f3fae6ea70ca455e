//! Persisting a [`MultiMap`].
//!
//! A snapshot is laid out as:
//!
//! ```text
//! key count (u64)
//! for each key:
//!     key length (u32), key bytes
//!     value count (u64)
//!     for each value: value length (u32), value bytes
//! crc32 of everything above (u32)
//! ```
//!
//! All integers are big-endian. [`rewrite`] turns a map into the commands that rebuild it, for
//! replaying into a live server instead of restoring from a file.

use std::borrow::Cow;
use std::io::{Read, Write};

use protocol::Cmd;
use tracing::debug;

use crate::{Error, MultiMap, Result};

const LEN_BYTES: usize = 4;
const COUNT_BYTES: usize = 8;
const CRC_BYTES: usize = 4;

/// Writes `map` to `writer`, returning the number of bytes written.
pub fn save<W: Write>(map: &MultiMap, mut writer: W) -> Result<usize> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&(map.len() as u64).to_be_bytes());
    for (key, values) in map {
        put_str(&mut buf, key);
        buf.extend_from_slice(&(values.len() as u64).to_be_bytes());
        for value in values {
            put_str(&mut buf, value);
        }
    }
    let crc = crc32fast::hash(&buf);
    buf.extend_from_slice(&crc.to_be_bytes());

    writer.write_all(&buf)?;
    writer.flush()?;
    debug!(keys = map.len(), bytes = buf.len(), "Saved snapshot");
    Ok(buf.len())
}

/// Reads a map previously written by [`save`]. The whole reader is consumed; anything after the
/// checksum is an error.
pub fn load<R: Read>(mut reader: R) -> Result<MultiMap> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    if buf.len() < COUNT_BYTES + CRC_BYTES {
        return Err(Error::Truncated);
    }

    let (body, stored) = buf.split_at(buf.len() - CRC_BYTES);
    let stored = u32::from_be_bytes(stored.try_into().expect("split at 4"));
    let computed = crc32fast::hash(body);
    if stored != computed {
        return Err(Error::ChecksumMismatch { stored, computed });
    }

    let mut body = Body(body);
    let key_count = body.count()?;
    let mut map = MultiMap::new();
    for _ in 0..key_count {
        let key = body.str()?;
        let value_count = body.count()?;
        // Counts come from the file, so don't trust them for preallocation.
        let mut values = Vec::new();
        for _ in 0..value_count {
            values.push(body.str()?.to_owned());
        }
        map.insert(key, values);
    }

    if !body.0.is_empty() {
        return Err(Error::TrailingBytes(body.0.len()));
    }
    debug!(keys = map.len(), "Loaded snapshot");
    Ok(map)
}

/// Returns one `MULTIMAP.INSERT` per stored value that rebuilds `map` under the key `name`.
pub fn rewrite<'a>(name: &'a str, map: &'a MultiMap) -> Vec<Cmd<'a>> {
    map.iter()
        .flat_map(|(key, values)| {
            values.iter().map(move |value| {
                Cmd::Insert(
                    Cow::Borrowed(name),
                    Cow::Borrowed(key.as_str()),
                    vec![Cow::Borrowed(value.as_str())],
                )
            })
        })
        .collect()
}

fn put_str(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_be_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Cursor over the checksummed part of a snapshot.
struct Body<'a>(&'a [u8]);

impl<'a> Body<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.0.len() < n {
            return Err(Error::Truncated);
        }
        let (taken, rest) = self.0.split_at(n);
        self.0 = rest;
        Ok(taken)
    }

    fn count(&mut self) -> Result<u64> {
        let bytes = self.take(COUNT_BYTES)?;
        Ok(u64::from_be_bytes(bytes.try_into().expect("took 8")))
    }

    fn str(&mut self) -> Result<&'a str> {
        let len = self.take(LEN_BYTES)?;
        let len = u32::from_be_bytes(len.try_into().expect("took 4"));
        let bytes = self.take(len as usize)?;
        Ok(std::str::from_utf8(bytes)?)
    }
}

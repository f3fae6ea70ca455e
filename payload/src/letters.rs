//! [`Letters`] samples uniformly from the lowercase and uppercase Latin letters.

use rand::distributions::{DistString, Distribution};
use rand::Rng;

/// Every byte a payload may contain.
pub const ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Distribution over [`ALPHABET`]. Works like [`rand::distributions::Alphanumeric`] minus the
/// digits, so it can be used with [`DistString::sample_string`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Letters;

impl Distribution<u8> for Letters {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        ALPHABET[rng.gen_range(0..ALPHABET.len())]
    }
}

impl DistString for Letters {
    fn append_string<R: Rng + ?Sized>(&self, rng: &mut R, string: &mut String, len: usize) {
        string.reserve(len);
        for _ in 0..len {
            string.push(char::from(self.sample(rng)));
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn alphabet_is_unique_letters() {
        let mut sorted = ALPHABET.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 52);
        assert!(ALPHABET.iter().all(u8::is_ascii_alphabetic));
    }

    #[test]
    fn appends_to_existing_string() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = String::from("map:");
        Letters.append_string(&mut rng, &mut s, 6);

        assert_eq!(s.len(), 10);
        assert!(s.starts_with("map:"));
        assert!(s[4..].bytes().all(|b| ALPHABET.contains(&b)));
    }
}

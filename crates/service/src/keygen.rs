//! Primary key generation for new parents and children.

use rand::Rng;

pub const PARENT_KEY_LEN: usize = 6;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Draw a key of `PARENT_KEY_LEN` characters, each picked uniformly from
/// the 62-character alphanumeric alphabet.
pub fn random_key<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..PARENT_KEY_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Redraw until `taken` rejects the candidate. There is no retry cap.
pub fn unique_parent_key<R, F>(rng: &mut R, taken: F) -> String
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    loop {
        let key = random_key(rng);
        if !taken(&key) {
            return key;
        }
    }
}

/// `<parentkey>1`, `<parentkey>2`, ... until `taken` rejects the candidate.
pub fn child_id<F>(parentkey: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut counter: u64 = 1;
    loop {
        let id = format!("{parentkey}{counter}");
        if !taken(&id) {
            return id;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::cell::Cell;

    #[test]
    fn random_key_is_six_alphanumerics() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let key = random_key(&mut rng);
            assert_eq!(key.len(), PARENT_KEY_LEN);
            assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn unique_parent_key_retries_on_collision() {
        let mut rng = StdRng::seed_from_u64(11);
        let rejected = Cell::new(0);
        let key = unique_parent_key(&mut rng, |_| {
            let n = rejected.get();
            rejected.set(n + 1);
            n < 3
        });
        assert_eq!(rejected.get(), 4);
        assert_eq!(key.len(), PARENT_KEY_LEN);
    }

    #[test]
    fn unique_parent_key_avoids_existing() {
        let existing = ["AAAAAA".to_string()];
        let mut rng = StdRng::seed_from_u64(3);
        let key = unique_parent_key(&mut rng, |k| existing.iter().any(|e| e == k));
        assert!(!existing.contains(&key));
    }

    #[test]
    fn child_id_counts_up_from_one() {
        assert_eq!(child_id("Ab3dE9", |_| false), "Ab3dE91");
        let taken = ["Ab3dE91", "Ab3dE92"];
        assert_eq!(child_id("Ab3dE9", |id| taken.contains(&id)), "Ab3dE93");
    }
}

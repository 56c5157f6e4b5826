//! Pure selection helpers shared by the generator.
//!
//! Category resolution is substring containment, case-insensitive, first key in
//! table order wins. Sampling draws without replacement and returns the picks in
//! random order.

use rand::seq::index;
use rand::Rng;

/// Index of the first table key contained in `input` (case-insensitive).
pub fn resolve_index<T>(input: &str, table: &[(&str, T)]) -> Option<usize> {
    let lower = input.to_lowercase();
    table.iter().position(|(key, _)| lower.contains(key))
}

/// Value of the first table key contained in `input`, if any.
pub fn resolve<'t, T>(input: &str, table: &'t [(&str, T)]) -> Option<&'t T> {
    resolve_index(input, table).map(|i| &table[i].1)
}

/// Like [`resolve`], falling back to the entry keyed `default`.
///
/// Panics if `default` is not a key of `table`; the tables are fixed at compile
/// time, so a missing default is a programming error.
pub fn resolve_or<'t, T>(input: &str, table: &'t [(&str, T)], default: &str) -> &'t T {
    resolve(input, table).unwrap_or_else(|| {
        table
            .iter()
            .find(|(key, _)| *key == default)
            .map(|(_, value)| value)
            .unwrap_or_else(|| panic!("content table has no default key {default:?}"))
    })
}

/// True when `input` contains any of `needles` (case-insensitive).
pub fn contains_any(input: &str, needles: &[&str]) -> bool {
    let lower = input.to_lowercase();
    needles.iter().any(|needle| lower.contains(needle))
}

/// Uniform pick of one element. `None` only for an empty pool.
pub fn pick<'p, T, R: Rng + ?Sized>(rng: &mut R, pool: &'p [T]) -> Option<&'p T> {
    if pool.is_empty() {
        return None;
    }
    Some(&pool[rng.gen_range(0..pool.len())])
}

/// Draw `min(amount, pool.len())` distinct elements uniformly at random.
pub fn sample<T: Clone, R: Rng + ?Sized>(rng: &mut R, pool: &[T], amount: usize) -> Vec<T> {
    let amount = amount.min(pool.len());
    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}

use super::seed::identity_hash;

/// Sort items by a score derived from each item's identity and the seed.
///
/// For a fixed seed an item's score is a function of its own identity
/// alone, so inserting a new item leaves every pre-existing item's relative
/// order intact except where the newcomer's score lands. Absent identities
/// must be mapped to the empty string by the extractor. Score ties keep the
/// original relative order (the underlying sort is stable), making the
/// original index the tie-break.
pub fn hashed_stable_sort<T, F>(items: &mut [T], seed: i64, identity: F)
where
    F: Fn(&T) -> String,
{
    items.sort_by_cached_key(|item| {
        identity_hash(&format!("{}{}", identity(item), seed))
    });
}

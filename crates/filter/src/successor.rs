//! Lexicographic key successor
//!
//! Turns a row-key prefix into the exclusive upper bound of the range that
//! holds every key with that prefix.

/// Smallest byte string that sorts after every string prefixed by `prefix`.
///
/// The last byte below `0xFF` is incremented and everything after it is
/// dropped. Inputs made only of `0xFF` bytes (and the empty input) have no
/// finite successor; the empty vector is returned and means "no upper
/// bound".
pub fn key_successor(prefix: &[u8]) -> Vec<u8> {
    match prefix.iter().rposition(|&byte| byte < u8::MAX) {
        Some(index) => {
            let mut successor = prefix[..=index].to_vec();
            successor[index] += 1;
            successor
        }
        None => Vec::new(),
    }
}

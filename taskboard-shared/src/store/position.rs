/// Position arithmetic for drag-and-drop moves
///
/// Both storage backends and the client's optimistic view model share these
/// helpers, so a move computed locally matches what the server persists.
/// Positions are dense and 0-based: after any reorder the positions of a
/// list are exactly `0..n`.

/// Clamps a requested destination index into the valid insertion range
/// `0..=len`. Negative values clamp to 0.
pub fn clamp_index(index: i32, len: usize) -> usize {
    if index < 0 {
        0
    } else {
        (index as usize).min(len)
    }
}

/// Moves the element at `from` to `to`, shifting everything in between.
///
/// `to` is interpreted as the element's index in the resulting order, the
/// way drag-and-drop destinations are reported.
pub fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) {
    let item = items.remove(from);
    let to = to.min(items.len());
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-3, 5), 0);
        assert_eq!(clamp_index(0, 5), 0);
        assert_eq!(clamp_index(4, 5), 4);
        assert_eq!(clamp_index(5, 5), 5);
        assert_eq!(clamp_index(99, 5), 5);
        assert_eq!(clamp_index(0, 0), 0);
    }

    #[test]
    fn test_reorder_forward() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        reorder(&mut v, 0, 2);
        assert_eq!(v, vec!['b', 'c', 'a', 'd']);
    }

    #[test]
    fn test_reorder_backward() {
        let mut v = vec!['a', 'b', 'c', 'd'];
        reorder(&mut v, 3, 0);
        assert_eq!(v, vec!['d', 'a', 'b', 'c']);
    }

    #[test]
    fn test_reorder_to_same_slot() {
        let mut v = vec![1, 2, 3];
        reorder(&mut v, 1, 1);
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_reorder_to_end() {
        let mut v = vec![1, 2, 3];
        reorder(&mut v, 0, 2);
        assert_eq!(v, vec![2, 3, 1]);
    }
}

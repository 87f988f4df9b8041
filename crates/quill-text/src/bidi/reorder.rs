use unicode_bidi::{BidiInfo, Level};

/// Map each logical codepoint index to its visual (paint-order) position.
///
/// The result is a permutation of `0..levels.len()`: `map[logical]` is the
/// visual slot the codepoint occupies after UAX-9 reordering.
pub fn logical_to_visual(levels: &[Level]) -> Vec<usize> {
    let visual_to_logical = BidiInfo::reorder_visual(levels);

    let mut map = vec![0usize; visual_to_logical.len()];
    for (visual, &logical) in visual_to_logical.iter().enumerate() {
        map[logical] = visual;
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidi::{char_levels, BaseDirection};

    #[test]
    fn ltr_text_is_identity() {
        let levels = char_levels("abc", BaseDirection::Auto);
        assert_eq!(logical_to_visual(&levels), vec![0, 1, 2]);
    }

    #[test]
    fn mixed_line_matches_expected_order() {
        // Logical: a b c ␠ א ב ג  -> visual: a b c ␠ ג ב א
        let text = "abc אבג";
        let levels = char_levels(text, BaseDirection::Ltr);
        let map = logical_to_visual(&levels);
        assert_eq!(map[0..4], [0, 1, 2, 3]);
        assert_eq!(map[4..], [6, 5, 4]);
    }

    #[test]
    fn result_is_a_permutation() {
        let text = "אבג 123 שלום";
        let levels = char_levels(text, BaseDirection::Auto);
        let mut map = logical_to_visual(&levels);
        map.sort_unstable();
        assert_eq!(map, (0..text.chars().count()).collect::<Vec<_>>());
    }
}

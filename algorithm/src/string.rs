use std::collections::BTreeSet;

/// Characters trimmed from both ends of an anchor span before it is exploded.
pub const PUNCTUATION: &[char] = &[
    '.', '?', '!', ';', ',', ':', '“', '"', '”', '‘', '\'', '’', '(', ')', '[', ']', '{', '}',
    ' ', '\t', '\n', '\x0c'
];

pub const SPACE: &[char] = &[' ', '\t', '\n', '\x0c'];

/// Turn a list of character spans into the set of character positions they cover.
///
/// Each span is first trimmed of leading and trailing punctuation, then every
/// position inside it that is not whitespace is collected. Offsets are character
/// offsets (not bytes) into `input`; spans running past the end of the input are
/// clamped.
///
/// Example:
/// ```
/// extern crate algorithm;
/// use algorithm::string::explode;
///
/// let input = "(the dog).".chars().collect::<Vec<_>>();
/// let positions = explode(&input, &[(0, 10)]);
/// assert_eq!(positions.into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 5, 6, 7]);
/// ```
pub fn explode(input: &[char], spans: &[(usize, usize)]) -> BTreeSet<usize> {
    let mut positions = BTreeSet::new();
    for &(from, to) in spans {
        let mut start = from.min(input.len());
        let mut end = to.min(input.len());

        while start < end && PUNCTUATION.contains(&input[start]) {
            start += 1;
        }
        while end > start && PUNCTUATION.contains(&input[end - 1]) {
            end -= 1;
        }

        positions.extend((start..end).filter(|&i| !SPACE.contains(&input[i])));
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    pub fn test_explode_trims_punctuation() {
        let input = chars("“Hello,” she said.");
        assert_eq!(explode(&input, &[(0, 8)]).into_iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(explode(&input, &[(9, 18)]).into_iter().collect::<Vec<_>>(), vec![9, 10, 11, 13, 14, 15, 16]);
    }

    #[test]
    pub fn test_explode_merges_spans_and_clamps() {
        let input = chars("a b");
        assert_eq!(explode(&input, &[(0, 1), (0, 3)]).len(), 2);
        assert_eq!(explode(&input, &[(2, 40)]).into_iter().collect::<Vec<_>>(), vec![2]);
        assert!(explode(&input, &[(1, 2)]).is_empty());
        assert!(explode(&input, &[]).is_empty());
    }
}

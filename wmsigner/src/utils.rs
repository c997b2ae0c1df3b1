/// Reverse the byte order of `data`: the first byte becomes the last.
pub(crate) fn reverse_bytes(data: &[u8]) -> Vec<u8> {
    data.iter().rev().copied().collect()
}

/**
    Reverse the order of the 2-byte words in `data`, keeping the two bytes
    of each word in place.

    Odd-length input is word-aligned first by prepending a single zero byte,
    so the output length is always even.
*/
pub(crate) fn reverse_words(data: &[u8]) -> Vec<u8> {
    let mut aligned = Vec::with_capacity(data.len() + 1);
    if !data.len().is_multiple_of(2) {
        aligned.push(0);
    }
    aligned.extend_from_slice(data);

    aligned.chunks_exact(2).rev().flatten().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_bytes_flips_order() {
        assert_eq!(reverse_bytes(&[1, 2, 3, 4, 5]), [5, 4, 3, 2, 1]);
        assert_eq!(reverse_bytes(&[]), Vec::<u8>::new());
        assert_eq!(reverse_bytes(&[7]), [7]);
    }

    #[test]
    fn reverse_bytes_is_self_inverse() {
        let data: Vec<u8> = (0..=255).collect();
        assert_eq!(reverse_bytes(&reverse_bytes(&data)), data);
    }

    #[test]
    fn reverse_words_keeps_bytes_within_word() {
        assert_eq!(reverse_words(&[1, 2, 3, 4, 5, 6]), [5, 6, 3, 4, 1, 2]);
    }

    #[test]
    fn reverse_words_aligns_odd_input() {
        // [0, 1] [2, 3] [4, 5] after the zero byte is prepended
        assert_eq!(reverse_words(&[1, 2, 3, 4, 5]), [4, 5, 2, 3, 0, 1]);
        assert_eq!(reverse_words(&[9]), [0, 9]);
    }

    #[test]
    fn reverse_words_empty() {
        assert!(reverse_words(&[]).is_empty());
    }

    #[test]
    fn reverse_words_is_self_inverse_on_even_input() {
        let data: Vec<u8> = (0..64).collect();
        assert_eq!(reverse_words(&reverse_words(&data)), data);
    }

    #[test]
    fn reverse_words_differs_from_reverse_bytes() {
        let data = [0xaa, 0xbb, 0xcc, 0xdd];
        assert_eq!(reverse_bytes(&data), [0xdd, 0xcc, 0xbb, 0xaa]);
        assert_eq!(reverse_words(&data), [0xcc, 0xdd, 0xaa, 0xbb]);
    }
}

//! Property tests for word-count chunking.

use docrag_rag::chunking::WordChunker;
use proptest::prelude::*;

/// Generate whitespace-separated lowercase words.
fn arb_words() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z]{1,8}", 0..200)
}

/// Generate a valid (chunk_size, overlap) pair with overlap < chunk_size.
fn arb_params() -> impl Strategy<Value = (usize, usize)> {
    (2usize..40).prop_flat_map(|size| (Just(size), 0..size))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        max_global_rejects: 16384,
        ..ProptestConfig::default()
    })]

    /// Texts no longer than one chunk come back as a single chunk equal to
    /// the (whitespace-normalized) input.
    #[test]
    fn short_text_is_a_single_chunk((size, overlap) in arb_params(), words in arb_words()) {
        prop_assume!(!words.is_empty() && words.len() <= size);
        let chunker = WordChunker::new(size, overlap).unwrap();
        let text = words.join(" ");
        let chunks = chunker.split(&text);
        prop_assert_eq!(chunks, vec![text]);
    }

    /// Consecutive chunks share exactly `overlap` trailing/leading words.
    /// The final chunk may be short, but never shorter than the overlap:
    /// otherwise its words would already have been covered by its
    /// predecessor and it would not have been emitted.
    #[test]
    fn consecutive_chunks_share_exact_overlap((size, overlap) in arb_params(), words in arb_words()) {
        let chunker = WordChunker::new(size, overlap).unwrap();
        let chunks = chunker.split(&words.join(" "));

        for window in chunks.windows(2) {
            let left: Vec<&str> = window[0].split_whitespace().collect();
            let right: Vec<&str> = window[1].split_whitespace().collect();
            prop_assert!(right.len() > overlap);
            prop_assert_eq!(&left[left.len() - overlap..], &right[..overlap]);
        }
    }

    /// Dropping each chunk's leading overlap reconstructs the input exactly,
    /// and no chunk exceeds the configured size.
    #[test]
    fn chunks_cover_input_in_order((size, overlap) in arb_params(), words in arb_words()) {
        let chunker = WordChunker::new(size, overlap).unwrap();
        let chunks = chunker.split(&words.join(" "));

        let mut reconstructed: Vec<&str> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let chunk_words: Vec<&str> = chunk.split_whitespace().collect();
            prop_assert!(chunk_words.len() <= size);
            let skip = if i == 0 { 0 } else { overlap };
            reconstructed.extend(&chunk_words[skip..]);
        }
        prop_assert_eq!(reconstructed, words.iter().map(String::as_str).collect::<Vec<_>>());
    }
}

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use stree::{SuffixTree, TerminatorPolicy, TreeConfig};

#[derive(Debug, Arbitrary)]
struct Input {
    shared: bool,
    sequences: Vec<Vec<u8>>,
    query: Vec<u8>,
}

fuzz_target!(|input: Input| {
    // Small alphabet so repeats and splits are common
    let config = TreeConfig {
        terminators: if input.shared {
            TerminatorPolicy::Shared
        } else {
            TerminatorPolicy::Unique
        },
        verify_after_insert: false,
    };
    let mut tree = SuffixTree::with_config(config);
    let sequences: Vec<Vec<u8>> = input
        .sequences
        .iter()
        .take(8)
        .map(|s| s.iter().take(256).map(|b| b % 4).collect())
        .collect();
    for seq in &sequences {
        tree.add_sequence(seq, true).unwrap();
    }
    tree.check_invariants().unwrap();

    let query: Vec<u8> = input.query.iter().take(16).map(|b| b % 4).collect();
    let expected = query.is_empty()
        || sequences
            .iter()
            .any(|s| s.windows(query.len()).any(|w| w == query.as_slice()));
    assert_eq!(tree.contains_substring(&query), expected);
});

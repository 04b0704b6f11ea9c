use fastrand::Rng;
use tracing::debug;

use crate::{math, prelude::*};

/// Generate a random `String` over the universe of the `alphabet`.
/// The length of the `String` is drawn uniformly from the range `min_len..=max_len`.
pub fn generate_random_word(
    rng: &mut Rng,
    alphabet: &CharAlphabet,
    min_len: usize,
    max_len: usize,
) -> String {
    let charset: Vec<char> = alphabet.universe().collect();

    let length = rng.usize(min_len..=max_len);
    (0..length)
        .map(|_| charset[rng.usize(..charset.len())])
        .collect()
}

/// Generate a set of `number` distinct random `String`s over the universe of the `alphabet`.
/// The length for each sampled word is drawn uniformly from the range `min_len..=max_len`.
///
/// # Panics
/// If there are fewer than `number` words with a length in the given range.
pub fn generate_random_words(
    rng: &mut Rng,
    alphabet: &CharAlphabet,
    min_len: usize,
    max_len: usize,
    number: usize,
) -> math::Set<String> {
    let available = (min_len..=max_len)
        .map(|len| alphabet.size().saturating_pow(len as u32))
        .fold(0usize, usize::saturating_add);
    assert!(
        number <= available,
        "cannot draw {number} distinct words from {available} candidates"
    );

    let mut word_set = math::Set::default();
    while word_set.len() < number {
        word_set.insert(generate_random_word(rng, alphabet, min_len, max_len));
    }
    word_set
}

/// Generate a random [`DFA`] with `size` states over an alphabet with `symbols` symbols by
/// drawing a target for every state and symbol as well as a color for every state. The
/// initial state is `0`, depending on the drawn edges some states may be unreachable.
pub fn generate_random_dfa(rng: &mut Rng, symbols: usize, size: usize) -> DFA {
    assert!(size > 0, "a DFA needs at least one state");
    let alphabet = CharAlphabet::of_size(symbols);
    let mut dfa = DFA::new(alphabet.clone());
    for _ in 0..size {
        dfa.add_state(rng.bool());
    }
    for q in 0..size as u32 {
        for symbol in alphabet.universe() {
            dfa.add_edge(q, symbol, rng.u32(..size as u32));
        }
    }
    debug!("generated random DFA with {size} states over {symbols} symbols");
    dfa
}

/// Draws `number` words with a length in `min_len..=max_len` and inserts those that `dfa`
/// accepts into a fresh [`PrefixClosedDagBuilder`]. Accepted words can never conflict, so
/// every insertion succeeds.
pub fn generate_accepted_sample(
    rng: &mut Rng,
    dfa: &DFA,
    min_len: usize,
    max_len: usize,
    number: usize,
) -> PrefixClosedDagBuilder {
    let mut builder = PrefixClosedDagBuilder::new(dfa.alphabet().clone());
    for _ in 0..number {
        let word = generate_random_word(rng, dfa.alphabet(), min_len, max_len);
        if dfa.accepts(&word) {
            builder
                .insert_accepted(&word)
                .expect("accepted words never conflict");
        }
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::{generate_accepted_sample, generate_random_dfa, generate_random_words};
    use crate::prelude::*;

    #[test]
    fn random_words() {
        let mut rng = fastrand::Rng::with_seed(7);
        let alphabet = CharAlphabet::of_size(2);
        let words = generate_random_words(&mut rng, &alphabet, 1, 10, 20);
        assert_eq!(words.len(), 20);
        assert!(words.iter().all(|w| (1..=10).contains(&w.len())));

        // there are exactly 2 + 4 words of length one or two
        let all = generate_random_words(&mut rng, &alphabet, 1, 2, 6);
        assert_eq!(all.len(), 6);
    }

    #[test]
    #[should_panic]
    fn too_many_random_words() {
        let mut rng = fastrand::Rng::with_seed(7);
        generate_random_words(&mut rng, &CharAlphabet::of_size(2), 0, 1, 4);
    }

    #[test_log::test]
    fn accepted_samples_agree_with_dfa() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..10 {
            let dfa = generate_random_dfa(&mut rng, 3, 6);
            assert_eq!(dfa.size(), 6);

            let builder = generate_accepted_sample(&mut rng, &dfa, 0, 8, 100);
            crate::incremental::builder_tests::assert_consistent(&builder);
            assert_eq!(builder.find_separating_word(&dfa, false), None);
            assert_eq!(builder.find_separating_word(&dfa, true), None);
        }
    }
}

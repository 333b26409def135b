//! Fixed-length normalization of token sequences.

/// Pad or truncate a token sequence to exactly `max_len` positions.
///
/// Shorter sequences are pre-padded with zeros; longer sequences keep their
/// trailing `max_len` tokens. This matches the pre-padding convention of the
/// Keras sequence-preparation utility.
pub fn pad_sequence(tokens: &[u32], max_len: usize) -> Vec<u32> {
    if tokens.len() >= max_len {
        return tokens[tokens.len() - max_len..].to_vec();
    }
    let mut padded = vec![0u32; max_len - tokens.len()];
    padded.extend_from_slice(tokens);
    padded
}

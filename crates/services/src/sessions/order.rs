use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::QuestionIndex;

/// Uniformly random permutation of `0..len`.
pub fn shuffled_order<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<QuestionIndex> {
    let mut order: Vec<QuestionIndex> = (0..len).map(QuestionIndex::new).collect();
    order.as_mut_slice().shuffle(rng);
    order
}

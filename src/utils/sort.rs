use std::cmp::Ordering;

/// Order indices of `scores` by descending score, ties by ascending index.
/// NaN ranks below every number.
///
/// The result never depends on input iteration order or on how the scores
/// were computed, only on their values.
pub fn rank_desc_stable(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();

    // 小さいときは挿入ソートの方が速い
    if order.len() <= 32 {
        insertion_sort_by(&mut order, |&a, &b| cmp_rank(scores, a, b));
    } else {
        order.sort_unstable_by(|&a, &b| cmp_rank(scores, a, b));
    }
    order
}

/// Compare two indices: higher score first, then lower index first.
/// This is a total order over indices, so an unstable sort is fine.
#[inline(always)]
fn cmp_rank(scores: &[f64], a: usize, b: usize) -> Ordering {
    let sa = rank_key(scores[a]);
    let sb = rank_key(scores[b]);
    sb.total_cmp(&sa).then_with(|| a.cmp(&b))
}

#[inline(always)]
fn rank_key(s: f64) -> f64 {
    if s.is_nan() { f64::NEG_INFINITY } else { s }
}

/// Tiny insertion sort for small n.
#[inline(always)]
fn insertion_sort_by<T, F>(v: &mut [T], mut cmp: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..v.len() {
        let cur = v[i];
        let mut j = i;
        while j > 0 && cmp(&v[j - 1], &cur) == Ordering::Greater {
            v[j] = v[j - 1];
            j -= 1;
        }
        v[j] = cur;
    }
}

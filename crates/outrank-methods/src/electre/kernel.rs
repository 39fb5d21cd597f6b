//! Kernel extraction.

use super::dominance::DominanceGraph;

/// Marks every alternative that nothing dominates.
///
/// One pass over all ordered pairs: whenever `a -> b`, `b` is dropped. The
/// dominator does not have to survive itself.
pub fn extract_kernel(dominance: &DominanceGraph) -> Vec<bool> {
    let n = dominance.size();
    let mut kernel = vec![true; n];
    for (a, b) in dominance.matrix().true_pairs() {
        debug_assert_ne!(a, b);
        kernel[b] = false;
    }
    kernel
}

/// Indices of the surviving alternatives.
pub fn kernel_members(kernel: &[bool]) -> Vec<usize> {
    kernel
        .iter()
        .enumerate()
        .filter_map(|(alt, &survives)| survives.then_some(alt))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use outrank_core::PairMatrix;

    #[test]
    fn test_dominated_alternatives_are_dropped() {
        let g = DominanceGraph::from_matrix(
            PairMatrix::from_rows(vec![
                vec![false, true, false],
                vec![false, false, true],
                vec![false, false, false],
            ])
            .unwrap(),
        );
        // 1 is dropped but still knocks out 2
        assert_eq!(extract_kernel(&g), vec![true, false, false]);
        assert_eq!(kernel_members(&extract_kernel(&g)), vec![0]);
    }

    #[test]
    fn test_empty_graph_keeps_everyone() {
        let g = DominanceGraph::from_matrix(PairMatrix::filled(4, false));
        assert_eq!(extract_kernel(&g), vec![true; 4]);
    }
}

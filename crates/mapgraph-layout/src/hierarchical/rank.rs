//! Longest-path ranking.

/// Assigns each node the length of the longest path reaching it, so every edge points to a
/// strictly higher rank and sources sit on rank 0. `edges` must be acyclic.
pub(crate) fn longest_path(node_count: usize, edges: &[(usize, usize)]) -> Vec<usize> {
    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut in_degree = vec![0usize; node_count];
    for &(v, w) in edges {
        out_edges[v].push(w);
        in_degree[w] += 1;
    }

    let mut rank = vec![0usize; node_count];
    let mut queue: std::collections::VecDeque<usize> =
        (0..node_count).filter(|&v| in_degree[v] == 0).collect();
    while let Some(v) = queue.pop_front() {
        for &w in &out_edges[v] {
            rank[w] = rank[w].max(rank[v] + 1);
            in_degree[w] -= 1;
            if in_degree[w] == 0 {
                queue.push_back(w);
            }
        }
    }
    rank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_gets_increasing_ranks() {
        assert_eq!(longest_path(3, &[(0, 1), (1, 2)]), vec![0, 1, 2]);
    }

    #[test]
    fn shortcut_edges_do_not_pull_nodes_up() {
        assert_eq!(longest_path(3, &[(0, 2), (0, 1), (1, 2)]), vec![0, 1, 2]);
    }

    #[test]
    fn isolated_nodes_stay_on_rank_zero() {
        assert_eq!(longest_path(3, &[(1, 2)]), vec![0, 0, 1]);
    }
}

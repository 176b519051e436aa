//! Break cycles by reversing DFS back edges.

/// Returns a cycle-free copy of `edges`. Self loops are dropped, back edges found by a DFS in
/// node index order are reversed, and duplicate edges are collapsed.
pub(crate) fn break_cycles(node_count: usize, edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        OnStack,
        Done,
    }

    let mut out_edges: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(v, w) in edges {
        if v != w && v < node_count && w < node_count {
            out_edges[v].push(w);
        }
    }

    let mut marks = vec![Mark::Unvisited; node_count];
    let mut result: Vec<(usize, usize)> = Vec::with_capacity(edges.len());
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..node_count {
        if marks[root] != Mark::Unvisited {
            continue;
        }
        marks[root] = Mark::OnStack;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let v = top.0;
            let Some(&w) = out_edges[v].get(top.1) else {
                marks[v] = Mark::Done;
                stack.pop();
                continue;
            };
            top.1 += 1;
            match marks[w] {
                Mark::OnStack => result.push((w, v)),
                Mark::Done => result.push((v, w)),
                Mark::Unvisited => {
                    result.push((v, w));
                    marks[w] = Mark::OnStack;
                    stack.push((w, 0));
                }
            }
        }
    }

    result.sort_unstable();
    result.dedup();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acyclic_input_is_unchanged() {
        let edges = vec![(0, 1), (0, 2), (1, 3), (2, 3)];
        assert_eq!(break_cycles(4, &edges), edges);
    }

    #[test]
    fn reverses_the_closing_edge_of_a_cycle() {
        let edges = vec![(0, 1), (1, 2), (2, 0)];
        assert_eq!(break_cycles(3, &edges), vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn drops_self_loops_and_duplicates() {
        let edges = vec![(0, 0), (0, 1), (0, 1), (1, 0)];
        assert_eq!(break_cycles(2, &edges), vec![(0, 1)]);
    }
}

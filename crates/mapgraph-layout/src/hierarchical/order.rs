//! Crossing reduction.
//!
//! Edges spanning more than one rank are split by virtual nodes so every edge joins adjacent
//! ranks. Ranks are then reordered by alternating barycenter sweeps and the ordering with the
//! fewest crossings wins.

/// Ranked nodes plus the virtual nodes of long edges. Ids `0..real` are input nodes; larger ids
/// are virtual.
#[derive(Debug, Clone)]
pub(crate) struct Layering {
    pub(crate) layers: Vec<Vec<usize>>,
    up: Vec<Vec<usize>>,
    down: Vec<Vec<usize>>,
    pub(crate) real: usize,
}

impl Layering {
    pub(crate) fn build(ranks: &[usize], edges: &[(usize, usize)]) -> Self {
        let real = ranks.len();
        let rank_count = ranks.iter().copied().max().map_or(0, |r| r + 1);
        let mut rank_of: Vec<usize> = ranks.to_vec();
        let mut up: Vec<Vec<usize>> = vec![Vec::new(); real];
        let mut down: Vec<Vec<usize>> = vec![Vec::new(); real];

        for &(v, w) in edges {
            let mut prev = v;
            for r in rank_of[v] + 1..rank_of[w] {
                let dummy = rank_of.len();
                rank_of.push(r);
                up.push(Vec::new());
                down.push(Vec::new());
                down[prev].push(dummy);
                up[dummy].push(prev);
                prev = dummy;
            }
            down[prev].push(w);
            up[w].push(prev);
        }

        let mut layers: Vec<Vec<usize>> = vec![Vec::new(); rank_count];
        for (v, &r) in rank_of.iter().enumerate() {
            layers[r].push(v);
        }

        Self {
            layers,
            up,
            down,
            real,
        }
    }

    /// Runs `sweeps` alternating down/up barycenter passes and keeps the best ordering seen.
    /// Returns the crossing count of the kept ordering.
    pub(crate) fn reduce_crossings(&mut self, sweeps: usize) -> usize {
        let mut best = self.layers.clone();
        let mut best_crossings = self.crossings();

        for sweep in 0..sweeps {
            if best_crossings == 0 {
                break;
            }
            if sweep % 2 == 0 {
                for r in 1..self.layers.len() {
                    self.sort_layer(r, true);
                }
            } else {
                for r in (0..self.layers.len().saturating_sub(1)).rev() {
                    self.sort_layer(r, false);
                }
            }
            let crossings = self.crossings();
            if crossings < best_crossings {
                best_crossings = crossings;
                best = self.layers.clone();
            }
        }

        self.layers = best;
        best_crossings
    }

    /// Ordered input nodes per rank, virtual nodes removed.
    pub(crate) fn real_layers(&self) -> Vec<Vec<usize>> {
        self.layers
            .iter()
            .map(|layer| layer.iter().copied().filter(|&v| v < self.real).collect())
            .collect()
    }

    fn positions(&self) -> Vec<usize> {
        let mut pos = vec![0usize; self.up.len()];
        for layer in &self.layers {
            for (i, &v) in layer.iter().enumerate() {
                pos[v] = i;
            }
        }
        pos
    }

    /// Reorders `rank` by the mean position of its neighbors on the adjacent, already fixed rank.
    /// Nodes without such neighbors keep their current slot as key.
    fn sort_layer(&mut self, rank: usize, from_above: bool) {
        let pos = self.positions();
        let neighbors = if from_above { &self.up } else { &self.down };

        let mut keyed: Vec<(f64, usize)> = self.layers[rank]
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let adj = &neighbors[v];
                let key = if adj.is_empty() {
                    i as f64
                } else {
                    adj.iter().map(|&u| pos[u] as f64).sum::<f64>() / adj.len() as f64
                };
                (key, v)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.layers[rank] = keyed.into_iter().map(|(_, v)| v).collect();
    }

    pub(crate) fn crossings(&self) -> usize {
        let pos = self.positions();
        self.layers
            .windows(2)
            .map(|pair| two_layer_crossings(&pair[0], pair[1].len(), &self.down, &pos))
            .sum()
    }
}

/// Counts crossings between two adjacent ranks with an accumulator tree.
fn two_layer_crossings(
    north: &[usize],
    south_len: usize,
    down: &[Vec<usize>],
    pos: &[usize],
) -> usize {
    if south_len == 0 {
        return 0;
    }

    let mut first_index = 1usize;
    while first_index < south_len {
        first_index <<= 1;
    }
    let mut tree = vec![0usize; 2 * first_index - 1];
    first_index -= 1;

    let mut count = 0usize;
    for &v in north {
        let mut ends: Vec<usize> = down[v].iter().map(|&w| pos[w]).collect();
        ends.sort_unstable();
        for end in ends {
            let mut index = end + first_index;
            tree[index] += 1;
            let mut weight_sum = 0usize;
            while index > 0 {
                if index % 2 == 1 {
                    weight_sum += tree[index + 1];
                }
                index = (index - 1) >> 1;
                tree[index] += 1;
            }
            count += weight_sum;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_edges_get_virtual_nodes() {
        let layering = Layering::build(&[0, 1, 2], &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(layering.layers, vec![vec![0], vec![1, 3], vec![2]]);
        assert_eq!(layering.real_layers(), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn counts_a_single_crossing() {
        // 0 -> 3 and 1 -> 2 cross when both ranks keep index order.
        let layering = Layering::build(&[0, 0, 1, 1], &[(0, 3), (1, 2)]);
        assert_eq!(layering.crossings(), 1);
    }

    #[test]
    fn sweeps_remove_avoidable_crossings() {
        let mut layering = Layering::build(&[0, 0, 1, 1], &[(0, 3), (1, 2)]);
        assert_eq!(layering.reduce_crossings(4), 0);
        assert_eq!(layering.layers[1], vec![3, 2]);
    }
}

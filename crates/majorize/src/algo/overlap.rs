//! Post-pass that pushes overlapping node rectangles apart along the axis of least overlap.

use nalgebra as na;

const MAX_PASSES: usize = 50;

pub fn separate(pos: &mut [na::Vector2<f64>], sizes: &[(f64, f64)], fixed: &[bool], spacing: f64) {
    let n = pos.len();
    for _ in 0..MAX_PASSES {
        let mut moved = false;
        for i in 0..n {
            for j in (i + 1)..n {
                if fixed[i] && fixed[j] {
                    continue;
                }
                let dx = pos[j].x - pos[i].x;
                let dy = pos[j].y - pos[i].y;
                let overlap_x = (sizes[i].0 + sizes[j].0) / 2.0 + spacing - dx.abs();
                let overlap_y = (sizes[i].1 + sizes[j].1) / 2.0 + spacing - dy.abs();
                if overlap_x <= 0.0 || overlap_y <= 0.0 {
                    continue;
                }

                let push = if overlap_x < overlap_y {
                    na::Vector2::new(overlap_x * sign_or_positive(dx, i, j), 0.0)
                } else {
                    na::Vector2::new(0.0, overlap_y * sign_or_positive(dy, i, j))
                };
                match (fixed[i], fixed[j]) {
                    (true, false) => pos[j] += push,
                    (false, true) => pos[i] -= push,
                    _ => {
                        pos[i] -= push / 2.0;
                        pos[j] += push / 2.0;
                    }
                }
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
}

// Exactly aligned pairs still need a direction; the lower index goes first.
fn sign_or_positive(delta: f64, i: usize, j: usize) -> f64 {
    if delta > 0.0 {
        1.0
    } else if delta < 0.0 {
        -1.0
    } else if i < j {
        1.0
    } else {
        -1.0
    }
}

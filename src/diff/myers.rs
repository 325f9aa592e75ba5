//! Minimal character-level edit script (Myers, "An O(ND) Difference
//! Algorithm and Its Variations", 1986), linear-space variant.
//!
//! The common prefix and suffix are peeled off, then the "middle snake"
//! where the forward and reverse searches meet splits the problem in two.
//! Only two diagonal vectors are held at any time, so memory stays
//! proportional to the input length however dissimilar the values are.

use super::{DiffOperation, DiffSegment};

pub fn edit_script(left: &str, right: &str) -> Vec<DiffSegment> {
    let a: Vec<char> = left.chars().collect();
    let b: Vec<char> = right.chars().collect();

    let mut ops: Vec<(DiffOperation, char)> = Vec::with_capacity(a.len() + b.len());
    diff_into(&a, &b, &mut ops);
    coalesce(ops)
}

fn diff_into(a: &[char], b: &[char], ops: &mut Vec<(DiffOperation, char)>) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    ops.extend(a[..prefix].iter().map(|&c| (DiffOperation::Unchanged, c)));

    let mid_a = &a[prefix..a.len() - suffix];
    let mid_b = &b[prefix..b.len() - suffix];
    if mid_a.is_empty() {
        ops.extend(mid_b.iter().map(|&c| (DiffOperation::Added, c)));
    } else if mid_b.is_empty() {
        ops.extend(mid_a.iter().map(|&c| (DiffOperation::Removed, c)));
    } else {
        match middle_snake(mid_a, mid_b) {
            Some((x, y)) => {
                diff_into(&mid_a[..x], &mid_b[..y], ops);
                diff_into(&mid_a[x..], &mid_b[y..], ops);
            }
            None => {
                ops.extend(mid_a.iter().map(|&c| (DiffOperation::Removed, c)));
                ops.extend(mid_b.iter().map(|&c| (DiffOperation::Added, c)));
            }
        }
    }

    ops.extend(a[a.len() - suffix..].iter().map(|&c| (DiffOperation::Unchanged, c)));
}

/// Point `(x, y)` where the forward path from the top-left corner and the
/// reverse path from the bottom-right corner overlap. `None` when the two
/// slices share nothing, or when the split would not shrink the problem.
fn middle_snake(a: &[char], b: &[char]) -> Option<(usize, usize)> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let offset = max_d;
    let width = (2 * max_d) as usize;

    let mut forward = vec![-1isize; width];
    let mut reverse = vec![-1isize; width];
    forward[(offset + 1) as usize] = 0;
    reverse[(offset + 1) as usize] = 0;

    let delta = n - m;
    // Odd delta: the paths can only meet while extending the forward one.
    let check_forward = delta % 2 != 0;
    let (mut k1_start, mut k1_end) = (0isize, 0isize);
    let (mut k2_start, mut k2_end) = (0isize, 0isize);

    let at = |k: isize| (offset + k) as usize;
    let in_range = |i: isize| i >= 0 && i < width as isize;

    for d in 0..max_d {
        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let mut x1 = if k1 == -d || (k1 != d && forward[at(k1 - 1)] < forward[at(k1 + 1)]) {
                forward[at(k1 + 1)]
            } else {
                forward[at(k1 - 1)] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n && y1 < m && a[x1 as usize] == b[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            forward[at(k1)] = x1;

            if x1 > n {
                k1_end += 2;
            } else if y1 > m {
                k1_start += 2;
            } else if check_forward {
                let k2_index = offset + delta - k1;
                if in_range(k2_index) && reverse[k2_index as usize] != -1 {
                    let x2 = n - reverse[k2_index as usize];
                    if x1 >= x2 {
                        return split(x1, y1, n, m);
                    }
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let mut x2 = if k2 == -d || (k2 != d && reverse[at(k2 - 1)] < reverse[at(k2 + 1)]) {
                reverse[at(k2 + 1)]
            } else {
                reverse[at(k2 - 1)] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n && y2 < m && a[(n - x2 - 1) as usize] == b[(m - y2 - 1) as usize] {
                x2 += 1;
                y2 += 1;
            }
            reverse[at(k2)] = x2;

            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !check_forward {
                let k1_index = offset + delta - k2;
                if in_range(k1_index) && forward[k1_index as usize] != -1 {
                    let x1 = forward[k1_index as usize];
                    let y1 = offset + x1 - k1_index;
                    if x1 >= n - x2 {
                        return split(x1, y1, n, m);
                    }
                }
            }
            k2 += 2;
        }
    }
    None
}

fn split(x: isize, y: isize, n: isize, m: isize) -> Option<(usize, usize)> {
    let whole = (x <= 0 && y <= 0) || (x >= n && y >= m);
    if whole || x < 0 || y < 0 || x > n || y > m {
        return None;
    }
    Some((x as usize, y as usize))
}

fn coalesce(ops: Vec<(DiffOperation, char)>) -> Vec<DiffSegment> {
    let mut out: Vec<DiffSegment> = Vec::new();
    for (op, c) in ops {
        match out.last_mut() {
            Some(last) if last.operation == op => last.text.push(c),
            _ => out.push(DiffSegment::new(op, c.to_string())),
        }
    }
    out
}

//! Bayes-ball reachability for the backdoor criterion.
//!
//! Works on the graph with `t`'s outgoing edges removed, so every trail
//! leaving `t` starts into it. Linear in nodes plus edges; no path is ever
//! enumerated.

use super::view::GraphView;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Arrived from a child.
    Up,
    /// Arrived from a parent.
    Down,
}

/// Whether `z` d-separates `t` from `y` once `t`'s outgoing edges are cut.
pub(crate) fn blocks_backdoor(view: &GraphView, t: usize, y: usize, z: &[bool]) -> bool {
    let n = view.len();
    let ancestors_of_z = ancestors_of_set(view, t, z);

    let mut seen_up = vec![false; n];
    let mut seen_down = vec![false; n];
    let mut stack = vec![(t, Direction::Up)];
    while let Some((node, direction)) = stack.pop() {
        let seen = match direction {
            Direction::Up => &mut seen_up[node],
            Direction::Down => &mut seen_down[node],
        };
        if *seen {
            continue;
        }
        *seen = true;
        if node == y {
            return false;
        }

        let children: &[usize] = if node == t { &[] } else { &view.children[node] };
        match direction {
            Direction::Up if !z[node] => {
                stack.extend(view.parents[node].iter().map(|&p| (p, Direction::Up)));
                stack.extend(children.iter().map(|&c| (c, Direction::Down)));
            }
            Direction::Up => {}
            Direction::Down => {
                if !z[node] {
                    stack.extend(children.iter().map(|&c| (c, Direction::Down)));
                }
                // A collider passes the ball only when it or a descendant is conditioned on.
                if ancestors_of_z[node] {
                    stack.extend(view.parents[node].iter().map(|&p| (p, Direction::Up)));
                }
            }
        }
    }
    true
}

/// Members of `z` and their ancestors, ignoring edges out of `t`.
fn ancestors_of_set(view: &GraphView, t: usize, z: &[bool]) -> Vec<bool> {
    let mut marked = vec![false; view.len()];
    let mut stack: Vec<usize> = (0..view.len()).filter(|&i| z[i]).collect();
    while let Some(node) = stack.pop() {
        if marked[node] {
            continue;
        }
        marked[node] = true;
        stack.extend(view.parents[node].iter().copied().filter(|&p| p != t));
    }
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::CausalGraph;

    fn view_of(edges: &[(&str, &str)]) -> GraphView {
        let mut g = CausalGraph::new();
        for (s, t) in edges {
            g.add_edge(s, t).unwrap();
        }
        GraphView::new(&g)
    }

    fn mask(view: &GraphView, names: &[&str]) -> Vec<bool> {
        let mut z = vec![false; view.len()];
        for name in names {
            z[view.index(name).unwrap()] = true;
        }
        z
    }

    fn check(view: &GraphView, z: &[&str]) -> bool {
        let t = view.index("t").unwrap();
        let y = view.index("y").unwrap();
        blocks_backdoor(view, t, y, &mask(view, z))
    }

    #[test]
    fn fork_is_blocked_by_conditioning() {
        let view = view_of(&[("c", "t"), ("c", "y"), ("t", "y")]);
        assert!(!check(&view, &[]));
        assert!(check(&view, &["c"]));
    }

    #[test]
    fn directed_path_out_of_treatment_is_ignored() {
        let view = view_of(&[("t", "m"), ("m", "y")]);
        assert!(check(&view, &[]));
    }

    #[test]
    fn collider_descendant_opens_the_trail() {
        let view = view_of(&[("a", "t"), ("a", "m"), ("b", "m"), ("b", "y"), ("m", "d")]);
        assert!(check(&view, &[]));
        assert!(!check(&view, &["d"]));
        assert!(check(&view, &["d", "b"]));
    }
}

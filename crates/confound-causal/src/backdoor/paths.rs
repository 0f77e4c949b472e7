//! Bounded enumeration of backdoor paths and the blocking rule.

use confound_core::errors::AdjustmentError;

use super::view::GraphView;

/// A backdoor path as an ordered node sequence from treatment to outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackdoorPath {
    nodes: Vec<String>,
    arrows: Vec<bool>,
}

impl BackdoorPath {
    pub(crate) fn from_indices(view: &GraphView, path: &[usize]) -> Self {
        // arrows[i]: the edge between nodes i and i+1 points forward along the path.
        let arrows = path.windows(2).map(|w| view.has_edge(w[0], w[1])).collect();
        Self {
            nodes: view.names_of(path),
            arrows,
        }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Number of edges on the path.
    pub fn len(&self) -> usize {
        self.arrows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty()
    }

    /// Interior nodes where both path edges point in.
    pub fn colliders(&self) -> Vec<&str> {
        (1..self.nodes.len().saturating_sub(1))
            .filter(|&i| self.arrows[i - 1] && !self.arrows[i])
            .map(|i| self.nodes[i].as_str())
            .collect()
    }

    /// Arrow rendering, e.g. `t <- c -> y`.
    pub fn render(&self) -> String {
        let mut out = self.nodes.first().cloned().unwrap_or_default();
        for (node, forward) in self.nodes.iter().skip(1).zip(&self.arrows) {
            out.push_str(if *forward { " -> " } else { " <- " });
            out.push_str(node);
        }
        out
    }
}

/// All simple skeleton paths `t ... y` whose first edge points into `t`,
/// with at most `max_len` edges. More than `max_paths` paths is an error.
pub(crate) fn enumerate(
    view: &GraphView,
    t: usize,
    y: usize,
    max_len: usize,
    max_paths: usize,
) -> Result<Vec<Vec<usize>>, AdjustmentError> {
    let mut out = Vec::new();
    walk(view, t, y, max_len, max_paths, &mut out)?;
    Ok(out)
}

/// Like `enumerate`, but keeps the first `max_paths` paths instead of
/// failing. The flag is `false` when the cap cut enumeration short.
pub(crate) fn enumerate_bounded(
    view: &GraphView,
    t: usize,
    y: usize,
    max_len: usize,
    max_paths: usize,
) -> (Vec<Vec<usize>>, bool) {
    let mut out = Vec::new();
    let complete = walk(view, t, y, max_len, max_paths, &mut out).is_ok();
    (out, complete)
}

fn walk(
    view: &GraphView,
    t: usize,
    y: usize,
    max_len: usize,
    max_paths: usize,
    out: &mut Vec<Vec<usize>>,
) -> Result<(), AdjustmentError> {
    if max_len == 0 {
        return Ok(());
    }
    let mut on_path = vec![false; view.len()];
    on_path[t] = true;
    let mut path = vec![t];

    for &parent in &view.parents[t] {
        if parent == y {
            push_path(out, &path, y, max_paths)?;
            continue;
        }
        if max_len < 2 {
            continue;
        }
        path.push(parent);
        on_path[parent] = true;
        extend(view, y, max_len, max_paths, &mut path, &mut on_path, out)?;
        on_path[parent] = false;
        path.pop();
    }
    Ok(())
}

fn extend(
    view: &GraphView,
    y: usize,
    max_len: usize,
    max_paths: usize,
    path: &mut Vec<usize>,
    on_path: &mut [bool],
    out: &mut Vec<Vec<usize>>,
) -> Result<(), AdjustmentError> {
    let Some(&current) = path.last() else {
        return Ok(());
    };
    // Edges on the path once one more node is appended.
    let edges_after = path.len();
    if edges_after > max_len {
        return Ok(());
    }
    for &next in &view.adjacent[current] {
        if on_path[next] {
            continue;
        }
        if next == y {
            push_path(out, path, y, max_paths)?;
            continue;
        }
        // An intermediate node still needs at least one more edge to reach y.
        if edges_after >= max_len {
            continue;
        }
        path.push(next);
        on_path[next] = true;
        extend(view, y, max_len, max_paths, path, on_path, out)?;
        on_path[next] = false;
        path.pop();
    }
    Ok(())
}

fn push_path(
    out: &mut Vec<Vec<usize>>,
    prefix: &[usize],
    y: usize,
    max_paths: usize,
) -> Result<(), AdjustmentError> {
    if out.len() >= max_paths {
        return Err(AdjustmentError::PathLimitExceeded { limit: max_paths });
    }
    let mut full = prefix.to_vec();
    full.push(y);
    out.push(full);
    Ok(())
}

/// A path is blocked by `z` if some interior non-collider is in `z`, or
/// some interior collider is outside `z` with no descendant in `z`.
pub(crate) fn is_blocked(view: &GraphView, path: &[usize], z: &[bool]) -> bool {
    path.windows(3).any(|w| {
        let (a, node, b) = (w[0], w[1], w[2]);
        if view.is_collider(a, node, b) {
            !view.self_or_descendant_in(node, z)
        } else {
            z[node]
        }
    })
}

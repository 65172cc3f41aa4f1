use std::collections::VecDeque;

use tracing::debug;

use crate::consts::FLOW_EPSILON;
use crate::error::{Result, SeamError};

use super::{CutSolver, Direction, EdgeCost, GridCell, Label};

const UNREACHED: usize = usize::MAX;

/// Grid min-cut solver using Dinic's blocking-flow max-flow.
///
/// Every pair of 4-neighbors `u`, `v` becomes two arcs: `u -> v` weighted
/// by `cost(u, dir)` and `v -> u` weighted by `cost(v, opposite(dir))`.
/// After the solve, cells still reachable from the source through
/// unsaturated arcs are labelled [`Label::Source`].
pub struct GridCut {
    height: usize,
    width: usize,
    source: Option<GridCell>,
    sink: Option<GridCell>,
    labels: Option<Vec<Label>>,
}

impl GridCut {
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(SeamError::Solver(format!(
                "cannot build a {height}x{width} grid graph"
            )));
        }
        Ok(Self {
            height,
            width,
            source: None,
            sink: None,
            labels: None,
        })
    }

    fn node(&self, cell: GridCell) -> usize {
        cell.row * self.width + cell.col
    }

    fn contains(&self, cell: GridCell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    fn terminals(&self) -> Result<(usize, usize)> {
        let source = self
            .source
            .ok_or_else(|| SeamError::Solver("source terminal not set".into()))?;
        let sink = self
            .sink
            .ok_or_else(|| SeamError::Solver("sink terminal not set".into()))?;
        for cell in [source, sink] {
            if !self.contains(cell) {
                return Err(SeamError::Solver(format!(
                    "terminal ({}, {}) outside {}x{} grid",
                    cell.row, cell.col, self.height, self.width
                )));
            }
        }
        if source == sink {
            return Err(SeamError::Solver(format!(
                "source and sink are the same cell ({}, {})",
                source.row, source.col
            )));
        }
        Ok((self.node(source), self.node(sink)))
    }
}

impl CutSolver for GridCut {
    fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn set_source(&mut self, cell: GridCell) {
        self.source = Some(cell);
        self.labels = None;
    }

    fn set_sink(&mut self, cell: GridCell) {
        self.sink = Some(cell);
        self.labels = None;
    }

    fn solve(&mut self, cost: &dyn EdgeCost) -> Result<f64> {
        let (s, t) = self.terminals()?;
        let mut network = FlowNetwork::build(self.height, self.width, cost)?;
        let flow = network.max_flow(s, t);
        debug!(
            height = self.height,
            width = self.width,
            arcs = network.head.len(),
            flow,
            "Grid max-flow solved"
        );

        let reachable = network.reachable_from(s);
        self.labels = Some(
            reachable
                .into_iter()
                .map(|r| if r { Label::Source } else { Label::Sink })
                .collect(),
        );
        Ok(flow)
    }

    fn label(&self, row: usize, col: usize) -> Result<Label> {
        let labels = self
            .labels
            .as_ref()
            .ok_or_else(|| SeamError::Solver("labels requested before solve".into()))?;
        let cell = GridCell::new(row, col);
        if !self.contains(cell) {
            return Err(SeamError::Solver(format!(
                "cell ({row}, {col}) outside {}x{} grid",
                self.height, self.width
            )));
        }
        Ok(labels[self.node(cell)])
    }
}

/// Residual network in CSR form. Arcs come in pairs: `e ^ 1` is the
/// reverse of `e`, so the tail of `e` is `head[e ^ 1]`.
struct FlowNetwork {
    first: Vec<usize>,
    arcs: Vec<usize>,
    head: Vec<usize>,
    residual: Vec<f64>,
    level: Vec<usize>,
    cursor: Vec<usize>,
}

impl FlowNetwork {
    fn build(height: usize, width: usize, cost: &dyn EdgeCost) -> Result<Self> {
        let n = height * width;
        let pairs = height * width.saturating_sub(1) + width * height.saturating_sub(1);
        let mut head = Vec::with_capacity(2 * pairs);
        let mut residual = Vec::with_capacity(2 * pairs);

        for row in 0..height {
            for col in 0..width {
                let cell = GridCell::new(row, col);
                for dir in [Direction::East, Direction::South] {
                    let Some(next) = cell.neighbor(dir, height, width) else {
                        continue;
                    };
                    let forward = capacity(cost, cell, dir)?;
                    let backward = capacity(cost, next, dir.opposite())?;
                    head.push(next.row * width + next.col);
                    residual.push(forward);
                    head.push(row * width + col);
                    residual.push(backward);
                }
            }
        }

        let mut first = vec![0usize; n + 1];
        for e in 0..head.len() {
            first[head[e ^ 1] + 1] += 1;
        }
        for i in 0..n {
            first[i + 1] += first[i];
        }
        let mut fill = first.clone();
        let mut arcs = vec![0usize; head.len()];
        for e in 0..head.len() {
            let tail = head[e ^ 1];
            arcs[fill[tail]] = e;
            fill[tail] += 1;
        }

        Ok(Self {
            first,
            arcs,
            head,
            residual,
            level: vec![UNREACHED; n],
            cursor: vec![0; n],
        })
    }

    fn max_flow(&mut self, s: usize, t: usize) -> f64 {
        let mut flow = 0.0;
        let mut phases = 0usize;
        while self.build_levels(s, t) {
            let n = self.level.len();
            self.cursor.copy_from_slice(&self.first[..n]);
            flow += self.blocking_flow(s, t);
            phases += 1;
        }
        debug!(phases, "Dinic phases");
        flow
    }

    /// BFS layering over unsaturated arcs. Returns whether `t` was reached.
    fn build_levels(&mut self, s: usize, t: usize) -> bool {
        self.level.fill(UNREACHED);
        self.level[s] = 0;
        let mut queue = VecDeque::from([s]);
        while let Some(u) = queue.pop_front() {
            for &e in &self.arcs[self.first[u]..self.first[u + 1]] {
                let v = self.head[e];
                if self.residual[e] > FLOW_EPSILON && self.level[v] == UNREACHED {
                    self.level[v] = self.level[u] + 1;
                    queue.push_back(v);
                }
            }
        }
        self.level[t] != UNREACHED
    }

    /// Push augmenting paths along the level graph until none remain.
    /// Iterative so long seams cannot overflow the call stack.
    fn blocking_flow(&mut self, s: usize, t: usize) -> f64 {
        let mut total = 0.0;
        let mut path: Vec<usize> = Vec::new();
        let mut u = s;

        loop {
            if u == t {
                let bottleneck = path
                    .iter()
                    .map(|&e| self.residual[e])
                    .fold(f64::INFINITY, f64::min);
                let mut retreat = path.len();
                for (i, &e) in path.iter().enumerate() {
                    self.residual[e] -= bottleneck;
                    self.residual[e ^ 1] += bottleneck;
                    if retreat == path.len() && self.residual[e] <= FLOW_EPSILON {
                        retreat = i;
                    }
                }
                total += bottleneck;
                path.truncate(retreat);
                u = path.last().map_or(s, |&e| self.head[e]);
                continue;
            }

            let mut advanced = false;
            while self.cursor[u] < self.first[u + 1] {
                let e = self.arcs[self.cursor[u]];
                let v = self.head[e];
                if self.residual[e] > FLOW_EPSILON
                    && self.level[v] != UNREACHED
                    && self.level[v] == self.level[u] + 1
                {
                    path.push(e);
                    u = v;
                    advanced = true;
                    break;
                }
                self.cursor[u] += 1;
            }

            if !advanced {
                // Dead end: prune it from this phase and step back.
                self.level[u] = UNREACHED;
                let Some(e) = path.pop() else {
                    break;
                };
                u = self.head[e ^ 1];
                self.cursor[u] += 1;
            }
        }

        total
    }

    fn reachable_from(&self, s: usize) -> Vec<bool> {
        let mut seen = vec![false; self.level.len()];
        seen[s] = true;
        let mut queue = VecDeque::from([s]);
        while let Some(u) = queue.pop_front() {
            for &e in &self.arcs[self.first[u]..self.first[u + 1]] {
                let v = self.head[e];
                if self.residual[e] > FLOW_EPSILON && !seen[v] {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }
        seen
    }
}

fn capacity(cost: &dyn EdgeCost, cell: GridCell, dir: Direction) -> Result<f64> {
    let w = cost.cost(cell.row, cell.col, dir);
    if w.is_nan() || w < 0.0 {
        return Err(SeamError::Solver(format!(
            "edge ({}, {}) {:?} has invalid weight {w}",
            cell.row, cell.col, dir
        )));
    }
    Ok(w)
}

use std::collections::VecDeque;

use log::trace;

use crate::solver::SolverError;

/// Index of a node in a [`FlowNetwork`].
pub(crate) type NodeId = usize;
/// Index of an edge in a [`FlowNetwork`]'s arena.
pub(crate) type EdgeId = usize;

// Beyond any real path cost, with headroom for one more relaxation.
pub(crate) const INF: i64 = i64::MAX / 2;

/// One directed edge of the residual graph.
pub(crate) struct FlowEdge {
    pub(crate) to: NodeId,
    pub(crate) capacity: i64,
    pub(crate) cost: i64,
    pub(crate) flow: i64,
    // arena index of the paired reverse edge
    rev: EdgeId,
}

impl FlowEdge {
    /// Capacity still usable in this direction.
    pub(crate) fn residual(&self) -> i64 {
        self.capacity - self.flow
    }
}

/// Shortest-path labels produced by [`FlowNetwork::shortest_paths`].
pub(crate) struct ShortestPaths {
    /// `dist[v]` is the cost of the cheapest residual path from the source, or [`INF`].
    pub(crate) dist: Vec<i64>,
    /// `pred[v]` is the node and edge by which `v` was last improved.
    pub(crate) pred: Vec<Option<(NodeId, EdgeId)>>,
}

impl ShortestPaths {
    pub(crate) fn reaches(&self, node: NodeId) -> bool {
        self.dist[node] < INF
    }
}

/// A directed flow network over dense integer node ids.
///
/// Edges live in one arena; inserting an edge also installs its reverse
/// (residual) twin at the next index, with zero capacity and negated cost.
/// The two twins' flows are kept exact negatives of one another, so pushing
/// along either direction opens capacity for cancellation on the other.
pub(crate) struct FlowNetwork {
    adjacency: Vec<Vec<EdgeId>>,
    edges: Vec<FlowEdge>,
}

impl FlowNetwork {
    /// An edgeless network over `nodes` nodes, ids `0..nodes`.
    pub(crate) fn with_nodes(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            edges: Vec::new(),
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Insert the edge `u → v` and its reverse twin `v → u` (capacity 0, cost
    /// negated). Both endpoints learn of the other in their adjacency, so a
    /// search from either side reaches the other.
    pub(crate) fn add_edge(&mut self, u: NodeId, v: NodeId, capacity: i64, cost: i64) {
        let forward = self.edges.len();
        let reverse = forward + 1;

        self.edges.push(FlowEdge { to: v, capacity, cost, flow: 0, rev: reverse });
        self.adjacency[u].push(forward);

        self.edges.push(FlowEdge { to: u, capacity: 0, cost: -cost, flow: 0, rev: forward });
        self.adjacency[v].push(reverse);
    }

    /// Edges leaving `u`, residual or not.
    pub(crate) fn edges_from(&self, u: NodeId) -> impl Iterator<Item = (EdgeId, &FlowEdge)> + '_ {
        self.adjacency[u].iter().map(move |&id| (id, &self.edges[id]))
    }

    // the only way flow changes; keeps flow(rev) == -flow(fwd)
    fn push(&mut self, id: EdgeId, amount: i64) {
        let rev = self.edges[id].rev;
        self.edges[id].flow += amount;
        self.edges[rev].flow -= amount;
    }

    /// Label-correcting (SPFA) single-source shortest paths over edges with
    /// positive residual capacity.
    ///
    /// Residual twins carry negated costs, so distances here may pass through
    /// negative edges; that rules out Dijkstra but not this queue-driven
    /// relaxation, which terminates once the worklist drains. A node
    /// re-entering the worklist more than `node_count` times can only mean a
    /// negative-cost residual cycle, reported as an internal fault rather
    /// than looping forever.
    pub(crate) fn shortest_paths(&self, source: NodeId) -> Result<ShortestPaths, SolverError> {
        let nodes = self.node_count();
        let mut dist = vec![INF; nodes];
        let mut pred: Vec<Option<(NodeId, EdgeId)>> = vec![None; nodes];
        let mut in_queue = vec![false; nodes];
        let mut enqueues = vec![0usize; nodes];

        dist[source] = 0;
        let mut worklist = VecDeque::with_capacity(nodes);
        worklist.push_back(source);
        in_queue[source] = true;
        enqueues[source] = 1;

        while let Some(u) = worklist.pop_front() {
            in_queue[u] = false;

            for &id in &self.adjacency[u] {
                let edge = &self.edges[id];
                if edge.residual() <= 0 {
                    continue;
                }

                let relaxed = dist[u] + edge.cost;
                if relaxed < dist[edge.to] {
                    dist[edge.to] = relaxed;
                    pred[edge.to] = Some((u, id));
                    if !in_queue[edge.to] {
                        enqueues[edge.to] += 1;
                        if enqueues[edge.to] > nodes {
                            return Err(SolverError::NegativeResidualCycle);
                        }
                        worklist.push_back(edge.to);
                        in_queue[edge.to] = true;
                    }
                }
            }
        }

        Ok(ShortestPaths { dist, pred })
    }

    /// Successive shortest-path augmentation from `source` to `sink`.
    ///
    /// Each round augments one bottleneck's worth of flow along a cheapest
    /// residual path, as long as such a path exists *and* its cost is
    /// negative, i.e. the augmentation strictly lowers total cost. Because
    /// successive shortest paths have non-decreasing cost, stopping at the
    /// first non-improving path yields the minimum total cost over every
    /// possible flow value, not just the maximum one.
    ///
    /// Returns the total cost of the flow left on the network.
    pub(crate) fn min_cost_flow(&mut self, source: NodeId, sink: NodeId) -> Result<i64, SolverError> {
        let mut total_cost = 0i64;

        loop {
            let labels = self.shortest_paths(source)?;
            if !labels.reaches(sink) || labels.dist[sink] >= 0 {
                break;
            }

            // walk the predecessor chain back to the source for the path and its bottleneck
            let mut path = Vec::new();
            let mut bottleneck = i64::MAX;
            let mut v = sink;
            while v != source {
                let (u, id) = labels.pred[v].ok_or(SolverError::BrokenPredecessorChain)?;
                bottleneck = bottleneck.min(self.edges[id].residual());
                path.push(id);
                v = u;
            }
            if bottleneck <= 0 {
                return Err(SolverError::BrokenPredecessorChain);
            }

            for &id in &path {
                total_cost += self.edges[id].cost * bottleneck;
                self.push(id, bottleneck);
            }

            trace!(
                "augmented {} unit(s) along {} edge(s); total cost now {}",
                bottleneck,
                path.len(),
                total_cost
            );
        }

        Ok(total_cost)
    }

    /// Forward edges carrying exactly one unit of flow, as `(from, to)` pairs.
    ///
    /// All capacities in the grid reduction are 1, so these are precisely the
    /// edges the flow selected.
    pub(crate) fn unit_flow_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        (0..self.node_count()).flat_map(move |u| {
            self.edges_from(u)
                .filter(|(_, edge)| edge.capacity > 0 && edge.flow == 1)
                .map(move |(_, edge)| (u, edge.to))
        })
    }
}

//! Index-based tree shared by the RRT planners

use nalgebra::distance;

use super::workspace::Point;

/// A node in the RRT tree
#[derive(Debug, Clone, PartialEq)]
pub struct RrtNode {
    pub point: Point,
    /// Index of parent node in the tree (None for root)
    pub parent: Option<usize>,
    /// Cumulative cost from the root along the parent chain, as recorded when
    /// the parent was last assigned
    pub cost: f64,
}

/// Arena of tree nodes plus the edge log used for visualization
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<RrtNode>,
    edges: Vec<(Point, Point)>,
}

impl Tree {
    /// Tree holding only `root`
    pub fn new(root: Point) -> Self {
        Self {
            nodes: vec![RrtNode {
                point: root,
                parent: None,
                cost: 0.0,
            }],
            edges: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> &RrtNode {
        &self.nodes[index]
    }

    pub fn nodes(&self) -> &[RrtNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(Point, Point)] {
        &self.edges
    }

    /// Index of the node closest to `target`; the earliest wins ties
    pub fn nearest(&self, target: &Point) -> usize {
        let mut min_dist = f64::INFINITY;
        let mut nearest_idx = 0;

        for (i, node) in self.nodes.iter().enumerate() {
            let dist = distance(&node.point, target);
            if dist < min_dist {
                min_dist = dist;
                nearest_idx = i;
            }
        }

        nearest_idx
    }

    /// Indices of all nodes within `radius` of `target`, in insertion order
    pub fn near(&self, target: &Point, radius: f64) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| distance(&node.point, target) <= radius)
            .map(|(i, _)| i)
            .collect()
    }

    /// Append `point` under `parent` and log the edge
    pub fn insert(&mut self, point: Point, parent: usize, cost: f64) -> usize {
        self.edges.push((self.nodes[parent].point, point));
        self.nodes.push(RrtNode {
            point,
            parent: Some(parent),
            cost,
        });
        self.nodes.len() - 1
    }

    /// Move `child` under `new_parent` and log the new edge.
    ///
    /// Only `child`'s own cost changes; its descendants keep their costs.
    pub fn reparent(&mut self, child: usize, new_parent: usize, cost: f64) {
        self.edges
            .push((self.nodes[new_parent].point, self.nodes[child].point));
        let node = &mut self.nodes[child];
        node.parent = Some(new_parent);
        node.cost = cost;
    }

    /// Cheapest parent for `point` among `near`, as `(index, cost)`.
    ///
    /// `nearest` is the baseline; a near node replaces it only when strictly
    /// cheaper and `collision_free` accepts the connecting segment.
    pub fn choose_parent<F>(
        &self,
        point: &Point,
        nearest: usize,
        near: &[usize],
        collision_free: F,
    ) -> (usize, f64)
    where
        F: Fn(&Point, &Point) -> bool,
    {
        let base = &self.nodes[nearest];
        let mut best = (nearest, base.cost + distance(&base.point, point));
        for &idx in near {
            let node = &self.nodes[idx];
            let cost = node.cost + distance(&node.point, point);
            if cost < best.1 && collision_free(&node.point, point) {
                best = (idx, cost);
            }
        }
        best
    }

    /// Offer `new_idx` as parent to each node in `near`, returning how many
    /// were reparented.
    ///
    /// A node moves only when the route through `new_idx` is strictly cheaper
    /// and `collision_free` accepts the segment.
    pub fn rewire<F>(&mut self, new_idx: usize, near: &[usize], collision_free: F) -> usize
    where
        F: Fn(&Point, &Point) -> bool,
    {
        let new_point = self.nodes[new_idx].point;
        let new_cost = self.nodes[new_idx].cost;
        let mut rewired = 0;
        for &idx in near {
            let node = &self.nodes[idx];
            let cost = new_cost + distance(&new_point, &node.point);
            if cost < node.cost && collision_free(&new_point, &node.point) {
                self.reparent(idx, new_idx, cost);
                rewired += 1;
            }
        }
        rewired
    }

    /// Points from the root to `index`
    pub fn path_to(&self, index: usize) -> Vec<Point> {
        let mut path = Vec::new();
        let mut current = Some(index);

        while let Some(idx) = current {
            let node = &self.nodes[idx];
            path.push(node.point);
            current = node.parent;
        }

        path.reverse();
        path
    }

    /// Give up the nodes and edge log
    pub fn into_parts(self) -> (Vec<RrtNode>, Vec<(Point, Point)>) {
        (self.nodes, self.edges)
    }
}

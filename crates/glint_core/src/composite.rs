//! Shape aggregation and the bounding-volume hierarchy.
//!
//! A `Composite` owns its shapes in a flat arena and addresses the tree
//! that accelerates them by index, so nodes never borrow each other and
//! rebuilding the tree never touches the shapes.

use crate::shape::{GeoPoint, Shape};
use glint_math::{Aabb, Interval, Ray};

#[derive(Clone, Debug)]
struct Node {
    /// `None` marks a subtree of infinite extent; it can never be
    /// pruned.
    bounds: Option<Aabb>,
    kind: NodeKind,
}

#[derive(Clone, Debug)]
enum NodeKind {
    /// Index into the shape arena.
    Leaf(usize),
    /// Indices into the node arena.
    Branch(Vec<usize>),
}

/// A collection of shapes with an optional acceleration tree over them.
///
/// Before `build_hierarchy` every shape is its own root and queries
/// degrade to a linear scan; afterwards bounded shapes live under a
/// single agglomerated subtree.
#[derive(Clone, Debug, Default)]
pub struct Composite {
    shapes: Vec<Shape>,
    nodes: Vec<Node>,
    roots: Vec<usize>,
}

impl Composite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Add one shape as its own root.
    pub fn add(&mut self, shape: Shape) {
        let bounds = shape.bounding_box();
        let shape_index = self.shapes.len();
        self.shapes.push(shape);
        let node_index = self.nodes.len();
        self.nodes.push(Node {
            bounds,
            kind: NodeKind::Leaf(shape_index),
        });
        self.roots.push(node_index);
    }

    /// Graft another composite under a single new root, keeping its
    /// internal grouping intact.
    pub fn add_composite(&mut self, other: Composite) {
        if other.is_empty() {
            return;
        }
        let shape_base = self.shapes.len();
        let node_base = self.nodes.len();
        self.shapes.extend(other.shapes);
        for node in other.nodes {
            let kind = match node.kind {
                NodeKind::Leaf(shape) => NodeKind::Leaf(shape + shape_base),
                NodeKind::Branch(children) => {
                    NodeKind::Branch(children.into_iter().map(|c| c + node_base).collect())
                }
            };
            self.nodes.push(Node {
                bounds: node.bounds,
                kind,
            });
        }

        let children: Vec<usize> = other.roots.into_iter().map(|r| r + node_base).collect();
        let bounds = self.union_bounds(&children);
        let node_index = self.nodes.len();
        self.nodes.push(Node {
            bounds,
            kind: NodeKind::Branch(children),
        });
        self.roots.push(node_index);
    }

    /// Bounds of everything held, or `None` while empty or holding any
    /// unbounded shape.
    pub fn bounding_box(&self) -> Option<Aabb> {
        self.union_bounds(&self.roots)
    }

    /// Union of the given nodes' bounds; `None` if the list is empty or
    /// any node is unbounded.
    fn union_bounds(&self, nodes: &[usize]) -> Option<Aabb> {
        let mut total: Option<Aabb> = None;
        for &index in nodes {
            let bounds = self.nodes[index].bounds?;
            total = Some(match total {
                Some(acc) => Aabb::surrounding(&acc, &bounds),
                None => bounds,
            });
        }
        total
    }

    /// Replace the current grouping with a fresh tree built by pairwise
    /// agglomeration.
    ///
    /// Bounded shapes merge closest-first (overlapping boxes have
    /// non-positive separation and merge before any disjoint pair)
    /// until one subtree remains. Unbounded shapes cannot join a box
    /// merge; they hang directly under an unbounded root next to that
    /// subtree. Each merge rescans the active pair set, which is
    /// quadratic but cheap at the scene sizes this serves.
    pub fn build_hierarchy(&mut self) {
        let mut nodes: Vec<Node> = Vec::with_capacity(2 * self.shapes.len());
        let mut active: Vec<(usize, Aabb)> = Vec::new();
        let mut loose: Vec<usize> = Vec::new();

        for (shape_index, shape) in self.shapes.iter().enumerate() {
            let bounds = shape.bounding_box();
            let node_index = nodes.len();
            match bounds {
                Some(bbox) => active.push((node_index, bbox)),
                None => loose.push(node_index),
            }
            nodes.push(Node {
                bounds,
                kind: NodeKind::Leaf(shape_index),
            });
        }
        let bounded = active.len();

        while active.len() > 1 {
            let mut best = (0, 1);
            let mut best_gap = f32::INFINITY;
            for i in 0..active.len() {
                for j in (i + 1)..active.len() {
                    let gap = active[i].1.separation(&active[j].1);
                    if gap < best_gap {
                        best = (i, j);
                        best_gap = gap;
                    }
                }
            }
            // Remove the later index first so the earlier one stays put.
            let (b_index, b_bounds) = active.swap_remove(best.1);
            let (a_index, a_bounds) = active.swap_remove(best.0);
            let merged = Aabb::surrounding(&a_bounds, &b_bounds);
            let node_index = nodes.len();
            nodes.push(Node {
                bounds: Some(merged),
                kind: NodeKind::Branch(vec![a_index, b_index]),
            });
            active.push((node_index, merged));
        }

        let mut roots: Vec<usize> = active.into_iter().map(|(index, _)| index).collect();
        if !loose.is_empty() {
            let mut children = roots;
            children.extend(&loose);
            let node_index = nodes.len();
            nodes.push(Node {
                bounds: None,
                kind: NodeKind::Branch(children),
            });
            roots = vec![node_index];
        }

        self.nodes = nodes;
        self.roots = roots;
        log::info!(
            "Built hierarchy over {} shapes: {} bounded, {} unbounded",
            self.shapes.len(),
            bounded,
            loose.len()
        );
    }

    /// Every admissible intersection along `ray`, pruned by the tree.
    ///
    /// All hits are collected, not just the nearest: transparency
    /// accumulation needs every blocker on a segment.
    pub fn intersections(&self, ray: &Ray, limit: Interval) -> Vec<GeoPoint<'_>> {
        let mut out = Vec::new();
        for &root in &self.roots {
            self.walk(root, ray, limit, &mut out);
        }
        out
    }

    /// Every admissible intersection along `ray`, testing each kernel
    /// directly. The tree query must agree with this exactly.
    pub fn intersections_linear(&self, ray: &Ray, limit: Interval) -> Vec<GeoPoint<'_>> {
        let mut out = Vec::new();
        for shape in &self.shapes {
            shape.append_intersections(ray, limit, &mut out);
        }
        out
    }

    fn walk<'a>(&'a self, node: usize, ray: &Ray, limit: Interval, out: &mut Vec<GeoPoint<'a>>) {
        let node = &self.nodes[node];
        if let Some(bounds) = &node.bounds {
            if !bounds.hit(ray, limit) {
                return;
            }
        }
        match &node.kind {
            NodeKind::Leaf(shape) => self.shapes[*shape].append_intersections(ray, limit, out),
            NodeKind::Branch(children) => {
                for &child in children {
                    self.walk(child, ray, limit, out);
                }
            }
        }
    }
}

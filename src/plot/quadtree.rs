use eframe::egui::{Vec2, vec2};

const QUADTREE_LEAF_CAPACITY: usize = 8;
const QUADTREE_MAX_DEPTH: usize = 8;

#[derive(Clone, Copy)]
pub struct QuadBounds {
    pub center: Vec2,
    pub half_extent: f32,
}

impl QuadBounds {
    fn from_points(points: &[Vec2]) -> Option<Self> {
        let mut min = vec2(f32::INFINITY, f32::INFINITY);
        let mut max = vec2(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for point in points {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }

        if !min.x.is_finite() || !min.y.is_finite() || !max.x.is_finite() || !max.y.is_finite() {
            return None;
        }

        let center = (min + max) * 0.5;
        let span_x = (max.x - min.x).max(1.0);
        let span_y = (max.y - min.y).max(1.0);
        let half_extent = (span_x.max(span_y) * 0.5) + 1.0;

        Some(Self {
            center,
            half_extent,
        })
    }

    fn child(self, quadrant: usize) -> Self {
        let quarter = self.half_extent * 0.5;
        let offset = match quadrant {
            0 => vec2(-quarter, -quarter),
            1 => vec2(quarter, -quarter),
            2 => vec2(-quarter, quarter),
            _ => vec2(quarter, quarter),
        };

        Self {
            center: self.center + offset,
            half_extent: quarter,
        }
    }

    fn quadrant_for(self, point: Vec2) -> usize {
        let right = point.x >= self.center.x;
        let lower = point.y >= self.center.y;
        match (right, lower) {
            (false, false) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (true, true) => 3,
        }
    }

    fn distance_sq_to(self, other: Self) -> f32 {
        let dx = (self.center.x - other.center.x).abs() - (self.half_extent + other.half_extent);
        let dy = (self.center.y - other.center.y).abs() - (self.half_extent + other.half_extent);
        let clamped_dx = dx.max(0.0);
        let clamped_dy = dy.max(0.0);
        (clamped_dx * clamped_dx) + (clamped_dy * clamped_dy)
    }
}

pub struct QuadNode {
    pub bounds: QuadBounds,
    pub indices: Vec<usize>,
    pub children: [Option<Box<QuadNode>>; 4],
}

pub struct QuadCell {
    pub center: Vec2,
    pub half_extent: f32,
    pub depth: usize,
    pub is_leaf: bool,
}

impl QuadNode {
    pub fn build(positions: &[Vec2]) -> Option<Self> {
        let bounds = QuadBounds::from_points(positions)?;
        let indices = (0..positions.len()).collect::<Vec<_>>();
        Some(Self::build_node(bounds, indices, positions, 0))
    }

    fn build_node(
        bounds: QuadBounds,
        indices: Vec<usize>,
        positions: &[Vec2],
        depth: usize,
    ) -> Self {
        let mut node = Self {
            bounds,
            indices,
            children: std::array::from_fn(|_| None),
        };

        if depth >= QUADTREE_MAX_DEPTH || node.indices.len() <= QUADTREE_LEAF_CAPACITY {
            return node;
        }

        let mut buckets = std::array::from_fn::<_, 4, _>(|_| Vec::new());
        for &index in &node.indices {
            let quadrant = bounds.quadrant_for(positions[index]);
            buckets[quadrant].push(index);
        }

        // Coincident or single-quadrant clusters stay an oversized leaf.
        let non_empty = buckets.iter().filter(|bucket| !bucket.is_empty()).count();
        if non_empty <= 1 {
            return node;
        }

        for (quadrant, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }

            let child_bounds = bounds.child(quadrant);
            node.children[quadrant] = Some(Box::new(Self::build_node(
                child_bounds,
                bucket,
                positions,
                depth + 1,
            )));
        }
        node.indices.clear();
        node
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|child| child.is_none())
    }
}

pub fn collect_cells(node: &QuadNode, depth: usize, cells: &mut Vec<QuadCell>) {
    cells.push(QuadCell {
        center: node.bounds.center,
        half_extent: node.bounds.half_extent,
        depth,
        is_leaf: node.is_leaf(),
    });

    for child in &node.children {
        if let Some(child) = child.as_ref() {
            collect_cells(child, depth + 1, cells);
        }
    }
}

/// Appends every unordered index pair closer than `max_distance_sq`, pruning
/// whole subtree pairs by bounds distance. Call with the root twice and
/// `same_node` true.
pub fn collect_close_pairs(
    node_a: &QuadNode,
    node_b: &QuadNode,
    same_node: bool,
    positions: &[Vec2],
    max_distance_sq: f32,
    pairs: &mut Vec<(usize, usize)>,
) {
    if node_a.bounds.distance_sq_to(node_b.bounds) > max_distance_sq {
        return;
    }

    if node_a.is_leaf() && node_b.is_leaf() {
        if same_node {
            for i in 0..node_a.indices.len() {
                let from = node_a.indices[i];
                for j in (i + 1)..node_a.indices.len() {
                    let to = node_a.indices[j];
                    if (positions[from] - positions[to]).length_sq() < max_distance_sq {
                        pairs.push((from, to));
                    }
                }
            }
        } else {
            for &from in &node_a.indices {
                for &to in &node_b.indices {
                    if (positions[from] - positions[to]).length_sq() < max_distance_sq {
                        pairs.push((from, to));
                    }
                }
            }
        }
        return;
    }

    if same_node {
        for first in 0..4 {
            let Some(child_a) = node_a.children[first].as_ref() else {
                continue;
            };

            collect_close_pairs(child_a, child_a, true, positions, max_distance_sq, pairs);

            for second in (first + 1)..4 {
                let Some(child_b) = node_a.children[second].as_ref() else {
                    continue;
                };
                collect_close_pairs(child_a, child_b, false, positions, max_distance_sq, pairs);
            }
        }
        return;
    }

    let split_a = if node_a.is_leaf() {
        false
    } else if node_b.is_leaf() {
        true
    } else {
        node_a.bounds.half_extent >= node_b.bounds.half_extent
    };

    if split_a {
        for child in &node_a.children {
            let Some(child) = child.as_ref() else {
                continue;
            };
            collect_close_pairs(child, node_b, false, positions, max_distance_sq, pairs);
        }
    } else {
        for child in &node_b.children {
            let Some(child) = child.as_ref() else {
                continue;
            };
            collect_close_pairs(node_a, child, false, positions, max_distance_sq, pairs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scattered_points(count: usize) -> Vec<Vec2> {
        let mut state = 0x2545_f491_4f6c_dd1d_u64;
        let mut next = move || {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 40) as f32) / ((1u64 << 24) as f32)
        };

        (0..count)
            .map(|_| vec2(next() * 400.0, next() * 300.0))
            .collect()
    }

    fn brute_force_pairs(positions: &[Vec2], max_distance: f32) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                if (positions[i] - positions[j]).length_sq() < max_distance * max_distance {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    fn normalized(mut pairs: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
        for pair in &mut pairs {
            if pair.0 > pair.1 {
                *pair = (pair.1, pair.0);
            }
        }
        pairs.sort_unstable();
        pairs
    }

    #[test]
    fn close_pairs_match_brute_force() {
        let positions = scattered_points(80);
        let tree = QuadNode::build(&positions).unwrap();

        let mut pairs = Vec::new();
        collect_close_pairs(&tree, &tree, true, &positions, 24.0 * 24.0, &mut pairs);

        assert_eq!(normalized(pairs), brute_force_pairs(&positions, 24.0));
    }

    #[test]
    fn coincident_points_stay_in_one_leaf() {
        let positions = vec![vec2(5.0, 5.0); 20];
        let tree = QuadNode::build(&positions).unwrap();

        let mut pairs = Vec::new();
        collect_close_pairs(&tree, &tree, true, &positions, 1.0, &mut pairs);

        assert_eq!(pairs.len(), 20 * 19 / 2);
    }

    #[test]
    fn empty_input_builds_no_tree() {
        assert!(QuadNode::build(&[]).is_none());
    }

    #[test]
    fn cells_cover_every_node_once() {
        let positions = scattered_points(50);
        let tree = QuadNode::build(&positions).unwrap();

        let mut cells = Vec::new();
        collect_cells(&tree, 0, &mut cells);

        assert!(!cells.is_empty());
        assert_eq!(cells[0].depth, 0);
        let leaves = cells.iter().filter(|cell| cell.is_leaf).count();
        assert!(leaves >= 1);
    }
}

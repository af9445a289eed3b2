use eframe::egui::{Vec2, vec2};

use super::geometry::POINT_RADIUS;
use super::quadtree::{QuadNode, collect_close_pairs};

/// Tick count of one relaxation. Always runs to completion so the same input
/// always lands on the same layout.
pub const RELAX_ITERATIONS: usize = 300;

/// Closest two settled centers may sit, twice the point radius.
pub const MIN_SEPARATION: f32 = POINT_RADIUS * 2.0;

const PULL_STRENGTH: f32 = 1.0;
const VELOCITY_DECAY: f32 = 0.6;
const ALPHA_FLOOR: f32 = 0.001;
const SEPARATION_SWEEPS: usize = 2;
const SETTLE_SWEEPS: usize = 64;

/// Relaxes one band of points. Every point starts at its slot on the row
/// center line and is pulled back there while overlaps are pushed apart, so
/// the result reads as an evenly spread strip. Pure in its inputs.
pub fn relax_band(slots: &[f32], row_center: f32) -> Vec<Vec2> {
    let mut positions: Vec<Vec2> = slots
        .iter()
        .map(|&slot| vec2(slot, row_center))
        .collect();
    if positions.len() < 2 {
        return positions;
    }

    let mut velocities = vec![Vec2::ZERO; positions.len()];
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let alpha_decay = 1.0 - ALPHA_FLOOR.powf(1.0 / RELAX_ITERATIONS as f32);
    let mut alpha = 1.0_f32;

    for _ in 0..RELAX_ITERATIONS {
        alpha += (0.0 - alpha) * alpha_decay;

        for (index, velocity) in velocities.iter_mut().enumerate() {
            let target = vec2(slots[index], row_center);
            *velocity += (target - positions[index]) * (PULL_STRENGTH * alpha);
        }

        for (position, velocity) in positions.iter_mut().zip(velocities.iter_mut()) {
            *velocity *= VELOCITY_DECAY;
            *position += *velocity;
        }

        separate_overlaps(&mut positions, &mut pairs, SEPARATION_SWEEPS);
    }

    // The pulls of the last few ticks re-compress crowded rows by a fraction
    // of a pixel, so the layout gets a final bounded settle with no pulls.
    separate_overlaps(&mut positions, &mut pairs, SETTLE_SWEEPS);

    positions
}

fn separate_overlaps(positions: &mut [Vec2], pairs: &mut Vec<(usize, usize)>, sweeps: usize) {
    for _ in 0..sweeps {
        let Some(tree) = QuadNode::build(positions) else {
            return;
        };

        pairs.clear();
        collect_close_pairs(
            &tree,
            &tree,
            true,
            positions,
            MIN_SEPARATION * MIN_SEPARATION,
            pairs,
        );
        if pairs.is_empty() {
            return;
        }

        for &(from, to) in pairs.iter() {
            let delta = positions[from] - positions[to];
            let distance = delta.length();
            let direction = if distance > 0.0001 {
                delta / distance
            } else {
                let angle =
                    ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
                vec2(angle.cos(), angle.sin())
            };

            // Earlier corrections in this sweep may already have resolved the
            // pair, so the push is recomputed from live positions.
            let push = (MIN_SEPARATION - distance).max(0.0) * 0.5;
            positions[from] += direction * push;
            positions[to] -= direction * push;
        }
    }
}

//! Starting brick layout
//!
//! Columns step by one brick width from the left margin until the next
//! column would start inside the right margin; every column gets one brick
//! per configured row.

use glam::Vec2;

use crate::tuning::Tuning;

/// Brick centers and starting hits, column by column
pub fn brick_grid(tuning: &Tuning) -> Vec<(Vec2, i32)> {
    let mut bricks = Vec::new();
    let half_width = tuning.brick_width / 2.0;
    let stop = tuning.arena_width - tuning.brick_margin;

    let mut x = tuning.brick_margin;
    while x < stop {
        for row in &tuning.brick_rows {
            bricks.push((Vec2::new(x + half_width, row.y), row.hits));
        }
        x += tuning.brick_width;
    }

    log::debug!(
        "Brick grid: {} bricks in {} rows",
        bricks.len(),
        tuning.brick_rows.len()
    );
    bricks
}

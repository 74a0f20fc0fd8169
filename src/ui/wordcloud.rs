use std::sync::Arc;

use eframe::egui::{Color32, FontId, Galley, Sense, Ui, Vec2};

use crate::color::generate_palette;

// ---------------------------------------------------------------------------
// Word cloud (painter-drawn)
// ---------------------------------------------------------------------------

const MIN_FONT: f32 = 12.0;
const MAX_FONT: f32 = 44.0;
const PADDING: f32 = 6.0;

/// Paint the ranked words as a flowing cloud, font size scaled by count.
///
/// Expects `words` sorted by count descending (the aggregator's output
/// order); layout flows left to right and wraps at the panel width.
pub fn word_cloud(ui: &mut Ui, words: &[(String, u64)]) {
    if words.is_empty() {
        return;
    }

    let max_count = words.first().map(|&(_, c)| c).unwrap_or(1) as f32;
    let min_count = words.last().map(|&(_, c)| c).unwrap_or(1) as f32;
    let palette = generate_palette(words.len());
    let width = ui.available_width().max(200.0);

    // First pass: size each word and lay the galleys out in rows.
    let mut placements: Vec<(Vec2, Arc<Galley>)> = Vec::with_capacity(words.len());
    let mut cursor = Vec2::ZERO;
    let mut row_height: f32 = 0.0;
    for (i, (word, count)) in words.iter().enumerate() {
        let weight = if (max_count - min_count).abs() < f32::EPSILON {
            1.0
        } else {
            (*count as f32 - min_count) / (max_count - min_count)
        };
        let font_size = MIN_FONT + weight * (MAX_FONT - MIN_FONT);
        let color = palette[i % palette.len()];

        let galley = ui.fonts(|fonts| {
            fonts.layout_no_wrap(word.clone(), FontId::proportional(font_size), color)
        });

        let size = galley.size();
        if cursor.x > 0.0 && cursor.x + size.x > width {
            cursor.x = 0.0;
            cursor.y += row_height + PADDING;
            row_height = 0.0;
        }
        placements.push((cursor, galley));
        row_height = row_height.max(size.y);
        cursor.x += size.x + PADDING;
    }
    let total_height = cursor.y + row_height;

    // Second pass: paint into the allocated rect.
    let (rect, _) = ui.allocate_exact_size(Vec2::new(width, total_height), Sense::hover());
    let painter = ui.painter();
    for (offset, galley) in placements {
        painter.galley(rect.min + offset, galley, Color32::GRAY);
    }
}

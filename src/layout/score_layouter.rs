//! Score Layouter (spec §4.8): the top-level orchestrator. Drives the
//! cursor → column breaker → shapes creator → spacing → lines breaker →
//! system layouter pipeline and paginates the result, one page per
//! `layout_in_box` call, per spec §5's single-threaded cooperative model.

use crate::domain::score::Score;
use crate::domain::staff_objs::build_staff_objs;
use crate::layout::boxes::{BoxId, BoxKind, BoxStorage};
use crate::layout::column::Column;
use crate::layout::column_breaker::partition_into_columns;
use crate::layout::errors::LayoutError;
use crate::layout::lines_breaker::break_lines_optimal;
use crate::layout::meter::ScoreMeter;
use crate::layout::shapes::ShapesCreator;
use crate::layout::spacing::{self, ColumnSpacing, SpacingFunction, VoiceGap};
use crate::layout::system::System as SystemLayouter;
use crate::layout::types::{Point, Shape};

/// Prolog width, in tenths (spec §9, Open Question #2): "approximated as
/// ten tenths × 10", read literally. This crate does not compute the
/// prolog from actual clef/key/time shapes per system; see DESIGN.md.
pub const PROLOG_WIDTH_TENTHS: f32 = 100.0;

#[derive(Debug, Clone, Copy)]
pub struct ScoreLayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub system_indent: f32,
    pub system_height: f32,
    pub system_gap: f32,
    pub stop_at_final_barline: bool,
    pub justify_final_barline: bool,
    pub fill_page_with_empty_staves: bool,
}

impl Default for ScoreLayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 2100.0,
            page_height: 2970.0,
            margin_left: 150.0,
            margin_right: 150.0,
            margin_top: 150.0,
            margin_bottom: 150.0,
            system_indent: 0.0,
            system_height: 480.0,
            system_gap: 150.0,
            stop_at_final_barline: true,
            justify_final_barline: false,
            fill_page_with_empty_staves: false,
        }
    }
}

/// Result of one `layout_in_box` call: the page box just filled, and
/// whether the whole score has now been laid out.
#[derive(Debug, Clone, Copy)]
pub struct PageLayoutResult {
    pub page_box: BoxId,
    pub layout_is_finished: bool,
}

/// Builds a [`Column`]/[`ColumnSpacing`] pair out of one column's worth of
/// staff-objects, using instrument/staff of the column's first entry as
/// the representative staff for sizing (multi-staff column alignment is
/// the per-object engravers' concern, not this orchestrator's).
///
/// Also returns the real engraved `Shape` for every entry, each built at
/// the column's local origin (0, 0) — entries in one column are
/// simultaneous staff-objects, so they share the column's x; the caller
/// offsets them to the column's placed `start_x` once the system is laid
/// out (spec §4.8 phase 2c), rather than discarding them after reading
/// `.width()`.
fn column_from_entries(creator: &mut ShapesCreator, entries: &[crate::domain::staff_objs::StaffObjEntry]) -> (Column, ColumnSpacing, Vec<Shape>) {
    let (instrument, staff) = entries.first().map(|e| (e.instrument, e.staff)).unwrap_or((0, 0));
    let shapes: Vec<Shape> = entries
        .iter()
        .map(|e| creator.create_shape(e, 0.0, 0.0, instrument, staff))
        .collect();
    let body = shapes.iter().map(Shape::width).fold(0.0_f32, f32::max).max(spacing::MIN_SYMBOL_SEPARATION);
    let ends_in_visible_barline = entries.last().map(|e| e.is_barline()).unwrap_or(false);
    let start_hook = body * 0.15;
    let end_hook = if ends_in_visible_barline { body * 0.1 } else { body * 0.25 };

    let mut col = Column::new(start_hook, body, end_hook);
    if ends_in_visible_barline {
        col = col.with_visible_barline();
    }

    let delta_t = entries
        .iter()
        .filter(|e| e.is_note_rest())
        .map(|e| e.get_duration())
        .max()
        .unwrap_or(spacing::DELTA_T_REF as u32) as f32;
    let spacing_fn = SpacingFunction::default();
    let intrinsic = spacing::intrinsic_width(&spacing_fn, &[VoiceGap { delta_t }]).max(col.trimmed_width());

    (col, ColumnSpacing::new(intrinsic), shapes)
}

/// Splits a full break sequence (as returned by the lines breaker) into
/// inclusive `(first_column, last_column)` ranges, one per system.
fn system_ranges(column_spacings: &[ColumnSpacing], forced_breaks: &[bool], target_width: f32) -> Vec<(usize, usize)> {
    if column_spacings.is_empty() {
        return Vec::new();
    }
    let ends = break_lines_optimal(column_spacings, forced_breaks, target_width);
    let mut ranges = Vec::with_capacity(ends.len() + 1);
    let mut start = 0usize;
    for &e in &ends {
        ranges.push((start, e));
        start = e + 1;
    }
    ranges.push((start, column_spacings.len() - 1));
    ranges
}

/// Top-level orchestrator (spec §4.8). Owns the box storage for the
/// lifetime of one layout pass and is driven by `prepare_to_start_layout`
/// followed by repeated `layout_in_box` calls, one per page, until
/// `layout_is_finished` is reported.
pub struct ScoreLayouter {
    config: ScoreLayoutConfig,
    columns: Vec<Column>,
    /// Each column's engraved shapes, at the column's local origin.
    /// Consumed (moved out) the one time its column is placed into a
    /// system, in `layout_in_box`.
    column_shapes: Vec<Vec<Shape>>,
    system_ranges: Vec<(usize, usize)>,
    next_system: usize,
    boxes: BoxStorage,
}

impl ScoreLayouter {
    /// Phase 1 (spec §4.8): split the score into columns, run the spacing
    /// algorithm, and compute the full system-break sequence up front. The
    /// per-page loop in `layout_in_box` only consumes pre-computed systems.
    pub fn prepare_to_start_layout(score: &Score, meter: &ScoreMeter, config: ScoreLayoutConfig) -> Self {
        let entries = build_staff_objs(score);
        let column_slices = partition_into_columns(&entries);
        let mut creator = ShapesCreator::new(meter);

        let mut columns = Vec::with_capacity(column_slices.len());
        let mut column_spacings = Vec::with_capacity(column_slices.len());
        let mut column_shapes = Vec::with_capacity(column_slices.len());
        for slice in column_slices.iter().copied() {
            let (col, spacing_entry, shapes) = column_from_entries(&mut creator, slice);
            columns.push(col);
            column_spacings.push(spacing_entry);
            column_shapes.push(shapes);
        }
        // No per-score forced-break annotations exist on this crate's domain
        // model yet; the lines breaker's forced-break path is exercised
        // directly in its own unit tests.
        let forced_breaks = vec![false; columns.len()];

        let target_width = config.page_width - config.margin_left - config.margin_right - config.system_indent;
        let system_ranges = system_ranges(&column_spacings, &forced_breaks, target_width);
        log::debug!(
            "prepare_to_start_layout: {} columns, {} systems",
            columns.len(),
            system_ranges.len()
        );

        Self {
            config,
            columns,
            column_shapes,
            system_ranges,
            next_system: 0,
            boxes: BoxStorage::new(),
        }
    }

    fn target_system_width(&self) -> f32 {
        self.config.page_width - self.config.margin_left - self.config.margin_right - self.config.system_indent
    }

    pub fn is_finished(&self) -> bool {
        self.next_system >= self.system_ranges.len()
    }

    pub fn boxes(&self) -> &BoxStorage {
        &self.boxes
    }

    /// Phase 2 (spec §4.8): lay out as many systems as fit vertically on
    /// one page box. Returns `Err` only on unrecoverable resource
    /// exhaustion (spec §7): a page that cannot fit even one system.
    pub fn layout_in_box(&mut self) -> Result<PageLayoutResult, LayoutError> {
        let available_height = self.config.page_height - self.config.margin_top - self.config.margin_bottom;

        let page = self
            .boxes
            .create(BoxKind::DocPage, Point { x: 0.0, y: 0.0 }, self.config.page_width, self.config.page_height, None);
        let score_page = self.boxes.create(
            BoxKind::ScorePage,
            Point {
                x: self.config.margin_left,
                y: self.config.margin_top,
            },
            self.config.page_width - self.config.margin_left - self.config.margin_right,
            available_height,
            Some(page),
        );

        let mut cursor_y = 0.0_f32;
        let mut added_any = false;

        while self.next_system < self.system_ranges.len() {
            if cursor_y + self.config.system_height > available_height {
                if !added_any {
                    log::warn!(
                        "page cannot hold a single system: available={available_height}, required={}",
                        self.config.system_height
                    );
                    return Err(LayoutError::PageTooSmall {
                        available: available_height,
                        required: self.config.system_height,
                    });
                }
                break;
            }

            let (first, last) = self.system_ranges[self.next_system];
            log::debug!("laying out system {} (columns {first}..={last})", self.next_system);
            let system_box = self.boxes.create(
                BoxKind::System,
                Point { x: 0.0, y: cursor_y },
                self.target_system_width() + self.config.margin_left + self.config.margin_right,
                self.config.system_height,
                Some(score_page),
            );

            let layouter = SystemLayouter::new(
                self.target_system_width() + self.config.system_indent,
                self.config.system_indent,
                0.0,
                0.0,
            );
            let placed = layouter.layout_columns(&self.columns[first..=last]);
            for (offset, p) in placed.iter().enumerate() {
                let column_index = first + offset;
                // One Slice box per column, positioned at its placed x;
                // one SliceInstr box per slice for this crate's single
                // representative-staff column model (spec §3 containment:
                // System ⊃ Slice ⊃ SliceInstr).
                let slice_box = self.boxes.create(
                    BoxKind::Slice,
                    Point { x: p.start_x, y: 0.0 },
                    p.justified_width,
                    self.config.system_height,
                    Some(system_box),
                );
                let instr_box = self.boxes.create(
                    BoxKind::SliceInstr,
                    Point { x: 0.0, y: 0.0 },
                    p.justified_width,
                    self.config.system_height,
                    Some(slice_box),
                );
                for shape in std::mem::take(&mut self.column_shapes[column_index]) {
                    self.boxes.attach_shape(instr_box, shape);
                }
            }

            cursor_y += self.config.system_height + self.config.system_gap;
            added_any = true;
            self.next_system += 1;
        }

        Ok(PageLayoutResult {
            page_box: page,
            layout_is_finished: self.is_finished(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::note::Note;
    use crate::domain::value_objects::{Pitch, Tick};

    fn sample_score() -> Score {
        let mut score = Score::new();
        for i in 0..8 {
            let note = Note::new(Tick::new(i * 960), 960, Pitch::new(60 + (i % 5) as u8).unwrap()).unwrap();
            score.instruments[0].staves[0].voices[0].add_note(note).unwrap();
        }
        score
    }

    #[test]
    fn prolog_width_is_100_tenths() {
        // Open question #2 (spec §9): pinned to the literal "ten tenths ×
        // ten" reading rather than computing real clef/key/time geometry.
        assert_eq!(PROLOG_WIDTH_TENTHS, 100.0);
        let meter = ScoreMeter::new(20.0);
        assert_eq!(meter.tenths_to_logical(PROLOG_WIDTH_TENTHS, 0, 0), 200.0);
    }

    #[test]
    fn layout_in_box_errors_when_page_cannot_hold_a_single_system() {
        let score = sample_score();
        let meter = ScoreMeter::new(20.0);
        let mut config = ScoreLayoutConfig::default();
        config.page_height = 100.0; // smaller than system_height
        let mut layouter = ScoreLayouter::prepare_to_start_layout(&score, &meter, config);
        let result = layouter.layout_in_box();
        assert!(matches!(result, Err(LayoutError::PageTooSmall { .. })));
    }

    #[test]
    fn committed_page_carries_real_engraved_shapes_not_placeholders() {
        let score = sample_score();
        let meter = ScoreMeter::new(20.0);
        let config = ScoreLayoutConfig::default();
        let mut layouter = ScoreLayouter::prepare_to_start_layout(&score, &meter, config);
        let page = layouter.layout_in_box().unwrap().page_box;

        let shapes = layouter.boxes().collect_shapes_absolute(page);
        assert!(!shapes.is_empty());
        assert!(
            shapes.iter().any(|(_, s)| matches!(s, Shape::Glyph(..))),
            "expected at least one engraved glyph shape to reach the committed box tree"
        );
    }

    #[test]
    fn layout_in_box_eventually_finishes() {
        let score = sample_score();
        let meter = ScoreMeter::new(20.0);
        let config = ScoreLayoutConfig::default();
        let mut layouter = ScoreLayouter::prepare_to_start_layout(&score, &meter, config);

        let mut pages = 0;
        loop {
            let result = layouter.layout_in_box().expect("page fits");
            pages += 1;
            if result.layout_is_finished || pages > 50 {
                break;
            }
        }
        assert!(layouter.is_finished());
    }

    #[test]
    fn identical_scores_produce_identical_system_placements() {
        // Property 1 (spec §8): determinism.
        let score_a = sample_score();
        let score_b = sample_score();
        let meter = ScoreMeter::new(20.0);
        let config = ScoreLayoutConfig::default();

        let mut layouter_a = ScoreLayouter::prepare_to_start_layout(&score_a, &meter, config);
        let mut layouter_b = ScoreLayouter::prepare_to_start_layout(&score_b, &meter, config);
        let page_a = layouter_a.layout_in_box().unwrap().page_box;
        let page_b = layouter_b.layout_in_box().unwrap().page_box;

        let shapes_a = layouter_a.boxes().collect_shapes_absolute(page_a);
        let shapes_b = layouter_b.boxes().collect_shapes_absolute(page_b);
        assert_eq!(shapes_a.len(), shapes_b.len());
        for ((pa, sa), (pb, sb)) in shapes_a.iter().zip(shapes_b.iter()) {
            assert_eq!(pa.x, pb.x);
            assert_eq!(pa.y, pb.y);
            assert_eq!(sa.width(), sb.width());
        }
    }
}

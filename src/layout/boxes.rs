//! Box hierarchy: `DocPage ⊃ ScorePage ⊃ System ⊃ Slice ⊃ SliceInstr`.
//!
//! Per spec §9, cyclic references (a shape knows its box, a box lists its
//! shapes) are realized as exclusive ownership from parent to child plus a
//! *weak back-reference* — here, a plain index into a central arena rather
//! than `Rc<RefCell<_>>`. Moving a box translates all of its descendants.

use crate::layout::types::{Point, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    DocPage,
    ScorePage,
    System,
    Slice,
    SliceInstr,
}

#[derive(Debug, Clone)]
pub struct LayoutBox {
    pub kind: BoxKind,
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    pub parent: Option<BoxId>,
    pub children: Vec<BoxId>,
    pub shapes: Vec<Shape>,
}

/// Owns every box and shape in a layout pass. Boxes are never shared or
/// reference-counted; the storage is the single owner and every reference
/// to a box elsewhere in the engine is a `BoxId` index, cleared (made
/// meaningless) once the storage itself is dropped.
#[derive(Debug, Clone, Default)]
pub struct BoxStorage {
    boxes: Vec<LayoutBox>,
}

impl BoxStorage {
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    pub fn create(
        &mut self,
        kind: BoxKind,
        origin: Point,
        width: f32,
        height: f32,
        parent: Option<BoxId>,
    ) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(LayoutBox {
            kind,
            origin,
            width,
            height,
            parent,
            children: Vec::new(),
            shapes: Vec::new(),
        });
        if let Some(parent_id) = parent {
            self.boxes[parent_id.0].children.push(id);
        }
        id
    }

    pub fn get(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }

    pub fn get_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }

    /// Attach a shape to a box. Per spec §3, a shape is attached to exactly
    /// one box, and ownership passes to the box at this point.
    pub fn attach_shape(&mut self, id: BoxId, shape: Shape) {
        self.boxes[id.0].shapes.push(shape);
    }

    /// Translate a box and every descendant box by `(dx, dy)`. Shapes are
    /// logical-unit-relative to their owning box's origin in this model, so
    /// only box origins need updating; no shape coordinates are touched.
    pub fn translate(&mut self, id: BoxId, dx: f32, dy: f32) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let b = &mut self.boxes[current.0];
            b.origin.x += dx;
            b.origin.y += dy;
            stack.extend(b.children.iter().copied());
        }
    }

    /// All shapes attached anywhere under `id`, with their absolute
    /// (page-relative) origin already applied — used when flattening the
    /// committed tree into the final render output.
    pub fn collect_shapes_absolute(&self, id: BoxId) -> Vec<(Point, &Shape)> {
        let mut out = Vec::new();
        self.collect_into(id, Point { x: 0.0, y: 0.0 }, &mut out);
        out
    }

    fn collect_into<'a>(&'a self, id: BoxId, parent_abs: Point, out: &mut Vec<(Point, &'a Shape)>) {
        let b = &self.boxes[id.0];
        let abs = Point {
            x: parent_abs.x + b.origin.x,
            y: parent_abs.y + b.origin.y,
        };
        for shape in &b.shapes {
            let shape_origin = shape.header().origin;
            let shape_abs = Point {
                x: abs.x + shape_origin.x,
                y: abs.y + shape_origin.y,
            };
            out.push((shape_abs, shape));
        }
        for child in &b.children {
            self.collect_into(*child, abs, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::{Color, Shape, ShapeHeader, ZLayer};

    #[test]
    fn translating_a_box_moves_its_descendants() {
        let mut storage = BoxStorage::new();
        let page = storage.create(BoxKind::DocPage, Point { x: 0.0, y: 0.0 }, 1000.0, 1000.0, None);
        let system = storage.create(BoxKind::System, Point { x: 10.0, y: 20.0 }, 800.0, 100.0, Some(page));

        storage.translate(page, 5.0, 5.0);

        assert_eq!(storage.get(page).origin.x, 5.0);
        assert_eq!(storage.get(system).origin.x, 15.0);
        assert_eq!(storage.get(system).origin.y, 25.0);
    }

    #[test]
    fn shapes_are_collected_with_absolute_origin() {
        let mut storage = BoxStorage::new();
        let page = storage.create(BoxKind::DocPage, Point { x: 0.0, y: 0.0 }, 1000.0, 1000.0, None);
        let system = storage.create(BoxKind::System, Point { x: 10.0, y: 20.0 }, 800.0, 100.0, Some(page));
        let header = ShapeHeader {
            origin: Point { x: 1.0, y: 1.0 },
            width: 1.0,
            height: 1.0,
            color: Color::BLACK,
            z_layer: ZLayer::Notes,
        };
        storage.attach_shape(system, Shape::Invisible(header));

        // Absolute position combines the box chain's origin with the
        // shape's own box-relative origin (box origin 10,20 + shape-local
        // 1,1).
        let collected = storage.collect_shapes_absolute(page);
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].0.x, 11.0);
        assert_eq!(collected[0].0.y, 21.0);
    }

    #[test]
    fn two_shapes_in_the_same_box_keep_distinct_absolute_positions() {
        let mut storage = BoxStorage::new();
        let page = storage.create(BoxKind::DocPage, Point { x: 0.0, y: 0.0 }, 1000.0, 1000.0, None);
        let system = storage.create(BoxKind::System, Point { x: 0.0, y: 0.0 }, 800.0, 100.0, Some(page));
        let shape_at = |x: f32| {
            Shape::Invisible(ShapeHeader {
                origin: Point { x, y: 0.0 },
                width: 5.0,
                height: 5.0,
                color: Color::BLACK,
                z_layer: ZLayer::Notes,
            })
        };
        storage.attach_shape(system, shape_at(0.0));
        storage.attach_shape(system, shape_at(50.0));

        let collected = storage.collect_shapes_absolute(page);
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0].0.x, 0.0);
        assert_eq!(collected[1].0.x, 50.0);
    }
}

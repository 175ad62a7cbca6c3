//! The base image plus its ordered signature placements

use super::geometry::{Position, Size};
use super::placement::{ImageRef, PlacementId, SignaturePlacement};

/// Base image and signatures, in paste order
#[derive(Clone, Debug, Default)]
pub struct Composition {
    base: Option<ImageRef>,
    placements: Vec<SignaturePlacement>,
    next_id: u64,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_image(&self) -> Option<&ImageRef> {
        self.base.as_ref()
    }

    /// Replace the base image; existing placements are kept
    pub fn set_base_image(&mut self, image: ImageRef) {
        self.base = Some(image);
    }

    /// Whether the composition has everything needed to render
    pub fn can_save(&self) -> bool {
        self.base.is_some()
    }

    /// Append a signature at the origin and return its id
    pub fn add_signature(&mut self, image: ImageRef, size: Size) -> PlacementId {
        let id = PlacementId(self.next_id);
        self.next_id += 1;
        self.placements.push(SignaturePlacement {
            id,
            image,
            position: Position::ORIGIN,
            size,
        });
        id
    }

    /// Placements in insertion (paste) order
    pub fn placements(&self) -> &[SignaturePlacement] {
        &self.placements
    }

    pub fn placement(&self, id: PlacementId) -> Option<&SignaturePlacement> {
        self.placements.iter().find(|p| p.id == id)
    }

    /// Move one placement. Returns false if `id` is unknown.
    pub fn move_placement(&mut self, id: PlacementId, position: Position) -> bool {
        match self.placements.iter_mut().find(|p| p.id == id) {
            Some(placement) => {
                placement.position = position;
                true
            }
            None => false,
        }
    }

    /// Topmost placement whose rectangle contains `point`
    pub fn hit_test(&self, point: Position) -> Option<PlacementId> {
        self.placements
            .iter()
            .rev()
            .find(|p| p.contains(point))
            .map(|p| p.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SIGNATURE_SIZE;

    fn sig(name: &str) -> ImageRef {
        ImageRef::new(format!("/tmp/{name}.png"))
    }

    #[test]
    fn test_empty_composition_cannot_save() {
        let mut composition = Composition::new();
        assert!(!composition.can_save());
        composition.add_signature(sig("a"), SIGNATURE_SIZE);
        assert!(!composition.can_save());
        composition.set_base_image(ImageRef::new("/tmp/base.png"));
        assert!(composition.can_save());
    }

    #[test]
    fn test_add_signature_appends_at_origin() {
        let mut composition = Composition::new();
        let a = composition.add_signature(sig("a"), SIGNATURE_SIZE);
        let b = composition.add_signature(sig("b"), SIGNATURE_SIZE);
        assert_ne!(a, b);

        let placements = composition.placements();
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[0].id, a);
        assert_eq!(placements[1].id, b);
        assert!(placements.iter().all(|p| p.position == Position::ORIGIN));
        assert!(placements.iter().all(|p| p.size == SIGNATURE_SIZE));
    }

    #[test]
    fn test_move_only_touches_target() {
        let mut composition = Composition::new();
        let a = composition.add_signature(sig("a"), SIGNATURE_SIZE);
        let b = composition.add_signature(sig("b"), SIGNATURE_SIZE);

        assert!(composition.move_placement(b, Position::new(40, 70)));
        assert_eq!(composition.placement(a).unwrap().position, Position::ORIGIN);
        assert_eq!(
            composition.placement(b).unwrap().position,
            Position::new(40, 70)
        );
    }

    #[test]
    fn test_move_unknown_id() {
        let mut composition = Composition::new();
        composition.add_signature(sig("a"), SIGNATURE_SIZE);
        assert!(!composition.move_placement(PlacementId(99), Position::new(1, 1)));
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut composition = Composition::new();
        let a = composition.add_signature(sig("a"), SIGNATURE_SIZE);
        let b = composition.add_signature(sig("b"), SIGNATURE_SIZE);
        composition.move_placement(b, Position::new(50, 25));

        // Overlap region belongs to the later placement
        assert_eq!(composition.hit_test(Position::new(60, 30)), Some(b));
        // Only `a` covers this point
        assert_eq!(composition.hit_test(Position::new(10, 10)), Some(a));
        // Nothing here
        assert_eq!(composition.hit_test(Position::new(500, 500)), None);
    }
}

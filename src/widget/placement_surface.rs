//! PlacementSurface widget for showing and dragging signatures
//!
//! This widget handles:
//! - Rendering the base image at native scale, anchored top-left
//! - Rendering every signature at its placement rectangle
//! - Mouse and touch events, translated to base-image pixel coordinates
//!
//! One logical pixel on screen is one pixel of the output image, so
//! placement positions can be written to the output unchanged.

use std::collections::HashMap;

use cosmic::{
    Element,
    iced::{Color, Limits, mouse, touch},
    iced_core::{
        Background, Border, Clipboard, Layout, Length, Point, Rectangle, Shadow, Shell, Size,
        event,
        layout::Node,
        renderer::{Quad, Style},
        widget::{
            Tree,
            tree::{self, State},
        },
    },
    widget::Widget,
};

use crate::domain::{Composition, PlacementId, Position, Rect};
use crate::render::preview::PreviewImage;
use crate::session::messages::PointerEvent;

/// Surface shown when no base image is loaded yet
const EMPTY_SURFACE: Size = Size {
    width: 480.0,
    height: 320.0,
};

/// PlacementSurface widget
pub struct PlacementSurface<'a, Msg> {
    composition: &'a Composition,
    base: Option<&'a PreviewImage>,
    signatures: &'a HashMap<PlacementId, PreviewImage>,
    /// Placement currently under pointer capture
    dragging: Option<PlacementId>,
    on_pointer: Box<dyn Fn(PointerEvent) -> Msg + 'a>,
}

impl<'a, Msg> PlacementSurface<'a, Msg> {
    pub fn new(
        composition: &'a Composition,
        base: Option<&'a PreviewImage>,
        signatures: &'a HashMap<PlacementId, PreviewImage>,
        on_pointer: impl Fn(PointerEvent) -> Msg + 'a,
    ) -> Self {
        Self {
            composition,
            base,
            signatures,
            dragging: None,
            on_pointer: Box::new(on_pointer),
        }
    }

    /// Mark the placement that is being dragged
    pub fn dragging(mut self, dragging: Option<PlacementId>) -> Self {
        self.dragging = dragging;
        self
    }

    fn surface_size(&self) -> Size {
        match self.base {
            Some(base) => Size::new(base.rgba.width() as f32, base.rgba.height() as f32),
            None => EMPTY_SURFACE,
        }
    }
}

/// Pointer input normalised across mouse (no finger) and touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Press(Option<touch::Finger>),
    Move(Option<touch::Finger>),
    Release(Option<touch::Finger>),
}

/// What the surface does with one input
#[derive(Debug, PartialEq, Eq)]
struct Routed {
    publish: Option<PointerEvent>,
    status: event::Status,
}

impl Routed {
    const IGNORED: Routed = Routed {
        publish: None,
        status: event::Status::Ignored,
    };
}

/// Decide how the surface answers `input` at `point` (image space).
///
/// A press is captured only when it hits a placement inside the surface.
/// Moves and releases are only seen from the pointer that pressed. A move
/// is captured only while it stays over the dragged placement; moves
/// elsewhere are still published so the session can ignore them.
fn route(
    input: Input,
    pressed: &mut Option<Option<touch::Finger>>,
    point: Position,
    in_bounds: bool,
    composition: &Composition,
    dragging: Option<PlacementId>,
) -> Routed {
    match input {
        Input::Press(finger) => {
            if !in_bounds || composition.hit_test(point).is_none() {
                return Routed::IGNORED;
            }
            *pressed = Some(finger);
            Routed {
                publish: Some(PointerEvent::Pressed(point)),
                status: event::Status::Captured,
            }
        }
        Input::Move(finger) => {
            if *pressed != Some(finger) {
                return Routed::IGNORED;
            }
            let over_captured = dragging
                .and_then(|id| composition.placement(id))
                .is_some_and(|p| p.contains(point));
            Routed {
                publish: Some(PointerEvent::Moved(point)),
                status: if over_captured {
                    event::Status::Captured
                } else {
                    event::Status::Ignored
                },
            }
        }
        Input::Release(finger) => {
            if *pressed != Some(finger) {
                return Routed::IGNORED;
            }
            *pressed = None;
            Routed {
                publish: Some(PointerEvent::Released),
                status: event::Status::Captured,
            }
        }
    }
}

/// Convert an absolute window point into base-image pixel coordinates
fn to_image_space(point: Point, bounds: Rectangle) -> Position {
    Position::new(
        (point.x - bounds.x).floor() as i32,
        (point.y - bounds.y).floor() as i32,
    )
}

/// Convert a placement rectangle into absolute window coordinates
fn to_screen(rect: Rect, bounds: Rectangle) -> Rectangle {
    Rectangle {
        x: bounds.x + rect.left as f32,
        y: bounds.y + rect.top as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

impl<'a, Msg: Clone + 'static> Widget<Msg, cosmic::Theme, cosmic::Renderer>
    for PlacementSurface<'a, Msg>
{
    fn size(&self) -> Size<Length> {
        let size = self.surface_size();
        Size::new(Length::Fixed(size.width), Length::Fixed(size.height))
    }

    fn state(&self) -> tree::State {
        State::new(SurfaceState::default())
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<SurfaceState>()
    }

    fn layout(&self, _tree: &mut Tree, _renderer: &cosmic::Renderer, limits: &Limits) -> Node {
        let size = self.surface_size();
        let limits = limits
            .width(Length::Fixed(size.width))
            .height(Length::Fixed(size.height));
        Node::new(limits.resolve(
            Length::Fixed(size.width),
            Length::Fixed(size.height),
            size,
        ))
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut cosmic::Renderer,
        theme: &cosmic::Theme,
        _style: &Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        use cosmic::iced_core::Renderer as _;

        let cosmic_theme = theme.cosmic();
        let accent = Color::from(cosmic_theme.accent_color());
        let bounds = layout.bounds();
        let hovered = cursor
            .position()
            .filter(|pos| bounds.contains(*pos))
            .and_then(|pos| self.composition.hit_test(to_image_space(pos, bounds)));

        renderer.with_layer(bounds, |renderer| {
            match self.base {
                Some(base) => {
                    cosmic::iced_core::image::Renderer::draw_image(
                        renderer,
                        base.handle.clone(),
                        cosmic::iced_core::image::FilterMethod::Nearest,
                        bounds,
                        cosmic::iced::Radians(0.0),
                        1.0,
                        [0.0, 0.0, 0.0, 0.0],
                    );
                }
                None => {
                    let mut border = accent;
                    border.a = 0.4;
                    renderer.fill_quad(
                        Quad {
                            bounds,
                            border: Border {
                                color: border,
                                width: 1.0,
                                radius: cosmic_theme.radius_s().into(),
                            },
                            shadow: Shadow::default(),
                        },
                        Background::Color(Color::from_rgba(0.5, 0.5, 0.5, 0.15)),
                    );
                }
            }

            // Insertion order, so later signatures are drawn on top
            for placement in self.composition.placements() {
                let rect = to_screen(placement.rect(), bounds);

                match self.signatures.get(&placement.id) {
                    Some(preview) => {
                        cosmic::iced_core::image::Renderer::draw_image(
                            renderer,
                            preview.handle.clone(),
                            cosmic::iced_core::image::FilterMethod::Linear,
                            rect,
                            cosmic::iced::Radians(0.0),
                            1.0,
                            [0.0, 0.0, 0.0, 0.0],
                        );
                    }
                    None => {
                        let mut fill = accent;
                        fill.a = 0.2;
                        renderer.fill_quad(
                            Quad {
                                bounds: rect,
                                border: Border::default(),
                                shadow: Shadow::default(),
                            },
                            Background::Color(fill),
                        );
                    }
                }

                let active = self.dragging == Some(placement.id);
                if active || hovered == Some(placement.id) {
                    let mut outline = accent;
                    if !active {
                        outline.a = 0.6;
                    }
                    renderer.fill_quad(
                        Quad {
                            bounds: rect,
                            border: Border {
                                color: outline,
                                width: if active { 2.0 } else { 1.0 },
                                radius: 0.0.into(),
                            },
                            shadow: Shadow::default(),
                        },
                        Background::Color(Color::TRANSPARENT),
                    );
                }
            }
        });
    }

    fn mouse_interaction(
        &self,
        _state: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &cosmic::Renderer,
    ) -> mouse::Interaction {
        if self.dragging.is_some() {
            return mouse::Interaction::Grabbing;
        }

        let bounds = layout.bounds();
        if let Some(pos) = cursor.position()
            && bounds.contains(pos)
            && self.composition.hit_test(to_image_space(pos, bounds)).is_some()
        {
            return mouse::Interaction::Grab;
        }

        mouse::Interaction::default()
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: cosmic::iced_core::Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &cosmic::Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Msg>,
        _viewport: &Rectangle,
    ) -> event::Status {
        let state = tree.state.downcast_mut::<SurfaceState>();
        let bounds = layout.bounds();

        let (input, pointer) = match event {
            cosmic::iced_core::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                match cursor.position() {
                    Some(pos) => (Input::Press(None), pos),
                    None => return event::Status::Ignored,
                }
            }
            cosmic::iced_core::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                (Input::Move(None), position)
            }
            cosmic::iced_core::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                (Input::Release(None), cursor.position().unwrap_or_default())
            }
            cosmic::iced_core::Event::Touch(touch::Event::FingerPressed { id, position }) => {
                (Input::Press(Some(id)), position)
            }
            cosmic::iced_core::Event::Touch(touch::Event::FingerMoved { id, position }) => {
                (Input::Move(Some(id)), position)
            }
            cosmic::iced_core::Event::Touch(
                touch::Event::FingerLifted { id, position } | touch::Event::FingerLost { id, position },
            ) => (Input::Release(Some(id)), position),
            _ => return event::Status::Ignored,
        };

        let routed = route(
            input,
            &mut state.pressed,
            to_image_space(pointer, bounds),
            bounds.contains(pointer),
            self.composition,
            self.dragging,
        );
        if let Some(event) = routed.publish {
            shell.publish((self.on_pointer)(event));
        }
        routed.status
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SurfaceState {
    /// Set while a press that hit a signature is held; holds the finger for touch input
    pub pressed: Option<Option<touch::Finger>>,
}

impl<'a, Message> From<PlacementSurface<'a, Message>> for Element<'a, Message>
where
    Message: 'static + Clone,
{
    fn from(w: PlacementSurface<'a, Message>) -> Element<'a, Message> {
        Element::new(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ImageRef, SIGNATURE_SIZE, Size as PixelSize};

    fn composition() -> (Composition, PlacementId) {
        let mut composition = Composition::new();
        let id = composition.add_signature(ImageRef::new("/tmp/a.png"), SIGNATURE_SIZE);
        composition.move_placement(id, Position::new(50, 50));
        (composition, id)
    }

    #[test]
    fn test_press_missing_every_placement_passes_through() {
        let (composition, _) = composition();
        let mut pressed = None;
        let routed = route(
            Input::Press(None),
            &mut pressed,
            Position::new(10, 10),
            true,
            &composition,
            None,
        );
        assert_eq!(routed, Routed::IGNORED);
        assert_eq!(pressed, None);

        // Hits a placement, but outside the widget bounds
        let routed = route(
            Input::Press(None),
            &mut pressed,
            Position::new(60, 60),
            false,
            &composition,
            None,
        );
        assert_eq!(routed, Routed::IGNORED);
        assert_eq!(pressed, None);
    }

    #[test]
    fn test_press_on_placement_is_captured() {
        let (composition, _) = composition();
        let finger = Some(touch::Finger(3));
        let mut pressed = None;
        let routed = route(
            Input::Press(finger),
            &mut pressed,
            Position::new(60, 60),
            true,
            &composition,
            None,
        );
        assert_eq!(routed.status, event::Status::Captured);
        assert_eq!(routed.publish, Some(PointerEvent::Pressed(Position::new(60, 60))));
        assert_eq!(pressed, Some(finger));
    }

    #[test]
    fn test_unpressed_pointer_is_ignored() {
        let (composition, id) = composition();
        let point = Position::new(60, 60);

        // Nothing pressed yet
        let mut pressed = None;
        for input in [Input::Move(None), Input::Release(None)] {
            let routed = route(input, &mut pressed, point, true, &composition, Some(id));
            assert_eq!(routed, Routed::IGNORED);
        }

        // Another finger than the one holding the press
        let mut pressed = Some(Some(touch::Finger(1)));
        let other = Some(touch::Finger(2));
        for input in [Input::Move(other), Input::Release(other), Input::Move(None)] {
            let routed = route(input, &mut pressed, point, true, &composition, Some(id));
            assert_eq!(routed, Routed::IGNORED);
        }
        assert_eq!(pressed, Some(Some(touch::Finger(1))));
    }

    #[test]
    fn test_move_captured_only_over_dragged_placement() {
        let (composition, id) = composition();
        let mut pressed = Some(None);

        let inside = route(
            Input::Move(None),
            &mut pressed,
            Position::new(70, 60),
            true,
            &composition,
            Some(id),
        );
        assert_eq!(inside.status, event::Status::Captured);

        let outside = route(
            Input::Move(None),
            &mut pressed,
            Position::new(5, 5),
            true,
            &composition,
            Some(id),
        );
        assert_eq!(outside.status, event::Status::Ignored);
        assert_eq!(outside.publish, Some(PointerEvent::Moved(Position::new(5, 5))));

        let released = route(
            Input::Release(None),
            &mut pressed,
            Position::new(5, 5),
            true,
            &composition,
            Some(id),
        );
        assert_eq!(released.publish, Some(PointerEvent::Released));
        assert_eq!(pressed, None);
    }

    #[test]
    fn test_to_image_space_is_relative_to_bounds() {
        let bounds = Rectangle {
            x: 12.0,
            y: 40.0,
            width: 300.0,
            height: 200.0,
        };
        assert_eq!(to_image_space(Point::new(12.0, 40.0), bounds), Position::ORIGIN);
        assert_eq!(
            to_image_space(Point::new(62.7, 90.2), bounds),
            Position::new(50, 50)
        );
        // Left of the surface maps to negative coordinates
        assert_eq!(
            to_image_space(Point::new(2.0, 40.0), bounds),
            Position::new(-10, 0)
        );
    }

    #[test]
    fn test_to_screen_round_trips_origin() {
        let bounds = Rectangle {
            x: 5.0,
            y: 7.0,
            width: 300.0,
            height: 200.0,
        };
        let rect = Rect::from_origin_size(Position::new(20, 30), PixelSize::new(100, 50));
        let screen = to_screen(rect, bounds);
        assert_eq!(screen.x, 25.0);
        assert_eq!(screen.y, 37.0);
        assert_eq!(screen.width, 100.0);
        assert_eq!(screen.height, 50.0);
        assert_eq!(
            to_image_space(Point::new(screen.x, screen.y), bounds),
            Position::new(20, 30)
        );
    }
}

//! Session message handlers
//!
//! Every user action lands here. Failures are logged and reported through
//! the status line; none of them end the session.

use std::path::Path;

use crate::domain::ImageRef;
use crate::fl;
use crate::render::{RenderError, render};
use crate::render::preview::PreviewImage;
use crate::session::messages::{BrowserMsg, Msg, PointerEvent};
use crate::session::state::{SessionState, Status};

/// Apply one message to the session
pub fn handle_msg(state: &mut SessionState, msg: Msg) {
    match msg {
        Msg::OpenBaseImage => open_base_image(state),
        Msg::AddSignature => add_signature(state),
        Msg::SaveImage => save_image(state),
        Msg::ToggleFileChooser => state.browser.toggle_visible(),
        Msg::Browser(msg) => handle_browser(state, msg),
        Msg::Pointer(event) => handle_pointer(state, event),
    }
}

// ============================================================================
// Toolbar actions
// ============================================================================

fn selected_image(state: &mut SessionState) -> Option<ImageRef> {
    let selected = state.browser.selection().map(ImageRef::from);
    if selected.is_none() {
        state.status = Status::Info(fl!("status-no-selection"));
    }
    selected
}

fn report_load_error(state: &mut SessionState, image: &ImageRef, err: &RenderError) {
    log::error!("Error loading image {}: {}", image, err);
    let error = match err {
        RenderError::ImageLoad { source, .. } => source.to_string(),
        other => other.to_string(),
    };
    state.status = Status::Error(fl!(
        "status-load-failed",
        name = image.display_name(),
        error = error
    ));
}

fn open_base_image(state: &mut SessionState) {
    let Some(image) = selected_image(state) else {
        return;
    };

    match PreviewImage::load(&image) {
        Ok(preview) => {
            log::info!("Base image loaded: {}", image);
            state.browser.hide();
            state.status = Status::Info(fl!("status-base-loaded", name = image.display_name()));
            state.composition.set_base_image(image);
            state.base_preview = Some(preview);
        }
        Err(err) => report_load_error(state, &image, &err),
    }
}

fn add_signature(state: &mut SessionState) {
    let Some(image) = selected_image(state) else {
        return;
    };

    let size = state.config.signature_size();
    match PreviewImage::load_fitted(&image, size) {
        Ok(preview) => {
            log::info!("Signature image added: {}", image);
            state.status = Status::Info(fl!("status-signature-added", name = image.display_name()));
            let id = state.composition.add_signature(image, size);
            state.signature_previews.insert(id, preview);
        }
        Err(err) => report_load_error(state, &image, &err),
    }
}

fn save_image(state: &mut SessionState) {
    if !state.can_save() {
        log::debug!("Save requested without a base image, ignoring");
        return;
    }

    match render(&state.composition, &state.output_path) {
        Ok(path) => {
            state.status = Status::Info(fl!("status-saved", path = path.display().to_string()));
        }
        Err(err) => {
            log::error!("Error saving image: {}", err);
            state.status = Status::Error(fl!("status-save-failed", error = err.to_string()));
        }
    }
}

// ============================================================================
// File browser
// ============================================================================

fn handle_browser(state: &mut SessionState, msg: BrowserMsg) {
    let result = match msg {
        BrowserMsg::Enter(dir) => state.browser.enter(dir),
        BrowserMsg::Select(path) => state.browser.select(&path),
        BrowserMsg::GoUp => state.browser.go_up().map(|_| ()),
        BrowserMsg::Refresh => state.browser.refresh(),
    };

    if let Err(err) = result {
        log::warn!("File browser: {}", err);
        state.status = Status::Error(fl!("status-browse-failed", error = err.to_string()));
    }
}

// ============================================================================
// Placement surface
// ============================================================================

fn handle_pointer(state: &mut SessionState, event: PointerEvent) {
    match event {
        PointerEvent::Pressed(point) => {
            if state.drag.pointer_down(&state.composition, point) {
                log::debug!("Captured placement {:?} at {:?}", state.drag.captured(), point);
            }
        }
        PointerEvent::Moved(point) => {
            let canvas = state.canvas_size();
            state.drag.pointer_move(&mut state.composition, point, canvas);
        }
        PointerEvent::Released => {
            if let Some(id) = state.drag.captured()
                && let Some(placement) = state.composition.placement(id)
            {
                log::debug!("Placement {:?} dropped at {:?}", id, placement.position);
            }
            state.drag.pointer_up();
        }
    }
}

/// Whether a file path is currently selected in the browser
pub fn has_selection(state: &SessionState) -> bool {
    state.browser.selection().is_some_and(Path::is_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BrowserOptions, FileBrowser};
    use crate::config::SigstampConfig;
    use crate::domain::Position;
    use image::{Rgba, RgbaImage};

    struct Fixture {
        dir: tempfile::TempDir,
        state: SessionState,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            RgbaImage::from_pixel(300, 200, Rgba([255, 255, 255, 255]))
                .save(dir.path().join("base.png"))
                .unwrap();
            RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]))
                .save(dir.path().join("sig.png"))
                .unwrap();
            std::fs::write(dir.path().join("broken.png"), b"garbage").unwrap();

            let browser = FileBrowser::open(dir.path(), BrowserOptions::default()).unwrap();
            let mut state = SessionState::new(SigstampConfig::default(), browser);
            state.output_path = dir.path().join("out").join("final.png");
            Self { dir, state }
        }

        fn select(&mut self, name: &str) {
            let path = self.dir.path().join(name);
            handle_msg(&mut self.state, Msg::select(path));
        }
    }

    #[test]
    fn test_actions_without_selection_do_nothing() {
        let mut fx = Fixture::new();
        handle_msg(&mut fx.state, Msg::OpenBaseImage);
        handle_msg(&mut fx.state, Msg::AddSignature);
        assert!(fx.state.composition.base_image().is_none());
        assert!(fx.state.composition.placements().is_empty());
        assert!(!fx.state.status.is_error());
    }

    #[test]
    fn test_open_base_hides_browser_and_enables_save() {
        let mut fx = Fixture::new();
        assert!(!fx.state.can_save());
        fx.select("base.png");
        handle_msg(&mut fx.state, Msg::OpenBaseImage);

        assert!(fx.state.can_save());
        assert!(!fx.state.browser.is_visible());
        assert_eq!(
            fx.state.composition.base_image().map(|i| i.path().to_path_buf()),
            Some(fx.dir.path().join("base.png"))
        );
        assert_eq!(fx.state.canvas_size().map(|s| (s.width, s.height)), Some((300, 200)));
    }

    #[test]
    fn test_open_undecodable_base_keeps_state() {
        let mut fx = Fixture::new();
        fx.select("broken.png");
        handle_msg(&mut fx.state, Msg::OpenBaseImage);

        assert!(fx.state.status.is_error());
        assert!(!fx.state.can_save());
        assert!(fx.state.browser.is_visible());
    }

    #[test]
    fn test_add_signature_keeps_browser_open() {
        let mut fx = Fixture::new();
        fx.select("sig.png");
        handle_msg(&mut fx.state, Msg::AddSignature);
        handle_msg(&mut fx.state, Msg::AddSignature);

        let placements = fx.state.composition.placements();
        assert_eq!(placements.len(), 2);
        assert!(placements.iter().all(|p| p.position == Position::ORIGIN));
        assert_eq!(fx.state.signature_previews.len(), 2);
        let preview = &fx.state.signature_previews[&placements[0].id];
        assert_eq!(preview.rgba.dimensions(), (100, 50));
        assert!(fx.state.browser.is_visible());
    }

    #[test]
    fn test_add_undecodable_signature_is_rejected() {
        let mut fx = Fixture::new();
        fx.select("broken.png");
        handle_msg(&mut fx.state, Msg::AddSignature);
        assert!(fx.state.composition.placements().is_empty());
        assert!(fx.state.status.is_error());
    }

    #[test]
    fn test_save_without_base_is_noop() {
        let mut fx = Fixture::new();
        fx.select("sig.png");
        handle_msg(&mut fx.state, Msg::AddSignature);
        handle_msg(&mut fx.state, Msg::SaveImage);
        assert!(!fx.state.output_path.exists());
    }

    #[test]
    fn test_drag_then_save() {
        let mut fx = Fixture::new();
        fx.select("base.png");
        handle_msg(&mut fx.state, Msg::OpenBaseImage);
        handle_msg(&mut fx.state, Msg::ToggleFileChooser);
        fx.select("sig.png");
        handle_msg(&mut fx.state, Msg::AddSignature);

        handle_msg(&mut fx.state, Msg::Pointer(PointerEvent::Pressed(Position::new(10, 10))));
        handle_msg(&mut fx.state, Msg::Pointer(PointerEvent::Moved(Position::new(60, 40))));
        handle_msg(&mut fx.state, Msg::Pointer(PointerEvent::Released));
        // Re-centred on the pointer: (60 - 50, 40 - 25)
        let placement = &fx.state.composition.placements()[0];
        assert_eq!(placement.position, Position::new(10, 15));

        handle_msg(&mut fx.state, Msg::SaveImage);
        assert!(!fx.state.status.is_error(), "{:?}", fx.state.status);
        let out = image::open(&fx.state.output_path).unwrap().to_rgba8();
        assert_eq!(out.dimensions(), (300, 200));
        let inside = out.get_pixel(75, 50);
        assert!(inside.0[..3].iter().all(|c| *c <= 2), "{:?}", inside);
        assert_eq!(*out.get_pixel(10, 10), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_browser_errors_are_reported() {
        let mut fx = Fixture::new();
        let missing = fx.dir.path().join("missing");
        handle_msg(&mut fx.state, Msg::enter(missing));
        assert!(fx.state.status.is_error());
        assert_eq!(fx.state.browser.dir(), fx.dir.path());
    }
}

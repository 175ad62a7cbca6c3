//! Header row with the session actions

use cosmic::Element;
use cosmic::iced::Length;
use cosmic::iced_widget::row;
use cosmic::widget::{button, tooltip};

use crate::fl;

/// Build the action row shown above the file browser and surface
pub fn build_toolbar<'a, Msg: Clone + 'static>(
    has_selection: bool,
    can_save: bool,
    browser_visible: bool,
    on_open_base: Msg,
    on_add_signature: Msg,
    on_save: Msg,
    on_toggle_browser: Msg,
    space_s: u16,
) -> Element<'a, Msg> {
    let btn_open = tooltip(
        button::standard(fl!("open-base-image"))
            .on_press_maybe(has_selection.then_some(on_open_base)),
        "Ctrl+O",
        tooltip::Position::Bottom,
    );

    let btn_add = tooltip(
        button::standard(fl!("add-signature"))
            .on_press_maybe(has_selection.then_some(on_add_signature)),
        "Ctrl+N",
        tooltip::Position::Bottom,
    );

    // Disabled until a base image is loaded
    let btn_save = tooltip(
        button::suggested(fl!("save-image")).on_press_maybe(can_save.then_some(on_save)),
        "Ctrl+S",
        tooltip::Position::Bottom,
    );

    let toggle_label = if browser_visible {
        fl!("hide-file-chooser")
    } else {
        fl!("show-file-chooser")
    };
    let btn_toggle = tooltip(
        button::text(toggle_label).on_press(on_toggle_browser),
        "F9",
        tooltip::Position::Bottom,
    );

    row![
        btn_open,
        btn_add,
        btn_save,
        cosmic::widget::horizontal_space(),
        btn_toggle
    ]
    .spacing(space_s)
    .align_y(cosmic::iced_core::Alignment::Center)
    .width(Length::Fill)
    .into()
}

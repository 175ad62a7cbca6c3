//! File browser panel

use std::path::PathBuf;

use cosmic::Element;
use cosmic::iced::Length;
use cosmic::iced_widget::{column, row};
use cosmic::widget::{button, container, icon, scrollable, text, tooltip};

use crate::browser::{Entry, FileBrowser};
use crate::fl;

const ROW_ICON_SIZE: u16 = 16;

fn entry_row<'a, Msg: Clone + 'static>(
    entry: &Entry,
    selected: bool,
    on_enter: &impl Fn(PathBuf) -> Msg,
    on_select: &impl Fn(PathBuf) -> Msg,
) -> Element<'a, Msg> {
    let icon_name = if entry.is_dir {
        "folder-symbolic"
    } else {
        "image-x-generic-symbolic"
    };
    let content = row![
        icon::Icon::from(icon::from_name(icon_name).size(ROW_ICON_SIZE)),
        text::body(entry.name.clone()),
    ]
    .spacing(8)
    .align_y(cosmic::iced_core::Alignment::Center);

    let message = if entry.is_dir {
        on_enter(entry.path.clone())
    } else {
        on_select(entry.path.clone())
    };

    button::custom(content)
        .selected(selected)
        .class(cosmic::theme::Button::MenuItem)
        .width(Length::Fill)
        .on_press(message)
        .into()
}

/// Build the browser panel: current folder, navigation and the listing
pub fn build_file_browser<'a, Msg: Clone + 'static>(
    browser: &FileBrowser,
    on_enter: impl Fn(PathBuf) -> Msg,
    on_select: impl Fn(PathBuf) -> Msg,
    on_go_up: Msg,
    on_refresh: Msg,
    space_s: u16,
) -> Element<'a, Msg> {
    let header = row![
        tooltip(
            button::icon(icon::from_name("go-up-symbolic").handle()).on_press(on_go_up),
            text::body(fl!("parent-directory")),
            tooltip::Position::Bottom,
        ),
        tooltip(
            button::icon(icon::from_name("view-refresh-symbolic").handle()).on_press(on_refresh),
            text::body(fl!("refresh")),
            tooltip::Position::Bottom,
        ),
        text::heading(browser.dir().display().to_string()),
    ]
    .spacing(space_s)
    .align_y(cosmic::iced_core::Alignment::Center);

    let selection = browser.selection();
    let listing: Element<'a, Msg> = if browser.entries().is_empty() {
        text::caption(fl!("empty-directory")).into()
    } else {
        let mut list = column![].spacing(2).width(Length::Fill);
        for entry in browser.entries() {
            let selected = !entry.is_dir && selection == Some(entry.path.as_path());
            list = list.push(entry_row(entry, selected, &on_enter, &on_select));
        }
        scrollable(list).height(Length::Fill).into()
    };

    container(column![header, listing].spacing(space_s))
        .padding(space_s)
        .width(Length::Fill)
        .height(Length::FillPortion(1))
        .class(cosmic::theme::Container::Card)
        .into()
}

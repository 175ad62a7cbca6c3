use anyhow::Context;
use cosmic::iced::Length;
use cosmic::iced_widget::column;
use cosmic::widget::{container, scrollable, text};
use cosmic::{
    Task, app,
    iced_futures::{Subscription, event::listen_with},
};

use crate::browser::FileBrowser;
use crate::config::SigstampConfig;
use crate::fl;
use crate::session::{handlers, messages, shortcuts, state::SessionState};
use crate::widget::{
    file_browser::build_file_browser, placement_surface::PlacementSurface, toolbar::build_toolbar,
};

pub(crate) fn run() -> cosmic::iced::Result {
    let settings = cosmic::app::Settings::default().size(cosmic::iced::Size::new(1024.0, 768.0));
    cosmic::app::run::<App>(settings, ())
}

/// Open the file browser in the configured start directory
fn open_browser(config: &SigstampConfig) -> anyhow::Result<FileBrowser> {
    let dir = config.start_directory();
    FileBrowser::open(&dir, config.browser_options())
        .with_context(|| format!("opening file browser in {}", dir.display()))
}

pub struct App {
    pub core: app::Core,
    pub session: SessionState,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Session(messages::Msg),
    Keyboard(cosmic::iced::keyboard::Event),
}

impl cosmic::Application for App {
    type Executor = cosmic::executor::Default;

    type Flags = ();

    type Message = Msg;

    const APP_ID: &'static str = "io.github.hojjatabdollahi.sigstamp";

    fn core(&self) -> &app::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut app::Core {
        &mut self.core
    }

    fn init(
        core: app::Core,
        _flags: Self::Flags,
    ) -> (Self, cosmic::iced::Task<cosmic::Action<Self::Message>>) {
        let config = SigstampConfig::load();
        let browser = open_browser(&config).unwrap_or_else(|err| {
            log::warn!("{:#}", err);
            FileBrowser::empty(config.start_directory(), config.browser_options())
        });
        log::info!(
            "Output will be written to {}",
            config.output_path().display()
        );

        (
            Self {
                core,
                session: SessionState::new(config, browser),
            },
            cosmic::iced::Task::none(),
        )
    }

    fn view(&self) -> cosmic::Element<'_, Self::Message> {
        let theme = self.core.system_theme().cosmic();
        let space_s = theme.spacing.space_s;
        let session = &self.session;

        let toolbar = build_toolbar(
            handlers::has_selection(session),
            session.can_save(),
            session.browser.is_visible(),
            Msg::Session(messages::Msg::OpenBaseImage),
            Msg::Session(messages::Msg::AddSignature),
            Msg::Session(messages::Msg::SaveImage),
            Msg::Session(messages::Msg::ToggleFileChooser),
            space_s,
        );

        let mut content = column![toolbar].spacing(space_s);

        if session.browser.is_visible() {
            content = content.push(build_file_browser(
                &session.browser,
                |path| Msg::Session(messages::Msg::enter(path)),
                |path| Msg::Session(messages::Msg::select(path)),
                Msg::Session(messages::Msg::go_up()),
                Msg::Session(messages::Msg::refresh()),
                space_s,
            ));
        }

        if session.base_preview.is_none() {
            content = content.push(text::caption(fl!("no-base-image")));
        }

        let surface = PlacementSurface::new(
            &session.composition,
            session.base_preview.as_ref(),
            &session.signature_previews,
            |event| Msg::Session(messages::Msg::Pointer(event)),
        )
        .dragging(session.drag.captured());

        content = content.push(
            scrollable(surface)
                .direction(cosmic::iced::widget::scrollable::Direction::Both {
                    vertical: Default::default(),
                    horizontal: Default::default(),
                })
                .width(Length::Fill)
                .height(Length::FillPortion(2)),
        );

        let status = text::body(session.status.text().to_string());
        content = content.push(if session.status.is_error() {
            container(status).class(cosmic::theme::Container::Custom(Box::new(|theme| {
                let cosmic_theme = theme.cosmic();
                cosmic::iced::widget::container::Style {
                    text_color: Some(cosmic_theme.destructive_color().into()),
                    ..Default::default()
                }
            })))
        } else {
            container(status)
        });

        container(content)
            .padding(space_s)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
    ) -> cosmic::iced::Task<cosmic::Action<Self::Message>> {
        match message {
            Msg::Keyboard(cosmic::iced::keyboard::Event::KeyPressed { key, modifiers, .. }) => {
                if let Some(msg) = shortcuts::handle_key_event(&self.session, key, modifiers) {
                    return self.update(Msg::Session(msg));
                }
                Task::none()
            }
            Msg::Keyboard(_) => Task::none(),
            Msg::Session(msg) => {
                handlers::handle_msg(&mut self.session, msg);
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        listen_with(|e, _, _| match e {
            cosmic::iced_core::Event::Keyboard(keyboard_event) => Some(Msg::Keyboard(keyboard_event)),
            _ => None,
        })
    }
}

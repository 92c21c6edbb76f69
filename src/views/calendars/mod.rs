use std::time::{Duration, Instant};

use chrono::{NaiveDate, NaiveDateTime};
use iced::widget::{button, center, column, container, mouse_area, opaque, row, stack, text};
use iced::{Alignment, Color, Length};
use iced_font_awesome::fa_icon_solid;
use url::Url;

use crate::calendar::layout::{Layout, ViewMode};
use crate::calendar::{
    Client, Controller, Direction, ErrorKind, Field, Modal, Notice, NoticeKind, Request, Response, Visibility,
};
use crate::config;
use crate::logger::LogExt;
use crate::session::Session;

mod controls;
mod day;
mod detail;
mod editor;
mod month;
mod week;
mod year;

pub struct Calendar {
    client: Client,
    base_url: Url,
    session: Session,
    controller: Controller,
    config: config::Calendar,
}

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    NextDay(Instant),
    Respond(Box<Response>),
    ChangeView(ViewMode),
    Navigate(Direction),
    Today,
    SelectDay(NaiveDate),
    SelectFriendDay(NaiveDate),
    OpenMonth(u32),
    OpenAdd(NaiveDate),
    OpenEdit(String),
    AskDelete(String),
    ConfirmDelete,
    CloseModal,
    Edit(Field, String),
    EditVisibility(Visibility),
    Submit,
    Import,
    DismissNotice,
    SignOut,
}

impl Calendar {
    pub fn new(base_url: Url, session: Session, config: config::Calendar) -> (Self, iced::Task<Message>) {
        let mut calendar = Self {
            client: Client::new(session.credentials(), base_url.clone()),
            base_url,
            controller: Controller::new(now().date(), config.default_view),
            session,
            config,
        };

        if !calendar.session.has_token() {
            calendar
                .controller
                .notify(Notice::error("No API token configured, events can not be loaded."));

            return (calendar, iced::Task::none());
        }

        let mut tasks = Vec::new();
        if let Some(user) = calendar.session.user().cloned() {
            log::info!("Restoring session of {}", user.email);
            let request = calendar.controller.restore(user);
            tasks.push(calendar.dispatch(request));
        }
        let request = calendar.controller.identify();
        tasks.push(calendar.dispatch(request));

        (calendar, iced::Task::batch(tasks))
    }

    pub fn subscription(&self) -> iced::Subscription<Message> {
        iced::Subscription::batch([
            iced::time::every(until_next_day(now())).map(Message::NextDay),
            iced::time::every(Duration::from_secs(self.config.refresh_interval.max(1))).map(|_| Message::Refresh),
        ])
    }

    /// Runs `request` in the background and feeds the response back.
    fn dispatch(&self, request: Request) -> iced::Task<Message> {
        let client = self.client.clone();

        iced::Task::perform(async move { Box::new(request.send(&client)) }, Message::Respond)
    }

    fn dispatch_maybe(&self, request: Option<Request>) -> iced::Task<Message> {
        request.map_or_else(iced::Task::none, |request| self.dispatch(request))
    }

    pub fn update(&mut self, message: Message) -> iced::Task<Message> {
        match message {
            Message::Refresh => {
                if self.controller.is_signed_in() && !self.controller.is_loading() {
                    let request = self.controller.load_events().log_debug("Skipping refresh").ok();
                    return self.dispatch_maybe(request);
                }
                // Retry an identification that failed without rejecting the token
                if !self.controller.is_signed_in() && !self.controller.is_identifying() && self.session.has_token() {
                    let request = self.controller.identify();
                    return self.dispatch(request);
                }
            }
            Message::NextDay(_) => {
                self.controller.set_current_day(now().date());
            }
            Message::Respond(response) => {
                self.track_session(&response);

                let follow_up = self.controller.apply(*response);
                return self.dispatch_maybe(follow_up);
            }
            Message::ChangeView(view) => self.controller.change_view(view),
            Message::Navigate(direction) => self.controller.navigate(direction),
            Message::Today => self.controller.today(now().date()),
            Message::SelectDay(date) => self.controller.select_day(date),
            Message::SelectFriendDay(date) => self.controller.select_friend_day(date),
            Message::OpenMonth(month) => self.controller.open_month(month),
            Message::OpenAdd(date) => {
                let _ = self.controller.open_add(date).log_debug("Refused to open the editor");
            }
            Message::OpenEdit(id) => {
                let _ = self.controller.open_edit(&id).log_warn("Refused to open the editor");
            }
            Message::AskDelete(id) => self.controller.ask_delete(&id),
            Message::ConfirmDelete => {
                let request = self.controller.confirm_delete();
                return self.dispatch_maybe(request);
            }
            Message::CloseModal => self.controller.close_modal(),
            Message::Edit(field, value) => {
                if let Some(editor) = self.controller.editor_mut() {
                    editor.set(field, value);
                }
            }
            Message::EditVisibility(visibility) => {
                if let Some(editor) = self.controller.editor_mut() {
                    editor.visibility = visibility;
                }
            }
            Message::Submit => {
                let request = self.controller.submit_editor();
                return self.dispatch_maybe(request);
            }
            Message::Import => {
                let request = self.controller.submit_import();
                return self.dispatch_maybe(request);
            }
            Message::DismissNotice => self.controller.dismiss_notice(),
            Message::SignOut => {
                self.controller.sign_out();
                let _ = self.session.clear().log_error("Failed to clear the session");
                self.client = Client::new(self.session.credentials(), self.base_url.clone());
                self.controller.notify(Notice::info("Signed out."));
            }
        };

        iced::Task::none()
    }

    /// Keeps the stored session in line with what the server says about the token.
    fn track_session(&mut self, response: &Response) {
        if !self.controller.is_identifying() {
            return;
        }

        match response {
            Response::Identified(Ok(user)) => {
                let _ = self.session.persist(user.clone()).log_error("Failed to store the session");
            }
            Response::Identified(Err(error)) if error.is(ErrorKind::AuthRequired) => {
                let _ = self.session.clear().log_error("Failed to clear the session");
                self.client = Client::new(self.session.credentials(), self.base_url.clone());
            }
            _ => {}
        }
    }

    pub fn view(&self) -> iced::Element<Message> {
        let body = match self.controller.layout() {
            Layout::Day(layout) => day::view(layout, self.controller.is_signed_in()),
            Layout::Week(layout) => week::view(layout, self.controller.current_day()),
            Layout::Month(layout) => month::view(layout, self.controller.current_day()),
            Layout::Year(layout) => year::view(layout),
        };

        let page = column![controls::view(&self.controller)]
            .push_maybe(self.controller.notice().map(view_notice))
            .push(container(body).width(Length::Fill).height(Length::Fill))
            .padding(16)
            .spacing(16);

        match self.controller.modal() {
            Modal::None => page.into(),
            Modal::Editor(state) => modal(page, editor::view(state)),
            Modal::DayDetail(date) => modal(page, detail::view_day(*date, self.controller.events())),
            Modal::FriendDetail(date) => modal(page, detail::view_friends(*date, self.controller.events())),
            Modal::ConfirmDelete { event, busy } => modal(page, detail::view_confirm(event, *busy)),
        }
    }
}

fn view_notice(notice: &Notice) -> iced::Element<Message> {
    let (icon, is_error) = match notice.kind {
        NoticeKind::Info => ("circle-info", false),
        NoticeKind::Error => ("triangle-exclamation", true),
    };

    container(
        row![
            fa_icon_solid(icon).size(18.0),
            text(&notice.message).width(Length::Fill),
            button(fa_icon_solid("xmark").size(18.0))
                .style(button::text)
                .on_press(Message::DismissNotice),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding(8)
    .width(Length::Fill)
    .style(move |theme| style_notice(theme, is_error))
    .into()
}

/// Lays `content` over a dimmed `base`. Clicking outside closes it.
fn modal<'a>(
    base: impl Into<iced::Element<'a, Message>>,
    content: impl Into<iced::Element<'a, Message>>,
) -> iced::Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_| container::Style {
                background: Some(Color { a: 0.6, ..Color::BLACK }.into()),
                ..container::Style::default()
            }))
            .on_press(Message::CloseModal)
        )
    ]
    .into()
}

fn style_notice(theme: &iced::Theme, is_error: bool) -> container::Style {
    let palette = theme.extended_palette();
    let pair = if is_error { palette.danger.weak } else { palette.primary.weak };

    container::Style {
        background: Some(pair.color.into()),
        text_color: Some(pair.text),
        border: iced::border::rounded(6),
        ..Default::default()
    }
}

fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn until_next_day(date: NaiveDateTime) -> Duration {
    let secs = date
        .date()
        .succ_opt()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(0, |next_day| (next_day - date).num_seconds());

    Duration::from_secs(u64::try_from(secs).unwrap_or(0) + 30)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_day_tick_lands_just_after_midnight() {
        let evening = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();

        assert_eq!(until_next_day(evening), Duration::from_secs(90));
    }

    #[test]
    fn next_day_tick_never_underflows() {
        assert_eq!(until_next_day(NaiveDateTime::MAX), Duration::from_secs(30));
    }
}

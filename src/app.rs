use iced::widget::container;
use iced::{Length, Subscription};

use crate::config::Config;
use crate::session::Session;
use crate::views;

pub struct App {
    calendar: views::Calendar,
}

#[derive(Debug, Clone)]
pub enum Message {
    Calendar(views::calendars::Message),
}

impl App {
    pub fn new(config: Config) -> (Self, iced::Task<Message>) {
        let session = Session::hydrate(config.session.path, config.api.token);

        let (calendar, task) = views::Calendar::new(config.api.base_url, session, config.calendar);

        (Self { calendar }, task.map(Message::Calendar))
    }

    pub fn subscription(&self) -> Subscription<Message> {
        self.calendar.subscription().map(Message::Calendar)
    }

    pub fn update(&mut self, message: Message) -> iced::Task<Message> {
        match message {
            Message::Calendar(calendar_message) => self
                .calendar
                .update(calendar_message)
                .map(Message::Calendar),
        }
    }

    pub fn view(&self) -> iced::Element<Message> {
        container(self.calendar.view().map(Message::Calendar))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

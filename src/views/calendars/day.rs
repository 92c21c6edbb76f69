use iced::widget::{button, column, container, row, scrollable, text, vertical_space, Column};
use iced::{Alignment, Length};
use iced_font_awesome::fa_icon_solid;

use super::Message;
use crate::calendar::layout::DayLayout;
use crate::calendar::Event;

pub fn view(layout: DayLayout<'_>, signed_in: bool) -> iced::Element<'_, Message> {
    if layout.is_empty() {
        return column![
            text("No events on this day").size(20).style(style_event_description),
            button(text("Add event")).on_press_maybe(signed_in.then_some(Message::OpenAdd(layout.date))),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into();
    }

    let mut entries = Column::new().spacing(16);
    if !layout.mine.is_empty() {
        entries = entries
            .push(text("Your events").size(18))
            .extend(layout.mine.into_iter().map(|event| view_event(event, true)));
    }
    if !layout.friends.is_empty() {
        entries = entries
            .push(text("Friends").size(18))
            .extend(layout.friends.into_iter().map(|event| view_event(event, false)));
    }

    scrollable(entries)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

pub fn view_event(event: &Event, own: bool) -> iced::Element<Message> {
    let public = event.is_public();

    let mut entry = row![
        container(vertical_space())
            .width(8)
            .style(move |theme| style_event_indicator(theme, public, own)),
        column![
            text(event.label()).size(20),
            text(&event.description)
                .style(style_event_description)
                .size(16),
        ]
        .push_maybe((!own).then(|| text(format!("From: {}", event.email)).size(14).style(style_event_description)))
        .width(Length::Fill)
        .spacing(2),
        text(event.time_range())
            .wrapping(text::Wrapping::None)
            .size(16),
    ]
    .height(Length::Shrink)
    .align_y(Alignment::Center)
    .spacing(8);

    if let (true, Some(id)) = (own, event.id()) {
        entry = entry
            .push(
                button(fa_icon_solid("pen").size(16.0))
                    .style(button::text)
                    .on_press(Message::OpenEdit(id.to_owned())),
            )
            .push(
                button(fa_icon_solid("trash").size(16.0))
                    .style(button::text)
                    .on_press(Message::AskDelete(id.to_owned())),
            );
    }

    entry.into()
}

pub fn style_event_indicator(theme: &iced::Theme, public: bool, own: bool) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(indicator_color(theme, public, own))),
        border: iced::border::rounded(12),
        ..Default::default()
    }
}

/// Own public events use the primary color, own private ones the secondary, friends the success color.
pub fn indicator_color(theme: &iced::Theme, public: bool, own: bool) -> iced::Color {
    let palette = theme.extended_palette();

    match (own, public) {
        (false, _) => palette.success.base.color,
        (true, true) => palette.primary.base.color,
        (true, false) => palette.secondary.strong.color,
    }
}

pub fn style_event_description(theme: &iced::Theme) -> text::Style {
    let palette = theme.palette();

    text::Style {
        color: Some(palette.text.scale_alpha(0.8)),
    }
}

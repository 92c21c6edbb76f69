use chrono::NaiveDate;
use iced::widget::{button, column, container, text, Column, Row};
use iced::{Alignment, Length};
use iced_font_awesome::fa_icon_solid;

use super::day::{indicator_color, style_event_description};
use super::month::{style_normal, style_today};
use super::Message;
use crate::calendar::layout::{WeekDay, WeekLayout};

pub fn view(layout: WeekLayout<'_>, today: NaiveDate) -> iced::Element<'_, Message> {
    let empty = layout
        .is_empty()
        .then(|| {
            text(format!(
                "No events between {} and {}",
                layout.start().format("%d.%m."),
                layout.end().format("%d.%m.%Y")
            ))
            .style(style_event_description)
        });

    let days = Row::from_iter(layout.days.into_iter().map(|day| view_day(day, today)))
        .spacing(4)
        .height(Length::Fill);

    column![days]
        .push_maybe(empty)
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
}

fn view_day(day: WeekDay<'_>, today: NaiveDate) -> iced::Element<'_, Message> {
    let own = day.mine.iter().map(|event| (event.is_public(), true));
    let friends = day.friends.iter().map(|event| (event.is_public(), false));

    let dots = Row::from_iter(own.chain(friends).map(|(public, own)| {
        container(fa_icon_solid("circle").size(10.0))
            .style(move |theme| style_indicator(theme, public, own))
            .into()
    }))
    .spacing(3)
    .wrap();

    let header = column![
        text(day.date.format("%a").to_string()).size(16),
        text(day.date.format("%d").to_string()).size(22),
        text(match day.indicators() {
            0 => String::new(),
            1 => "1 event".to_owned(),
            n => format!("{n} events"),
        })
        .size(12)
        .style(style_event_description),
    ]
    .align_x(Alignment::Center)
    .spacing(2);

    let labels = Column::from_iter(day.mine.iter().copied().map(|event| {
        text(event.label())
            .size(14)
            .wrapping(text::Wrapping::None)
            .into()
    }))
    .spacing(2);

    let content = column![header, container(dots).center_x(Length::Fill), labels]
        .spacing(8)
        .width(Length::Fill);

    button(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(6)
        .style(if day.date == today { style_today } else { style_normal })
        .on_press(Message::SelectDay(day.date))
        .into()
}

pub fn style_indicator(theme: &iced::Theme, public: bool, own: bool) -> container::Style {
    container::Style {
        text_color: Some(indicator_color(theme, public, own)),
        ..Default::default()
    }
}

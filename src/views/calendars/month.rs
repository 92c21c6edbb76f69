use chrono::NaiveDate;
use iced::widget::{button, column, container, horizontal_space, row, text, Row};
use iced::{Font, Length};
use iced_font_awesome::fa_icon_solid;

use super::day::style_event_description;
use super::week::style_indicator;
use super::Message;
use crate::calendar::date::WEEK_LENGTH;
use crate::calendar::layout::{MonthDay, MonthLayout};

const WEEKDAYS: [&str; WEEK_LENGTH] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

pub fn view(layout: MonthLayout<'_>, today: NaiveDate) -> iced::Element<'_, Message> {
    let days = Row::from_iter(WEEKDAYS.into_iter().map(view_weekday));

    let month_grid = column![days].extend(layout.rows().into_iter().map(|cells| {
        Row::from_iter(cells.into_iter().map(|cell| match cell {
            Some(day) => view_button(day, today),
            None => container(horizontal_space()).width(Length::Fill).height(56).into(),
        }))
        .into()
    }));

    let empty = layout
        .is_empty()
        .then(|| text("No events this month").style(style_event_description));

    column![month_grid]
        .push_maybe(empty)
        .spacing(16)
        .align_x(iced::Alignment::Center)
        .into()
}

fn view_button<'a>(day: &MonthDay<'a>, today: NaiveDate) -> iced::Element<'a, Message> {
    let friend_marker = day.has_friends.then(|| {
        button(fa_icon_solid("star").size(12.0))
            .padding(0)
            .style(button::text)
            .on_press(Message::SelectFriendDay(day.date))
    });

    let content = column![
        row![text(day.day)]
            .push_maybe(friend_marker)
            .spacing(4)
            .align_y(iced::Alignment::Center),
        view_event_indicators(day.public.len(), day.private.len()),
    ]
    .align_x(iced::Alignment::Center);

    button(container(content).center(Length::Fill))
        .width(Length::Fill)
        .height(56)
        .padding(4)
        .style(if day.date == today { style_today } else { style_normal })
        .on_press(Message::SelectDay(day.date))
        .into()
}

/// One dot per own event, public ones first.
fn view_event_indicators<'a>(public: usize, private: usize) -> iced::Element<'a, Message> {
    let dots = std::iter::repeat(true)
        .take(public)
        .chain(std::iter::repeat(false).take(private))
        .map(|public| {
            container(fa_icon_solid(if public { "circle" } else { "lock" }).size(10.0))
                .style(move |theme| style_indicator(theme, public, true))
                .into()
        });

    Row::from_iter(dots).spacing(3).wrap().into()
}

fn view_weekday(name: &'static str) -> iced::Element<'static, Message> {
    text(name)
        .size(18.0)
        .font(Font {
            weight: iced::font::Weight::Semibold,
            ..Font::default()
        })
        .center()
        .width(Length::Fill)
        .into()
}

pub fn style_normal(theme: &iced::Theme, _: button::Status) -> button::Style {
    let palette = theme.extended_palette();

    button::Style {
        background: None,
        text_color: palette.background.base.text,
        border: iced::Border {
            width: 1.0,
            color: palette.background.strong.color,
            ..iced::Border::default()
        },
        ..Default::default()
    }
}

pub fn style_today(theme: &iced::Theme, _: button::Status) -> button::Style {
    let palette = theme.extended_palette();

    button::Style {
        background: Some(palette.primary.weak.color.into()),
        text_color: palette.primary.weak.text,
        border: iced::Border {
            width: 1.0,
            color: palette.background.strong.color,
            ..iced::Border::default()
        },
        ..Default::default()
    }
}

use chrono::{Locale, NaiveDate};
use iced::widget::{button, column, text, Column, Row};
use iced::{Alignment, Length};

use super::day::style_event_description;
use super::month::style_normal;
use super::Message;
use crate::calendar::layout::{MonthCount, YearLayout};

const COLUMNS: usize = 4;

pub fn view<'a>(layout: YearLayout) -> iced::Element<'a, Message> {
    let grid = Column::from_iter(layout.months.chunks(COLUMNS).map(|months| {
        Row::from_iter(months.iter().map(|month| view_month(layout.year, *month)))
            .spacing(8)
            .height(Length::Fill)
            .into()
    }))
    .spacing(8);

    let summary = if layout.is_empty() {
        format!("No events in {}", layout.year)
    } else {
        format!("{} events in {}", layout.total(), layout.year)
    };

    column![grid, text(summary).style(style_event_description)]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
}

fn view_month<'a>(year: i32, month: MonthCount) -> iced::Element<'a, Message> {
    let name = NaiveDate::from_ymd_opt(year, month.month, 1).map_or_else(
        || month.month.to_string(),
        |first| first.format_localized("%B", Locale::en_US).to_string(),
    );

    let count = match month.count {
        0 => "No events".to_owned(),
        1 => "1 event".to_owned(),
        n => format!("{n} events"),
    };

    button(
        column![text(name).size(18), text(count).size(14).style(style_event_description)]
            .spacing(4)
            .align_x(Alignment::Center)
            .width(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(8)
    .style(style_normal)
    .on_press(Message::OpenMonth(month.month))
    .into()
}

use chrono::{Locale, NaiveDate};
use iced::widget::{button, column, container, row, scrollable, text, Column};
use iced::Length;

use super::day::{style_event_description, view_event};
use super::Message;
use crate::calendar::date::format_key;
use crate::calendar::{Event, Partition};

/// Own events of `date` with edit and delete actions.
pub fn view_day(date: NaiveDate, events: &Partition) -> iced::Element<Message> {
    let key = format_key(date);
    let list = events.sorted_mine_on(&key);

    let body: iced::Element<Message> = if list.is_empty() {
        text("No events on this day").style(style_event_description).into()
    } else {
        scrollable(Column::from_iter(list.into_iter().map(|event| view_entry(event, true))).spacing(12))
            .height(Length::Shrink)
            .into()
    };

    let actions = row![
        button(text("Close")).style(button::secondary).on_press(Message::CloseModal),
        button(text("Add event")).on_press(Message::OpenAdd(date)),
    ]
    .spacing(8);

    frame(column![text(heading(date)).size(22), body, actions].spacing(12))
}

/// Read-only list of the friends' events of `date`.
pub fn view_friends(date: NaiveDate, events: &Partition) -> iced::Element<Message> {
    let key = format_key(date);
    let list = events.sorted_friends_on(&key);

    let body: iced::Element<Message> = if list.is_empty() {
        text("Your friends have no events on this day").style(style_event_description).into()
    } else {
        scrollable(Column::from_iter(list.into_iter().map(|event| view_entry(event, false))).spacing(12))
            .height(Length::Shrink)
            .into()
    };

    frame(
        column![
            text(format!("Friends on {}", heading(date))).size(22),
            body,
            button(text("Close")).style(button::secondary).on_press(Message::CloseModal),
        ]
        .spacing(12),
    )
}

fn view_entry(event: &Event, own: bool) -> iced::Element<Message> {
    let lines = details(event, own).into_iter().map(|(label, value)| {
        text(format!("{label}: {value}"))
            .size(14)
            .style(style_event_description)
            .into()
    });

    column![view_event(event, own), Column::from_iter(lines).padding([0, 16]).spacing(2)]
        .spacing(4)
        .into()
}

/// Labelled lines shown under an event. Empty location fields are left out.
/// The owner of a friend's event is already part of [`view_event`].
fn details(event: &Event, own: bool) -> Vec<(&'static str, String)> {
    let mut lines = Vec::new();

    for (label, value) in [("Address", &event.street_address), ("Postal Number", &event.postal_number)] {
        if !value.trim().is_empty() {
            lines.push((label, value.clone()));
        }
    }
    if own {
        lines.push(("Type", event.visibility.to_string()));
    }

    lines
}

pub fn view_confirm(event: &Event, busy: bool) -> iced::Element<Message> {
    let question = format!(
        "Delete \"{}\" on {}?",
        event.label(),
        event.day().map_or_else(|| event.date.clone(), heading)
    );

    frame(
        column![
            text("Delete event").size(22),
            text(question),
            row![
                button(text("Cancel")).style(button::secondary).on_press(Message::CloseModal),
                button(text(if busy { "Deleting..." } else { "Delete" }))
                    .style(button::danger)
                    .on_press_maybe((!busy).then_some(Message::ConfirmDelete)),
            ]
            .spacing(8),
        ]
        .spacing(12),
    )
}

fn heading(date: NaiveDate) -> String {
    date.format_localized("%A, %d %B %Y", Locale::en_US).to_string()
}

fn frame<'a>(content: impl Into<iced::Element<'a, Message>>) -> iced::Element<'a, Message> {
    container(content)
        .width(480)
        .padding(16)
        .style(container::rounded_box)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Visibility;

    fn event() -> Event {
        Event {
            email: "kim@example.org".into(),
            street_address: "Main Street 1".into(),
            visibility: Visibility::Private,
            ..Event::default()
        }
    }

    #[test]
    fn own_events_show_location_and_type() {
        assert_eq!(
            details(&event(), true),
            vec![("Address", "Main Street 1".to_owned()), ("Type", "Private".to_owned())]
        );
    }

    #[test]
    fn friend_events_show_the_location_only() {
        let event = Event {
            postal_number: "7030".into(),
            ..event()
        };

        assert_eq!(
            details(&event, false),
            vec![("Address", "Main Street 1".to_owned()), ("Postal Number", "7030".to_owned())]
        );
    }
}

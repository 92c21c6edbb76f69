use iced::widget::{button, column, container, horizontal_rule, pick_list, row, text, text_input, Column};
use iced::{Alignment, Length};

use super::Message;
use crate::calendar::{Editor, Field, Visibility};

const EVENT_FIELDS: [(Field, &str); 7] = [
    (Field::Status, "Lunch with Kim"),
    (Field::Description, "What is it about?"),
    (Field::StreetAddress, "Main Street 1"),
    (Field::PostalNumber, "7030"),
    (Field::Date, "YYYY-MM-DD"),
    (Field::StartTime, "HH:MM"),
    (Field::EndTime, "HH:MM"),
];

pub fn view(editor: &Editor) -> iced::Element<Message> {
    let title = if editor.is_editing() { "Edit event" } else { "Add event" };
    let idle = !editor.is_busy();

    let fields = Column::from_iter(EVENT_FIELDS.into_iter().map(|(field, placeholder)| {
        view_field(editor, field, placeholder, idle.then_some(Message::Submit))
    }))
    .spacing(8);

    let visibility = row![
        text("Visibility").width(Length::Fill),
        pick_list(Visibility::ALL, Some(editor.visibility), Message::EditVisibility),
    ]
    .align_y(Alignment::Center);

    let actions = row![
        button(text("Cancel")).style(button::secondary).on_press(Message::CloseModal),
        button(text(if idle { "Save" } else { "Saving..." })).on_press_maybe(idle.then_some(Message::Submit)),
    ]
    .spacing(8);

    let mut content = column![text(title).size(24), fields, visibility]
        .push_maybe(editor.error.as_deref().map(|error| text(error).style(text::danger)))
        .push(actions)
        .spacing(12);

    if !editor.is_editing() {
        content = content.push(horizontal_rule(1)).push(view_import(editor, idle));
    }

    container(content)
        .width(480)
        .padding(16)
        .style(container::rounded_box)
        .into()
}

fn view_import(editor: &Editor, idle: bool) -> iced::Element<Message> {
    column![
        text("Import timetable").size(18),
        view_field(editor, Field::ImportUrl, "https://tp.educloud.no/ntnu/timeplan/...", idle.then_some(Message::Import)),
        view_field(editor, Field::ImportFile, "/path/to/schedule.ics", idle.then_some(Message::Import)),
        button(text("Import")).on_press_maybe(idle.then_some(Message::Import)),
    ]
    .spacing(8)
    .into()
}

fn view_field<'a>(
    editor: &'a Editor,
    field: Field,
    placeholder: &'a str,
    on_submit: Option<Message>,
) -> iced::Element<'a, Message> {
    column![
        text(field.label()).size(14),
        text_input(placeholder, editor.get(field))
            .on_input(move |value| Message::Edit(field, value))
            .on_submit_maybe(on_submit),
    ]
    .spacing(2)
    .into()
}

use chrono::{Datelike, Locale, NaiveDate};
use iced::widget::{button, column, horizontal_space, row, text, Row};
use iced::{Border, Font, Length};
use iced_font_awesome::fa_icon_solid;

use super::Message;
use crate::calendar::date::{end_of_week, start_of_week};
use crate::calendar::layout::ViewMode;
use crate::calendar::{Controller, Direction};

pub fn view(controller: &Controller) -> iced::Element<Message> {
    let anchor = controller.anchor();

    let navigation = row![
        button(fa_icon_solid("caret-left").size(32.0))
            .style(style_month_button)
            .on_press(Message::Navigate(Direction::Prev)),
        text(title(controller.view(), anchor))
            .center()
            .width(Length::Fill)
            .size(24.0)
            .font(Font {
                weight: iced::font::Weight::Bold,
                ..Font::default()
            })
            .wrapping(text::Wrapping::None),
        button(fa_icon_solid("caret-right").size(32.0))
            .style(style_month_button)
            .on_press(Message::Navigate(Direction::Next)),
    ]
    .height(50)
    .spacing(8)
    .align_y(iced::Alignment::Center);

    let views = Row::from_iter(ViewMode::ALL.into_iter().map(|view| {
        button(text(view.to_string()).center().width(Length::Fill))
            .width(Length::Fill)
            .style(move |theme, status| style_view_button(theme, status, view == controller.view()))
            .on_press(Message::ChangeView(view))
            .into()
    }))
    .spacing(4);

    let account: iced::Element<Message> = match controller.user() {
        Some(user) => row![
            text(if user.username.is_empty() { &user.email } else { &user.username }).size(16),
            button(fa_icon_solid("right-from-bracket").size(16.0))
                .style(button::text)
                .on_press(Message::SignOut),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center)
        .into(),
        None => text(if controller.is_loading() { "Signing in..." } else { "Not signed in" })
            .size(16)
            .into(),
    };

    let actions = row![
        button(text("Today")).on_press(Message::Today),
        button(row![fa_icon_solid("plus").size(14.0), text("Add event")].spacing(6))
            .on_press_maybe(controller.is_signed_in().then_some(Message::OpenAdd(anchor))),
        horizontal_space(),
        account,
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center);

    column![navigation, views, actions].spacing(12).into()
}

fn title(view: ViewMode, anchor: NaiveDate) -> String {
    match view {
        ViewMode::Day => anchor.format_localized("%A, %-d %B %Y", Locale::en_US).to_string(),
        ViewMode::Week => {
            let (start, end) = (start_of_week(anchor), end_of_week(anchor));

            format!(
                "Week {}: {} - {}",
                anchor.iso_week().week(),
                start.format("%d.%m."),
                end.format("%d.%m.%Y")
            )
        }
        ViewMode::Month => anchor.format_localized("%B %Y", Locale::en_US).to_string(),
        ViewMode::Year => anchor.year().to_string(),
    }
}

pub fn style_month_button(theme: &iced::Theme, _: button::Status) -> button::Style {
    let palette = theme.extended_palette();

    button::Style {
        text_color: palette.primary.strong.text,
        background: Some(palette.primary.strong.color.into()),
        border: Border::default().rounded(3),
        ..Default::default()
    }
}

fn style_view_button(theme: &iced::Theme, _: button::Status, active: bool) -> button::Style {
    let palette = theme.extended_palette();
    let pair = if active { palette.primary.strong } else { palette.background.weak };

    button::Style {
        text_color: pair.text,
        background: Some(pair.color.into()),
        border: Border::default().rounded(3),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_per_view() {
        let anchor = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        assert_eq!(title(ViewMode::Day, anchor), "Friday, 15 March 2024");
        assert_eq!(title(ViewMode::Week, anchor), "Week 11: 11.03. - 17.03.2024");
        assert_eq!(title(ViewMode::Month, anchor), "March 2024");
        assert_eq!(title(ViewMode::Year, anchor), "2024");
    }
}

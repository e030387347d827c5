//! Left pane: one button per model in the open folder
use iced::widget::{button, container, scrollable, text, Column};
use iced::{Element, Length, Theme};

use crate::state::data::ModelRecord;
use crate::Message;

/// Build the model list, highlighting the selected entry
pub fn view<'a>(records: &'a [ModelRecord], selected: Option<usize>) -> Element<'a, Message> {
    if records.is_empty() {
        return container(text("No models in this folder").size(14))
            .padding(10)
            .into();
    }

    let items = records
        .iter()
        .enumerate()
        .map(|(index, record)| -> Element<'a, Message> {
            let style: fn(&Theme, button::Status) -> button::Style = if selected == Some(index) {
                button::primary
            } else {
                button::text
            };

            button(text(record.name.as_str()).size(15))
                .on_press(Message::ModelSelected(index))
                .width(Length::Fill)
                .style(style)
                .into()
        });

    scrollable(Column::with_children(items).spacing(2).padding(4))
        .height(Length::Fill)
        .into()
}

//! Right pane: details of the selected model
use iced::widget::{
    button, column, container, horizontal_space, image, row, scrollable, text, Column,
};
use iced::{Alignment, ContentFit, Element, Length};
use std::path::Path;

use crate::state::data::ModelRecord;
use crate::Message;

/// Height of the preview image in the detail pane
const PREVIEW_HEIGHT: f32 = 360.0;

/// Build the detail pane for `record`, or a hint when nothing is selected
pub fn view<'a>(record: Option<&'a ModelRecord>, default_image: &Path) -> Element<'a, Message> {
    let Some(record) = record else {
        return container(text("Select a model to see its preview and trigger words").size(16))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    };

    let header = row![
        text(record.name.as_str()).size(24),
        horizontal_space(),
        button("Copy name").on_press(Message::CopyName),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    // image_path is never empty; a missing placeholder just renders blank
    let preview = image(image::Handle::from_path(&record.image_path))
        .width(Length::Fill)
        .height(Length::Fixed(PREVIEW_HEIGHT))
        .content_fit(ContentFit::Contain);

    let preview_caption = if record.image_path == default_image {
        "No preview image for this model"
    } else {
        ""
    };

    let triggers_header = row![
        text("Trigger words").size(18),
        horizontal_space(),
        button("Copy all")
            .on_press_maybe(record.has_triggers().then_some(Message::CopyAllTriggers)),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    column![
        header,
        preview,
        text(preview_caption).size(12),
        triggers_header,
        trigger_list(&record.trigger_lines),
    ]
    .spacing(12)
    .into()
}

/// One row per trigger line, each with its own copy button
fn trigger_list<'a>(lines: &'a [String]) -> Element<'a, Message> {
    if lines.is_empty() {
        return text("No trigger words").size(14).into();
    }

    let rows = lines.iter().map(|line| -> Element<'a, Message> {
        row![
            text(line.as_str()).size(14).width(Length::Fill),
            button("Copy").on_press(Message::CopyTrigger(line.clone())),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    });

    scrollable(Column::with_children(rows).spacing(6))
        .height(Length::Fill)
        .into()
}

use iced::widget::{button, column, container, row, text, vertical_rule};
use iced::{clipboard, window, Alignment, Element, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod scan;
mod state;
mod ui;

use scan::ScanError;
use state::config::{Config, ConfigFile, ConfigLoad};
use state::library::{Library, DEFAULT_IMAGE};

/// Main application state
struct LoraViewer {
    /// Models of the open folder and the current selection
    library: Library,
    /// Where the last used folder is remembered
    config: ConfigFile,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the "Choose Folder" button
    ChooseFolder,
    /// User asked to scan the open folder again
    Reload,
    /// User clicked a model in the list
    ModelSelected(usize),
    /// Copy the selected model's name
    CopyName,
    /// Copy a single trigger line
    CopyTrigger(String),
    /// Copy the whole trigger text of the selected model
    CopyAllTriggers,
    /// The window is about to close
    CloseRequested(window::Id),
}

impl LoraViewer {
    /// Create a new instance of the application, reopening the last folder
    fn new() -> (Self, Task<Message>) {
        let config = ConfigFile::default();
        let loaded = config.load();

        match &loaded {
            ConfigLoad::Missing => {
                tracing::info!("No config at {}, starting fresh", config.path().display());
            }
            ConfigLoad::Invalid(e) => {
                tracing::warn!("Ignoring config: {}", e);
            }
            ConfigLoad::Loaded(_) => {}
        }

        let mut app = LoraViewer {
            library: Library::new(DEFAULT_IMAGE),
            config,
            status: "Choose a folder with LoRA models.".to_string(),
        };

        if let Some(folder) = loaded.startup_folder() {
            tracing::info!("📁 Reopening last folder: {}", folder.display());
            app.open_folder(folder);
        }

        (app, Task::none())
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ChooseFolder => {
                // Start the picker where the user left off, or at home
                let start = if self.library.folder().as_os_str().is_empty() {
                    dirs::home_dir()
                } else {
                    Some(self.library.folder().to_path_buf())
                };

                let mut dialog = FileDialog::new().set_title("Select LoRA Folder");
                if let Some(dir) = start {
                    dialog = dialog.set_directory(dir);
                }

                if let Some(folder_path) = dialog.pick_folder() {
                    self.open_folder(folder_path);
                }

                Task::none()
            }
            Message::Reload => {
                let result = self.library.reload();
                self.report_scan(result);
                Task::none()
            }
            Message::ModelSelected(index) => {
                self.library.select(index);
                Task::none()
            }
            Message::CopyName => match self.library.selected() {
                Some(record) => {
                    let name = record.name.clone();
                    self.status = format!("Copied name \"{}\"", name);
                    clipboard::write(name)
                }
                None => Task::none(),
            },
            Message::CopyTrigger(line) => {
                self.status = format!("Copied \"{}\"", line);
                clipboard::write(line)
            }
            Message::CopyAllTriggers => match self.library.selected() {
                Some(record) => {
                    let trigger_text = record.trigger_text.clone();
                    self.status = format!("Copied all trigger words of \"{}\"", record.name);
                    clipboard::write(trigger_text)
                }
                None => Task::none(),
            },
            Message::CloseRequested(id) => {
                self.save_config();
                window::close(id)
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let has_folder = !self.library.folder().as_os_str().is_empty();

        let toolbar = row![
            button("Choose Folder")
                .on_press(Message::ChooseFolder)
                .padding(10),
            button("Reload")
                .on_press_maybe(has_folder.then_some(Message::Reload))
                .padding(10),
            text(format!("Current folder: {}", self.library.folder().display())).size(14),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let body = row![
            container(ui::model_list::view(
                self.library.records(),
                self.library.selected_index(),
            ))
            .width(Length::FillPortion(1))
            .height(Length::Fill),
            vertical_rule(1),
            container(ui::detail::view(
                self.library.selected(),
                self.library.default_image(),
            ))
            .width(Length::FillPortion(2))
            .height(Length::Fill)
            .padding(10),
        ]
        .spacing(10);

        column![toolbar, body, text(&self.status).size(14)]
            .spacing(10)
            .padding(16)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        window::close_requests().map(Message::CloseRequested)
    }

    /// Load a folder into the library and show the outcome
    fn open_folder(&mut self, folder: PathBuf) {
        let result = self.library.load_folder(folder);
        self.report_scan(result);
    }

    fn report_scan(&mut self, result: Result<usize, ScanError>) {
        self.status = match result {
            Ok(count) => format!("Found {} models.", count),
            Err(e) => {
                tracing::error!("⚠️  Scan failed: {}", e);
                format!("Scan failed: {}", e)
            }
        };
    }

    /// Remember the open folder for next time
    fn save_config(&self) {
        let config = Config::for_folder(self.library.folder());

        match self.config.save(&config) {
            Ok(()) => tracing::info!("💾 Saved last folder to {}", self.config.path().display()),
            Err(e) => tracing::error!("Failed to save config: {}", e),
        }
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lora_viewer=info")),
        )
        .init();

    iced::application("LoRA Viewer", LoraViewer::update, LoraViewer::view)
        .theme(LoraViewer::theme)
        .subscription(LoraViewer::subscription)
        // Closing is handled in `update` so the config gets written first
        .window(window::Settings {
            exit_on_close_request: false,
            ..window::Settings::default()
        })
        .window_size((1100.0, 720.0))
        .centered()
        .run_with(LoraViewer::new)
}

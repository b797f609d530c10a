mod analyze;
mod audio_form;
mod error;
mod generate;
mod health;
mod root;
mod upload;

pub use analyze::{analyze_speech_handler, upload_and_analyze_handler};
pub use audio_form::AudioForm;
pub use error::{ErrorResponse, error_response};
pub use generate::generate_text_handler;
pub use health::health_handler;
pub use root::root_handler;
pub use upload::{transcribe_handler, upload_audio_handler};

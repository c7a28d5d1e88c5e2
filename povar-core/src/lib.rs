//! Core library for the recipe post generator: canonical recipe schema,
//! image encoding, generation and delivery clients, and the editor state
//! machine. The server crate hosts the generation endpoint on top of this.

pub mod app;
pub mod clipboard;
pub mod deliver;
pub mod editor;
pub mod error;
pub mod generate;
pub mod http;
pub mod image;
pub mod prompts;
pub mod schema;
pub mod types;

pub use app::App;
pub use clipboard::{ClipboardSink, FakeClipboard, SystemClipboard};
pub use deliver::{flatten_recipe, Deliverer, DeliveryClient, DEFAULT_WEBHOOK_URL};
pub use editor::{Editor, ListField, OpState, ScalarField, CONFIRMATION_TTL};
pub use error::{ClipboardError, DeliveryError, EncodeError, GenerateError};
pub use generate::GenerationClient;
pub use http::{JsonTransport, MockTransport, PostResponse, ReqwestTransport, TransportError};
pub use image::{encode_image_bytes, encode_image_file, MAX_FILE_SIZE};
pub use schema::{normalize_nutrition, recipe_schema};
pub use types::{EncodedImage, GenerationRequest, ImagePart, InlineData, Recipe};

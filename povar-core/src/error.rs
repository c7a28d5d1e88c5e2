use thiserror::Error;

/// Error type for encoding a user-selected image.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Failed to read image file: {0}")]
    Unreadable(#[from] std::io::Error),

    #[error("Could not detect image format")]
    UnknownFormat,

    #[error("Unsupported image format: {0}. Allowed: JPEG, PNG, GIF, WebP")]
    UnsupportedFormat(String),

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Error type for the recipe generation client.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Caught before any network call is issued.
    #[error("Пожалуйста, укажите текст рецепта или прикрепите изображение.")]
    Validation,

    /// The request never reached a server.
    #[error("Сетевая ошибка: {0}")]
    Network(String),

    /// The server was reached but generation failed. The message is passed
    /// through from the endpoint's error body when one is present.
    #[error("{0}")]
    Generation(String),
}

/// Error type for the delivery (webhook) client.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct DeliveryError(pub String);

/// Error type for clipboard writes.
#[derive(Error, Debug)]
#[error("Clipboard write failed: {0}")]
pub struct ClipboardError(pub String);

use std::fmt;

#[derive(Debug)]
pub enum PreviewError {
    Video(video::VideoError),
    Image(image::ImageError),
    Equi(equi::EquiError),
    Window(String),
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::Video(err) => write!(f, "video error: {err}"),
            PreviewError::Image(err) => write!(f, "image error: {err}"),
            PreviewError::Equi(err) => write!(f, "projection error: {err}"),
            PreviewError::Window(msg) => write!(f, "window error: {msg}"),
        }
    }
}

impl std::error::Error for PreviewError {}

impl From<video::VideoError> for PreviewError {
    fn from(err: video::VideoError) -> Self {
        PreviewError::Video(err)
    }
}

impl From<image::ImageError> for PreviewError {
    fn from(err: image::ImageError) -> Self {
        PreviewError::Image(err)
    }
}

impl From<equi::EquiError> for PreviewError {
    fn from(err: equi::EquiError) -> Self {
        PreviewError::Equi(err)
    }
}

impl From<minifb::Error> for PreviewError {
    fn from(err: minifb::Error) -> Self {
        PreviewError::Window(err.to_string())
    }
}

use std::fmt;

#[derive(Debug)]
pub enum EquiError {
    Config(String),
    Input(String),
    Image(image::ImageError),
}

impl fmt::Display for EquiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquiError::Config(msg) => write!(f, "projector config error: {msg}"),
            EquiError::Input(msg) => write!(f, "projector input error: {msg}"),
            EquiError::Image(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for EquiError {}

impl From<image::ImageError> for EquiError {
    fn from(err: image::ImageError) -> Self {
        EquiError::Image(err)
    }
}

impl From<base::TensorError> for EquiError {
    fn from(err: base::TensorError) -> Self {
        EquiError::Image(image::ImageError::Tensor(err))
    }
}

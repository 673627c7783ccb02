use std::io;

use thiserror::Error;

use crate::api::ApiError;
use crate::color::ColorError;
use crate::export::ExportError;
use crate::notification::ErrorKind;
use crate::palette::PaletteError;
use crate::renderer::RendererError;
use crate::route::RouteError;
use crate::session::SessionError;
use crate::state::StateError;
use crate::view::ViewError;
use crate::visibility::ImageError;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
    #[error(transparent)]
    Route(#[from] RouteError),
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Category shown to the user when this error is reported.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(ApiError::Status { status: 404, .. }) => ErrorKind::NotFound,
            Self::Api(ApiError::NoFiles | ApiError::UnsupportedFile { .. }) => ErrorKind::Upload,
            Self::Api(ApiError::TooFewAnalyses { .. }) => ErrorKind::Validation,
            Self::Api(_) => ErrorKind::Network,
            Self::Image(_) => ErrorKind::Network,
            Self::Renderer(_) => ErrorKind::Renderer,
            Self::Route(RouteError::Unknown { .. }) => ErrorKind::NotFound,
            Self::Color(_)
            | Self::Palette(_)
            | Self::State(_)
            | Self::Export(_)
            | Self::Route(_)
            | Self::View(_)
            | Self::Session(_)
            | Self::Io(_)
            | Self::Json(_) => ErrorKind::Validation,
        }
    }
}

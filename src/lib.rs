pub mod api;
pub mod audit;
pub mod chart;
pub mod color;
pub mod config;
pub mod contrast;
pub mod error;
pub mod export;
pub mod ligand;
pub mod logging;
pub mod notification;
pub mod palette;
pub mod renderer;
pub mod report;
pub mod route;
pub mod session;
pub mod state;
pub mod view;
pub mod visibility;

pub use error::{AppError, AppResult};

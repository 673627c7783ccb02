//! Seam between the molecule viewer and whatever draws it.
//!
//! The viewer depends on two scripts that are loaded on demand. Call sites
//! only talk to [`ExternalRenderer`], so a bundled renderer can replace the
//! script-injected one without touching them.

use std::fmt;

use thiserror::Error;

use crate::api::AnalysisResult;

pub const JQUERY_SRC: &str = "https://code.jquery.com/jquery-3.6.0.min.js";
pub const MOL3D_SRC: &str = "https://3Dmol.csb.pitt.edu/build/3Dmol-min.js";
pub const MOL3D_SYMBOL: &str = "$3Dmol";

/// A script and the global it defines once evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptDependency {
    pub src: &'static str,
    pub global: &'static str,
}

/// Load order matters: 3Dmol needs jQuery.
pub const VIEWER_DEPENDENCIES: [ScriptDependency; 2] = [
    ScriptDependency {
        src: JQUERY_SRC,
        global: "jQuery",
    },
    ScriptDependency {
        src: MOL3D_SRC,
        global: MOL3D_SYMBOL,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to load script {src}: {reason}")]
    ScriptFailed { src: String, reason: String },
    #[error("{symbol} failed to load")]
    SymbolMissing { symbol: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RendererError {
    #[error("Failed to load 3D viewer: {0}")]
    Load(#[from] LoadError),
    #[error("renderer is not loaded")]
    NotLoaded,
    #[error("No PDBQT data provided")]
    EmptyModel,
    #[error("viewer rejected the scene: {reason}")]
    Viewer { reason: String },
}

pub type RendererResult<T> = std::result::Result<T, RendererError>;

/// Proof that the renderer's dependencies are available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererHandle {
    pub symbol: &'static str,
    pub injected: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeModel {
    pub ligand_name: String,
    pub pdbqt: String,
}

impl MoleculeModel {
    pub fn new(ligand_name: impl Into<String>, pdbqt: impl Into<String>) -> Self {
        Self {
            ligand_name: ligand_name.into(),
            pdbqt: pdbqt.into(),
        }
    }

    /// Pose for `ligand_name` from an analysis, if the backend returned one.
    pub fn from_analysis(analysis: &AnalysisResult, ligand_name: &str) -> Option<Self> {
        analysis
            .pdbqt_for(ligand_name)
            .map(|pdbqt| Self::new(ligand_name, pdbqt))
    }

    pub fn is_empty(&self) -> bool {
        self.pdbqt.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub background: String,
    pub color_scheme: String,
    pub stick_radius: f64,
    pub sphere_scale: f64,
    pub spin: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            color_scheme: "Jmol".to_string(),
            stick_radius: 0.2,
            sphere_scale: 0.3,
            spin: true,
        }
    }
}

/// Steps sent to the viewer for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    Clear,
    CreateViewer { background: String },
    AddModel { data: String, format: &'static str },
    SetStyle {
        color_scheme: String,
        stick_radius: f64,
        sphere_scale: f64,
    },
    ZoomToFit,
    Render,
    Rotate { degrees: f64, axis: char },
    Spin(bool),
}

pub trait ExternalRenderer {
    fn load(&mut self) -> RendererResult<RendererHandle>;
    fn render(&mut self, model: &MoleculeModel, style: &RenderStyle) -> RendererResult<()>;
    fn dispose(&mut self);
}

/// Host environment that evaluates scripts and runs viewer commands.
pub trait ScriptLoader {
    fn has_script(&self, src: &str) -> bool;
    fn inject(&mut self, src: &str) -> Result<(), String>;
    fn has_global(&self, symbol: &str) -> bool;
    fn execute(&mut self, commands: &[ViewerCommand]) -> Result<(), String>;
    fn clear(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Ready(RendererHandle),
    Disposed,
}

pub struct ScriptRenderer<L: ScriptLoader> {
    loader: L,
    phase: Phase,
}

impl<L: ScriptLoader> ScriptRenderer<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            phase: Phase::Idle,
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    fn ensure_dependencies(&mut self) -> Result<RendererHandle, LoadError> {
        let mut injected = Vec::new();
        for dependency in VIEWER_DEPENDENCIES {
            if self.loader.has_global(dependency.global) || self.loader.has_script(dependency.src)
            {
                tracing::debug!(src = dependency.src, "script already present");
                continue;
            }
            tracing::debug!(src = dependency.src, "injecting script");
            self.loader
                .inject(dependency.src)
                .map_err(|reason| LoadError::ScriptFailed {
                    src: dependency.src.to_string(),
                    reason,
                })?;
            injected.push(dependency.src);
        }

        if !self.loader.has_global(MOL3D_SYMBOL) {
            return Err(LoadError::SymbolMissing {
                symbol: MOL3D_SYMBOL.to_string(),
            });
        }
        Ok(RendererHandle {
            symbol: MOL3D_SYMBOL,
            injected,
        })
    }
}

impl<L: ScriptLoader> ExternalRenderer for ScriptRenderer<L> {
    fn load(&mut self) -> RendererResult<RendererHandle> {
        if let Phase::Ready(handle) = &self.phase {
            return Ok(handle.clone());
        }
        match self.ensure_dependencies() {
            Ok(handle) => {
                tracing::info!(injected = handle.injected.len(), "3D viewer ready");
                self.phase = Phase::Ready(handle.clone());
                Ok(handle)
            }
            Err(err) => {
                tracing::warn!(%err, "3D viewer failed to load");
                Err(err.into())
            }
        }
    }

    fn render(&mut self, model: &MoleculeModel, style: &RenderStyle) -> RendererResult<()> {
        if !self.is_loaded() {
            return Err(RendererError::NotLoaded);
        }
        if model.is_empty() {
            return Err(RendererError::EmptyModel);
        }

        let commands = scene_commands(model, style);
        tracing::debug!(
            ligand = model.ligand_name.as_str(),
            steps = commands.len(),
            "rendering molecule"
        );
        self.loader
            .execute(&commands)
            .map_err(|reason| RendererError::Viewer { reason })
    }

    fn dispose(&mut self) {
        if self.is_loaded() {
            self.loader.clear();
            tracing::debug!("3D viewer disposed");
        }
        self.phase = Phase::Disposed;
    }
}

impl<L: ScriptLoader> fmt::Debug for ScriptRenderer<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRenderer")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

fn scene_commands(model: &MoleculeModel, style: &RenderStyle) -> Vec<ViewerCommand> {
    let mut commands = vec![
        ViewerCommand::Clear,
        ViewerCommand::CreateViewer {
            background: style.background.clone(),
        },
        ViewerCommand::AddModel {
            data: model.pdbqt.clone(),
            format: "pdbqt",
        },
        ViewerCommand::SetStyle {
            color_scheme: style.color_scheme.clone(),
            stick_radius: style.stick_radius,
            sphere_scale: style.sphere_scale,
        },
        ViewerCommand::ZoomToFit,
        ViewerCommand::Render,
    ];
    if style.spin {
        commands.push(ViewerCommand::Rotate {
            degrees: 90.0,
            axis: 'y',
        });
        commands.push(ViewerCommand::Spin(true));
    }
    commands
}

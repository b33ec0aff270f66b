use thiserror::Error;

/// Failures of the emulation layer.
///
/// Setup failures disable the component that raised them; per-frame read
/// paths turn them into sentinel values instead of propagating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoveError {
    /// The platform or the shader cannot run the effect. Terminal until the
    /// owning component is re-enabled.
    #[error("not supported on this platform: {0}")]
    PlatformUnsupported(String),

    /// A shader, template or other reference needed at setup is absent.
    #[error("missing resource: {0}")]
    MissingResource(String),

    /// Pose or gaze data was requested before the eye cameras exist.
    #[error("eye cameras have not been set up yet")]
    NotReady,
}

pub type FoveResult<T> = Result<T, FoveError>;

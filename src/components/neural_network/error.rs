use thiserror::Error;

/// Reasons a backdrop instance cannot start. None of them reach the host page;
/// the component logs the error and leaves its canvas blank.
#[derive(Debug, Error)]
pub enum SurfaceError {
	#[error("no global window")]
	NoWindow,
	#[error("2d drawing context unavailable")]
	ContextUnavailable,
	#[error("failed to register resize listener")]
	Listener,
}

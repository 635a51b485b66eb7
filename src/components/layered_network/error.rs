use thiserror::Error;

/// Browser environment failures. None of these reach the host page.
#[derive(Error, Debug)]
pub enum SurfaceError {
	#[error("no window available")]
	NoWindow,

	#[error("canvas has no 2d context: {0}")]
	NoContext(String),

	#[error("resize observer unavailable: {0}")]
	Observer(String),
}

impl SurfaceError {
	pub(super) fn context(err: wasm_bindgen::JsValue) -> Self {
		Self::NoContext(format!("{:?}", err))
	}

	pub(super) fn observer(err: wasm_bindgen::JsValue) -> Self {
		Self::Observer(format!("{:?}", err))
	}
}

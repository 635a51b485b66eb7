mod component;
mod error;
mod frame_loop;
mod layout;
mod render;
mod session;
mod types;
mod wave;

pub use component::LayeredNetworkCanvas;
pub use types::default_layers;

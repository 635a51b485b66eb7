/// One stage of the network as supplied by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerSpec {
	pub count: usize,
	pub color: String,
	pub labels: Vec<String>,
}

impl LayerSpec {
	pub fn new(count: usize, color: impl Into<String>) -> Self {
		Self {
			count,
			color: color.into(),
			labels: Vec::new(),
		}
	}

	pub fn with_labels<I, S>(mut self, labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.labels = labels.into_iter().map(Into::into).collect();
		self
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.width <= 0.0 || self.height <= 0.0
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
	pub max_network_width: f64,
	pub width_fraction: f64,
	pub margin: f64,
}

impl Default for LayoutParams {
	fn default() -> Self {
		Self {
			max_network_width: 400.0,
			width_fraction: 0.8,
			margin: 20.0,
		}
	}
}

/// Tuning of the sweep. Purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveParams {
	/// Wave advance per frame, in edge indices.
	pub frame_step: u64,
	pub window: i64,
	/// Idle edge indices appended to the cycle so the wave leaves the graph before restarting.
	pub cycle_padding: u64,
	pub layer_delay: i64,
	pub particle_speed: f64,
}

impl Default for WaveParams {
	fn default() -> Self {
		Self {
			frame_step: 3,
			window: 15,
			cycle_padding: 60,
			layer_delay: 20,
			particle_speed: 0.05,
		}
	}
}

/// The 6/8/6/4 network shown on the dashboard.
pub fn default_layers() -> Vec<LayerSpec> {
	vec![
		LayerSpec::new(6, "#3b82f6").with_labels([
			"Passengers",
			"Weather",
			"Track",
			"Crew",
			"Delays",
			"Events",
		]),
		LayerSpec::new(8, "#8b5cf6"),
		LayerSpec::new(6, "#a855f7"),
		LayerSpec::new(4, "#10b981").with_labels(["Schedule", "Routing", "Capacity", "Alerts"]),
	]
}

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::layout::Graph;
use super::render::{Surface, render};
use super::types::{LayerSpec, LayoutParams, Size, WaveParams};
use super::wave::WaveDriver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
	Unmounted,
	Mounted,
	TornDown,
}

/// What the loop should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
	/// Wave advanced and painted; schedule another frame.
	Continue,
	/// Resting frame painted; the loop may park.
	Rested,
	/// Resting frame already on screen.
	Idle,
	/// Not mounted or torn down.
	Stopped,
}

impl TickOutcome {
	pub fn keep_running(self) -> bool {
		self == TickOutcome::Continue
	}
}

/// One mounted lifetime of the canvas: graph, driver, and teardown state.
pub struct NetworkSession {
	layers: Vec<LayerSpec>,
	layout: LayoutParams,
	driver: WaveDriver,
	rng: SmallRng,
	graph: Option<Graph>,
	phase: Phase,
	needs_paint: bool,
}

impl NetworkSession {
	pub fn new(layers: Vec<LayerSpec>, layout: LayoutParams, wave: WaveParams, seed: u64) -> Self {
		Self {
			layers,
			layout,
			driver: WaveDriver::new(wave),
			rng: SmallRng::seed_from_u64(seed),
			graph: None,
			phase: Phase::Unmounted,
			needs_paint: false,
		}
	}

	#[cfg(test)]
	pub fn graph(&self) -> Option<&Graph> {
		self.graph.as_ref()
	}

	pub fn frame(&self) -> u64 {
		self.driver.frame()
	}

	pub fn is_torn_down(&self) -> bool {
		self.phase == Phase::TornDown
	}

	pub fn mount(&mut self, size: Size) {
		if self.phase != Phase::Unmounted {
			return;
		}
		self.phase = Phase::Mounted;
		self.rebuild(size);
		info!("Layered network mounted at {}x{}", size.width, size.height);
	}

	/// Rebuilds the graph wholesale for a new surface size. Returns whether a rebuild happened.
	pub fn resize(&mut self, size: Size) -> bool {
		if self.phase != Phase::Mounted {
			return false;
		}
		if self.graph.as_ref().is_some_and(|g| g.size() == size) {
			return false;
		}
		self.rebuild(size);
		true
	}

	fn rebuild(&mut self, size: Size) {
		let graph = Graph::build(size, &self.layers, &self.layout, &mut self.rng);
		debug!(
			"Built {} nodes, {} edges for {}x{}",
			graph.nodes().len(),
			graph.edges().len(),
			size.width,
			size.height
		);
		self.graph = Some(graph);
		self.needs_paint = true;
	}

	/// Updates activity, then paints the same frame.
	pub fn tick<S: Surface>(&mut self, active: bool, surface: &mut S) -> TickOutcome {
		if self.phase != Phase::Mounted {
			return TickOutcome::Stopped;
		}
		let Some(graph) = self.graph.as_mut() else {
			return TickOutcome::Stopped;
		};

		if active {
			self.driver.step(graph, true);
			render(graph, self.driver.particle_progress(), surface);
			self.needs_paint = false;
			return TickOutcome::Continue;
		}

		if graph.is_resting() && !self.needs_paint {
			return TickOutcome::Idle;
		}
		self.driver.step(graph, false);
		render(graph, self.driver.particle_progress(), surface);
		self.needs_paint = false;
		TickOutcome::Rested
	}

	/// Drops the graph; every later call is a no-op.
	pub fn teardown(&mut self) {
		if self.phase == Phase::TornDown {
			return;
		}
		self.phase = Phase::TornDown;
		self.graph = None;
		info!("Layered network torn down after {} frames", self.frame());
	}
}

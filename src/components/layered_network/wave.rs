use super::layout::Graph;
use super::types::WaveParams;

/// Frame counter driving the left-to-right sweep.
#[derive(Clone, Debug, Default)]
pub struct WaveDriver {
	pub params: WaveParams,
	frame: u64,
}

impl WaveDriver {
	pub fn new(params: WaveParams) -> Self {
		Self { params, frame: 0 }
	}

	pub fn frame(&self) -> u64 {
		self.frame
	}

	/// Advances one frame and relights `graph`. Inactive steps only clear the flags.
	/// Returns whether the wave was evaluated.
	pub fn step(&mut self, graph: &mut Graph, active: bool) -> bool {
		if !active {
			if !graph.is_resting() {
				graph.rest();
			}
			return false;
		}

		self.frame += 1;
		let position = self.wave_position(graph.edges().len());
		let params = self.params;
		graph.light_edges(|index, _, source_layer| {
			is_lit(&params, index, source_layer, position)
		});
		true
	}

	pub fn wave_position(&self, edge_count: usize) -> i64 {
		let cycle = edge_count as u64 + self.params.cycle_padding;
		if cycle == 0 {
			return 0;
		}
		(self.frame.wrapping_mul(self.params.frame_step) % cycle) as i64
	}

	/// Position of the particle along every lit edge, in [0, 1).
	pub fn particle_progress(&self) -> f64 {
		(self.frame as f64 * self.params.particle_speed).rem_euclid(1.0)
	}
}

pub fn is_lit(params: &WaveParams, index: usize, source_layer: usize, position: i64) -> bool {
	let head = position - source_layer as i64 * params.layer_delay;
	let index = index as i64;
	index < head && index > head - params.window
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::layered_network::types::{LayoutParams, Size, default_layers};

	fn graph() -> Graph {
		let mut rng = SmallRng::seed_from_u64(42);
		Graph::build(
			Size::new(400.0, 300.0),
			&default_layers(),
			&LayoutParams::default(),
			&mut rng,
		)
	}

	fn lit_indices(graph: &Graph) -> Vec<usize> {
		graph
			.edges()
			.iter()
			.enumerate()
			.filter(|(_, e)| e.active)
			.map(|(i, _)| i)
			.collect()
	}

	#[test]
	fn test_inactive_steps_never_light_or_advance() {
		let mut graph = graph();
		let mut driver = WaveDriver::default();
		for _ in 0..200 {
			assert!(!driver.step(&mut graph, false));
			assert!(graph.is_resting());
		}
		assert_eq!(driver.frame(), 0);
	}

	#[test]
	fn test_first_active_frame_lights_leading_edges() {
		let mut graph = graph();
		let mut driver = WaveDriver::default();
		assert!(driver.step(&mut graph, true));
		assert_eq!(driver.frame(), 1);
		assert_eq!(lit_indices(&graph), vec![0, 1, 2]);
	}

	#[test]
	fn test_wave_position_wraps_with_padding() {
		let mut graph = graph();
		let mut driver = WaveDriver::default();
		// cycle = 120 + 60 = 180, 60 frames * 3 = 180 wraps to 0
		for _ in 0..60 {
			driver.step(&mut graph, true);
		}
		assert_eq!(driver.wave_position(120), 0);
		assert!(lit_indices(&graph).is_empty());
		driver.step(&mut graph, true);
		assert_eq!(driver.wave_position(120), 3);
	}

	#[test]
	fn test_window_spans_fifteen_index_units() {
		let params = WaveParams::default();
		for layer in 0..4 {
			for position in 0..400 {
				let lit: Vec<i64> = (0..1000usize)
					.filter(|&i| is_lit(&params, i, layer, position))
					.map(|i| i as i64)
					.collect();
				if let (Some(&lo), Some(&hi)) = (lit.first(), lit.last()) {
					assert_eq!(lit.len() as i64, hi - lo + 1, "window is contiguous");
					// open interval (head - 15, head)
					assert!(hi - lo < params.window);
					let head = position - layer as i64 * params.layer_delay;
					assert_eq!(hi, head - 1);
					if head - params.window >= 0 {
						assert_eq!(lit.len(), (params.window - 1) as usize, "head {}", head);
					}
				}
			}
		}
	}

	#[test]
	fn test_unclipped_window_lights_fourteen_edges() {
		let params = WaveParams::default();
		let lit: Vec<usize> = (0..200usize)
			.filter(|&i| is_lit(&params, i, 0, 100))
			.collect();
		assert_eq!(lit, (86..100).collect::<Vec<_>>());
	}

	#[test]
	fn test_layer_delay_holds_back_later_layers() {
		let params = WaveParams::default();
		// 60 - 20 = 40: layer 1 edges lit only below 40
		assert!(is_lit(&params, 50, 0, 60));
		assert!(!is_lit(&params, 50, 1, 60));
		assert!(is_lit(&params, 30, 1, 60));
	}

	#[test]
	fn test_nodes_follow_incident_edges_every_frame() {
		let mut graph = graph();
		let mut driver = WaveDriver::default();
		for _ in 0..250 {
			driver.step(&mut graph, true);
			for (idx, node) in graph.nodes().iter().enumerate() {
				let any = graph
					.incident_edges(idx)
					.iter()
					.any(|&e| graph.edges()[e].active);
				assert_eq!(node.active, any, "node {} frame {}", idx, driver.frame());
			}
		}
	}

	#[test]
	fn test_strength_is_stable_across_frames() {
		let mut graph = graph();
		let before: Vec<f64> = graph.edges().iter().map(|e| e.strength).collect();
		let mut driver = WaveDriver::default();
		for i in 0..100 {
			driver.step(&mut graph, i % 3 != 0);
		}
		let after: Vec<f64> = graph.edges().iter().map(|e| e.strength).collect();
		assert_eq!(before, after);
	}

	#[test]
	fn test_particle_progress_wraps() {
		let mut driver = WaveDriver::default();
		let mut graph = graph();
		assert_eq!(driver.particle_progress(), 0.0);
		for _ in 0..10 {
			driver.step(&mut graph, true);
		}
		assert!((driver.particle_progress() - 0.5).abs() < 1e-9);
		for _ in 0..15 {
			driver.step(&mut graph, true);
		}
		let p = driver.particle_progress();
		assert!((0.0..1.0).contains(&p));
		assert!((p - 0.25).abs() < 1e-9);
	}
}

use rand::Rng;

use super::types::{LayerSpec, LayoutParams, Size};

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub layer: usize,
	pub x: f64,
	pub y: f64,
	pub color: String,
	pub label: Option<String>,
	pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	pub from: usize,
	pub to: usize,
	pub strength: f64,
	pub active: bool,
}

/// Nodes and edges of one layout pass. Rebuilt, never patched, on resize.
#[derive(Clone, Debug)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	// incident edge indices per node
	incident: Vec<Vec<usize>>,
	layer_count: usize,
	size: Size,
}

impl Graph {
	pub fn build<R: Rng>(
		size: Size,
		layers: &[LayerSpec],
		params: &LayoutParams,
		rng: &mut R,
	) -> Self {
		let network_width = params
			.max_network_width
			.min(size.width * params.width_fraction);
		let start_x = (size.width - network_width) / 2.0;
		let layer_spacing = network_width / layers.len().saturating_sub(1).max(1) as f64;
		let usable_height = (size.height - 2.0 * params.margin).max(0.0);

		let mut nodes = Vec::with_capacity(layers.iter().map(|l| l.count).sum());
		let mut layer_starts = Vec::with_capacity(layers.len());
		for (layer_idx, layer) in layers.iter().enumerate() {
			layer_starts.push(nodes.len());
			let x = start_x + layer_spacing * layer_idx as f64;
			let spacing = usable_height / (layer.count + 1) as f64;
			for i in 0..layer.count {
				nodes.push(Node {
					layer: layer_idx,
					x,
					y: params.margin + spacing * (i + 1) as f64,
					color: layer.color.clone(),
					label: layer.labels.get(i).cloned(),
					active: false,
				});
			}
		}

		let mut edges = Vec::new();
		let mut incident = vec![Vec::new(); nodes.len()];
		for pair in 0..layers.len().saturating_sub(1) {
			let (src_start, dst_start) = (layer_starts[pair], layer_starts[pair + 1]);
			for from in src_start..src_start + layers[pair].count {
				for to in dst_start..dst_start + layers[pair + 1].count {
					incident[from].push(edges.len());
					incident[to].push(edges.len());
					edges.push(Edge {
						from,
						to,
						strength: rng.random::<f64>(),
						active: false,
					});
				}
			}
		}

		Self {
			nodes,
			edges,
			incident,
			layer_count: layers.len(),
			size,
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	pub fn size(&self) -> Size {
		self.size
	}

	pub fn layer_count(&self) -> usize {
		self.layer_count
	}

	#[cfg(test)]
	pub fn incident_edges(&self, node: usize) -> &[usize] {
		&self.incident[node]
	}

	pub fn is_boundary_layer(&self, layer: usize) -> bool {
		layer == 0 || layer + 1 == self.layer_count
	}

	/// Sets every edge flag from `lit(index, edge, source_layer)`, then derives node flags.
	pub fn light_edges<F>(&mut self, mut lit: F)
	where
		F: FnMut(usize, &Edge, usize) -> bool,
	{
		let nodes = &self.nodes;
		for (i, edge) in self.edges.iter_mut().enumerate() {
			let lit_now = lit(i, &*edge, nodes[edge.from].layer);
			edge.active = lit_now;
		}
		self.refresh_nodes();
	}

	pub fn rest(&mut self) {
		self.edges.iter_mut().for_each(|e| e.active = false);
		self.nodes.iter_mut().for_each(|n| n.active = false);
	}

	pub fn is_resting(&self) -> bool {
		self.edges.iter().all(|e| !e.active) && self.nodes.iter().all(|n| !n.active)
	}

	fn refresh_nodes(&mut self) {
		let edges = &self.edges;
		for (node, incident) in self.nodes.iter_mut().zip(&self.incident) {
			node.active = incident.iter().any(|&e| edges[e].active);
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::layered_network::types::default_layers;

	fn build(width: f64, height: f64, layers: &[LayerSpec]) -> Graph {
		let mut rng = SmallRng::seed_from_u64(7);
		Graph::build(
			Size::new(width, height),
			layers,
			&LayoutParams::default(),
			&mut rng,
		)
	}

	fn sized(counts: &[usize]) -> Vec<LayerSpec> {
		counts.iter().map(|&c| LayerSpec::new(c, "#123456")).collect()
	}

	#[test]
	fn test_edge_count_for_dashboard_layers() {
		let graph = build(400.0, 300.0, &default_layers());
		assert_eq!(graph.nodes().len(), 24);
		assert_eq!(graph.edges().len(), 6 * 8 + 8 * 6 + 6 * 4);
		assert_eq!(graph.edges().len(), 120);
	}

	#[test]
	fn test_edge_count_matches_adjacent_products() {
		for counts in [vec![1], vec![3, 2], vec![2, 5, 1, 7], vec![4, 4, 4, 4, 4]] {
			let graph = build(500.0, 500.0, &sized(&counts));
			let expected: usize = counts.windows(2).map(|w| w[0] * w[1]).sum();
			assert_eq!(graph.edges().len(), expected, "counts {:?}", counts);
		}
	}

	#[test]
	fn test_edges_only_join_adjacent_layers_in_order() {
		let graph = build(400.0, 300.0, &sized(&[2, 3, 2]));
		let pairs: Vec<_> = graph.edges().iter().map(|e| (e.from, e.to)).collect();
		assert_eq!(
			pairs,
			vec![
				(0, 2),
				(0, 3),
				(0, 4),
				(1, 2),
				(1, 3),
				(1, 4),
				(2, 5),
				(2, 6),
				(3, 5),
				(3, 6),
				(4, 5),
				(4, 6),
			]
		);
		for edge in graph.edges() {
			assert_eq!(graph.nodes()[edge.from].layer + 1, graph.nodes()[edge.to].layer);
		}
	}

	#[test]
	fn test_horizontal_layout_centers_network() {
		let graph = build(400.0, 300.0, &sized(&[1, 1, 1, 1, 1]));
		let xs: Vec<f64> = graph.nodes().iter().map(|n| n.x).collect();
		// 400 * 0.8 = 320 wide, starting at 40
		assert_eq!(xs, vec![40.0, 120.0, 200.0, 280.0, 360.0]);
	}

	#[test]
	fn test_vertical_spacing_is_even_within_margin() {
		let graph = build(400.0, 340.0, &sized(&[3]));
		let ys: Vec<f64> = graph.nodes().iter().map(|n| n.y).collect();
		assert_eq!(ys, vec![95.0, 170.0, 245.0]);
		assert!(ys.iter().all(|&y| y > 20.0 && y < 320.0));
	}

	#[test]
	fn test_resize_is_layout_only() {
		let layers = default_layers();
		let narrow = build(400.0, 300.0, &layers);
		let wide = build(800.0, 300.0, &layers);

		assert_eq!(narrow.nodes().len(), wide.nodes().len());
		assert_eq!(narrow.edges().len(), wide.edges().len());

		// 800 * 0.8 exceeds the cap of 400
		let first = wide.nodes().first().unwrap().x;
		let last = wide.nodes().last().unwrap().x;
		assert_eq!(first, 200.0);
		assert!((last - first - 400.0).abs() < 1e-9);
		assert_eq!(narrow.nodes()[0].x, 40.0);
	}

	#[test]
	fn test_zero_size_surface_is_degenerate_not_fatal() {
		let graph = build(0.0, 0.0, &default_layers());
		assert_eq!(graph.edges().len(), 120);
		assert!(graph.size().is_empty());
		assert!(graph.nodes().iter().all(|n| n.x.is_finite() && n.y.is_finite()));
	}

	#[test]
	fn test_single_layer_has_no_edges() {
		let graph = build(300.0, 300.0, &sized(&[4]));
		assert!(graph.edges().is_empty());
		// a lone layer sits at the start of the 240px network
		assert!(graph.nodes().iter().all(|n| n.x == 30.0));
	}

	#[test]
	fn test_labels_and_strengths() {
		let layers = vec![
			LayerSpec::new(3, "#ff0000").with_labels(["a", "b"]),
			LayerSpec::new(2, "#00ff00"),
		];
		let graph = build(400.0, 300.0, &layers);
		let labels: Vec<_> = graph.nodes().iter().map(|n| n.label.as_deref()).collect();
		assert_eq!(labels, vec![Some("a"), Some("b"), None, None, None]);
		assert_eq!(graph.nodes()[3].color, "#00ff00");
		assert!(graph.edges().iter().all(|e| (0.0..1.0).contains(&e.strength)));
	}

	#[test]
	fn test_incident_index_covers_every_edge_endpoint() {
		let graph = build(400.0, 300.0, &default_layers());
		for (i, edge) in graph.edges().iter().enumerate() {
			assert!(graph.incident_edges(edge.from).contains(&i));
			assert!(graph.incident_edges(edge.to).contains(&i));
		}
		// a hidden node touches both neighbouring layers
		assert_eq!(graph.incident_edges(6).len(), 6 + 6);
	}

	#[test]
	fn test_light_edges_derives_node_activity() {
		let mut graph = build(400.0, 300.0, &sized(&[2, 2]));
		graph.light_edges(|i, _, _| i == 1);
		let active: Vec<_> = graph.nodes().iter().map(|n| n.active).collect();
		// edge 1 joins node 0 to node 3
		assert_eq!(active, vec![true, false, false, true]);

		graph.rest();
		assert!(graph.is_resting());
	}

	#[test]
	fn test_boundary_layers() {
		let graph = build(400.0, 300.0, &default_layers());
		assert!(graph.is_boundary_layer(0));
		assert!(!graph.is_boundary_layer(1));
		assert!(!graph.is_boundary_layer(2));
		assert!(graph.is_boundary_layer(3));
	}
}

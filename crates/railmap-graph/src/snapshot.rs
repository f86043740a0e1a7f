//! Read-only adjacency view over a [`Network`].
//!
//! Topology never changes after load, so the view is computed once and shared by seeding and
//! every relaxation tick.

use crate::network::{Network, ServiceKind};
use rustc_hash::FxBuildHasher;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<T> = hashbrown::HashSet<T, FxBuildHasher>;

/// Symmetric "is connected" relation over stations `0..len()`.
pub trait Adjacency {
    fn len(&self) -> usize;

    fn adjacent(&self, i: usize, j: usize) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dense boolean matrix, handy when the caller has no [`Network`] at hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    n: usize,
    cells: Vec<bool>,
}

impl AdjacencyMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![false; n * n],
        }
    }

    /// Builds a matrix from undirected index pairs. Out-of-range pairs are ignored.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut m = Self::new(n);
        for &(i, j) in edges {
            m.connect(i, j);
        }
        m
    }

    pub fn connect(&mut self, i: usize, j: usize) {
        if i >= self.n || j >= self.n || i == j {
            return;
        }
        self.cells[i * self.n + j] = true;
        self.cells[j * self.n + i] = true;
    }
}

impl Adjacency for AdjacencyMatrix {
    fn len(&self) -> usize {
        self.n
    }

    fn adjacent(&self, i: usize, j: usize) -> bool {
        i < self.n && j < self.n && self.cells[i * self.n + j]
    }
}

/// One drawn connection between two stations, deduplicated across both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    /// Station whose platform was seen first in station order.
    pub a: usize,
    pub b: usize,
    pub a_platform: String,
    /// `"?"` when `b` has no platform back to `a`.
    pub b_platform: String,
    pub kind: ServiceKind,
    pub service: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    ids: Vec<String>,
    index: HashMap<String, usize>,
    successors: Vec<Vec<usize>>,
    neighbors: Vec<Vec<usize>>,
    links: Vec<Link>,
}

impl GraphSnapshot {
    pub fn build(network: &Network) -> Self {
        let ids: Vec<String> = network.shortcodes().map(str::to_string).collect();
        let mut index: HashMap<String, usize> = HashMap::default();
        for (i, id) in ids.iter().enumerate() {
            index.insert(id.clone(), i);
        }

        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
        let mut neighbors: Vec<Vec<usize>> = vec![Vec::new(); ids.len()];
        let mut links: Vec<Link> = Vec::new();
        let mut linked: HashSet<(usize, usize)> = HashSet::default();

        for (from_idx, (from, station)) in network.stations().enumerate() {
            for (platform, record) in &station.platforms {
                let Some(&to_idx) = index.get(record.to.as_str()) else {
                    tracing::warn!(
                        from,
                        platform = platform.as_str(),
                        to = record.to.as_str(),
                        "platform leads to an unknown station; ignoring it"
                    );
                    continue;
                };
                if to_idx == from_idx {
                    continue;
                }
                successors[from_idx].push(to_idx);
                neighbors[from_idx].push(to_idx);
                neighbors[to_idx].push(from_idx);

                let key = (from_idx.min(to_idx), from_idx.max(to_idx));
                if !linked.insert(key) {
                    continue;
                }
                let back = network
                    .station(&record.to)
                    .and_then(|dest| dest.platforms.iter().find(|(_, p)| p.to == from))
                    .map(|(id, _)| id.clone());
                let b_platform = back.unwrap_or_else(|| {
                    tracing::warn!(
                        from,
                        to = record.to.as_str(),
                        "connection has no platform leading back"
                    );
                    "?".to_string()
                });
                links.push(Link {
                    a: from_idx,
                    b: to_idx,
                    a_platform: platform.clone(),
                    b_platform,
                    kind: record.kind.clone(),
                    service: record.service.clone(),
                });
            }
        }

        for list in successors.iter_mut().chain(neighbors.iter_mut()) {
            list.sort_unstable();
            list.dedup();
        }

        Self {
            ids,
            index,
            successors,
            neighbors,
            links,
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn id(&self, i: usize) -> Option<&str> {
        self.ids.get(i).map(String::as_str)
    }

    pub fn index_of(&self, shortcode: &str) -> Option<usize> {
        self.index.get(shortcode).copied()
    }

    /// Symmetric neighbors of `i`, ascending.
    pub fn neighbors(&self, i: usize) -> &[usize] {
        self.neighbors.get(i).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `i` itself has a platform leading to `j`.
    pub fn directed(&self, i: usize, j: usize) -> bool {
        self.successors
            .get(i)
            .is_some_and(|s| s.binary_search(&j).is_ok())
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn degree(&self, i: usize) -> usize {
        self.neighbors(i).len()
    }
}

impl Adjacency for GraphSnapshot {
    fn len(&self) -> usize {
        self.ids.len()
    }

    fn adjacent(&self, i: usize, j: usize) -> bool {
        self.neighbors
            .get(i)
            .is_some_and(|n| n.binary_search(&j).is_ok())
    }
}

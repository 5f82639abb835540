// Copyright (c) 2022 Bastiaan Marinus van de Weerd

use std::collections::HashMap;


const START_CAVE: &str = "start";
const END_CAVE: &str = "end";

const MASK_BITS: usize = u64::BITS as usize;


#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum Size {
	/// `bit` is the cave’s position in `Walk::visited`.
	Small { bit: usize },
	Large,
}

struct Cave<'a> {
	name: &'a str,
	size: Size,
	/// Indices into `CaveSystem::caves`, without duplicates.
	neighbors: Vec<usize>,
}

struct CaveSystem<'a> {
	caves: Vec<Cave<'a>>,
	indices: HashMap<&'a str, usize>,
	num_small_caves: usize,
}

#[derive(Debug)]
#[allow(dead_code)]
enum MalformedEdgeKind<'a> {
	EmptyCave,
	Loop(&'a str),
	LargeCaves(&'a str, &'a str),
}

#[derive(Debug)]
#[allow(dead_code)]
enum CaveSystemError<'a> {
	MalformedEdge { edge: usize, kind: MalformedEdgeKind<'a> },
}

impl<'a> CaveSystem<'a> {
	fn try_from_edges(edges: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<Self, CaveSystemError<'a>> {
		use {CaveSystemError::*, MalformedEdgeKind::*};

		let mut system = CaveSystem { caves: Vec::new(), indices: HashMap::new(), num_small_caves: 0 };
		let mut large_edges = Vec::new();
		for (e, (a, b)) in edges.into_iter().enumerate() {
			let malformed = |kind| MalformedEdge { edge: e + 1, kind };
			if a.is_empty() || b.is_empty() { return Err(malformed(EmptyCave)) }
			if a == b { return Err(malformed(Loop(a))) }

			let (a, b) = (system.index_or_insert(a), system.index_or_insert(b));
			if let (Size::Large, Size::Large) = (system.caves[a].size, system.caves[b].size) {
				large_edges.push((e + 1, a, b));
			}

			system.connect(a, b);
			system.connect(b, a);
		}

		// Two adjacent large caves on the way to the end allow endless walks
		let walkable = system.walkable_from_start();
		if let Some(&(edge, a, b)) = large_edges.iter().find(|&&(_, a, _)| walkable[a]) {
			let kind = LargeCaves(system.caves[a].name, system.caves[b].name);
			return Err(MalformedEdge { edge, kind })
		}

		Ok(system)
	}

	fn index_or_insert(&mut self, name: &'a str) -> usize {
		use std::collections::hash_map::Entry::*;
		match self.indices.entry(name) {
			Occupied(entry) => *entry.get(),
			Vacant(entry) => {
				let size = if name.starts_with(|c: char| c.is_lowercase()) {
					let bit = self.num_small_caves;
					self.num_small_caves += 1;
					Size::Small { bit }
				} else {
					Size::Large
				};
				let index = self.caves.len();
				self.caves.push(Cave { name, size, neighbors: Vec::new() });
				*entry.insert(index)
			}
		}
	}

	fn connect(&mut self, from: usize, to: usize) {
		let neighbors = &mut self.caves[from].neighbors;
		if !neighbors.contains(&to) { neighbors.push(to) }
	}

	/// Flags the caves a walk could enter, ignoring revisit rules. Nothing is
	/// entered past the end cave.
	fn walkable_from_start(&self) -> Vec<bool> {
		let mut walkable = vec![false; self.caves.len()];
		let Some(&start) = self.indices.get(START_CAVE) else { return walkable };
		let end = self.indices.get(END_CAVE).copied();

		let mut queue = std::collections::VecDeque::new();
		walkable[start] = true;
		queue.push_back(start);
		while let Some(cave) = queue.pop_front() {
			if Some(cave) == end { continue }
			for &next in &self.caves[cave].neighbors {
				if !std::mem::replace(&mut walkable[next], true) { queue.push_back(next) }
			}
		}
		walkable
	}

	#[cfg(test)]
	fn size_of(&self, name: &str) -> Option<Size> {
		self.indices.get(name).map(|&c| self.caves[c].size)
	}

	fn search(&self, policy: RevisitPolicy) -> Result<(Search<'_, 'a>, usize, Walk), PathsError> {
		let start = *self.indices.get(START_CAVE).ok_or(PathsError::MissingStart)?;
		let end = self.indices.get(END_CAVE).copied();
		Ok((Search { system: self, start, end, policy }, start, Walk::new(self.num_small_caves)))
	}

	/// Counts the distinct walks from the start cave to the end cave.
	fn count_paths(&self, policy: RevisitPolicy) -> Result<usize, PathsError> {
		let (search, start, walk) = self.search(policy)?;
		Ok(search.paths_from(start, &walk))
	}

	/// Returns every distinct walk as its sequence of cave names.
	#[cfg(any(test, LOGGING))]
	fn walks(&self, policy: RevisitPolicy) -> Result<Vec<Vec<&'a str>>, PathsError> {
		let (search, start, walk) = self.search(policy)?;
		let mut walks = Vec::new();
		search.walks_from(start, &walk, &mut Vec::new(), &mut walks);
		Ok(walks)
	}
}

#[cfg(LOGGING)]
impl std::fmt::Display for CaveSystem<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use itertools::Itertools as _;
		for (c, cave) in self.caves.iter().enumerate() {
			if c > 0 { f.write_str("\n")? }
			write!(f, "{} ({}): {}",
				cave.name,
				if let Size::Small { .. } = cave.size { "small" } else { "large" },
				cave.neighbors.iter().map(|&n| self.caves[n].name).join(", "))?;
		}
		Ok(())
	}
}


#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(test, derive(Debug))]
enum RevisitPolicy {
	/// No small cave is entered twice.
	Strict,
	/// A single small cave (never the start) may be entered twice per walk.
	OneDoubleVisit,
}

#[derive(Debug)]
enum PathsError {
	MissingStart,
}

/// State of a single in-progress walk. Every branch of the search continues
/// with its own clone.
#[derive(Clone)]
struct Walk {
	/// One bit per small cave, `MASK_BITS` caves per word.
	visited: Vec<u64>,
	revisited: bool,
}

impl Walk {
	fn new(num_small_caves: usize) -> Self {
		Walk { visited: vec![0; num_small_caves.div_ceil(MASK_BITS)], revisited: false }
	}

	fn entering(&self, cave: &Cave, policy: RevisitPolicy) -> Option<Self> {
		let Size::Small { bit } = cave.size else { return Some(self.clone()) };
		let (word, mask) = (bit / MASK_BITS, 1 << (bit % MASK_BITS));
		if self.visited[word] & mask == 0 {
			let mut walk = self.clone();
			walk.visited[word] |= mask;
			Some(walk)
		} else if policy == RevisitPolicy::OneDoubleVisit && !self.revisited {
			Some(Walk { revisited: true, ..self.clone() })
		} else {
			None
		}
	}
}

struct Search<'s, 'a> {
	system: &'s CaveSystem<'a>,
	start: usize,
	end: Option<usize>,
	policy: RevisitPolicy,
}

impl<'s, 'a> Search<'s, 'a> {
	fn step(&self, to: usize, walk: &Walk) -> Option<Walk> {
		if to == self.start { return None }
		walk.entering(&self.system.caves[to], self.policy)
	}

	fn paths_from(&self, cave: usize, walk: &Walk) -> usize {
		if Some(cave) == self.end { return 1 }
		self.system.caves[cave].neighbors.iter()
			.filter_map(|&next| self.step(next, walk)
				.map(|walk| self.paths_from(next, &walk)))
			.sum()
	}

	#[cfg(any(test, LOGGING))]
	fn walks_from(&self, cave: usize, walk: &Walk, path: &mut Vec<&'a str>, walks: &mut Vec<Vec<&'a str>>) {
		path.push(self.system.caves[cave].name);
		if Some(cave) == self.end {
			walks.push(path.clone());
		} else {
			for &next in &self.system.caves[cave].neighbors {
				if let Some(walk) = self.step(next, walk) {
					self.walks_from(next, &walk, path, walks);
				}
			}
		}
		path.pop();
	}
}


fn input_cave_system_from_str(s: &str) -> CaveSystem<'_> {
	CaveSystem::try_from_edges(parsing::try_edges_from_str(s).unwrap()).unwrap()
}

fn input_cave_system() -> CaveSystem<'static> {
	input_cave_system_from_str(include_str!("day12.txt"))
}


fn part1and2_impl(input_cave_system: &CaveSystem, policy: RevisitPolicy) -> usize {
	#[cfg(LOGGING)]
	{
		use itertools::Itertools as _;
		println!("Cave system:\n{input_cave_system}");
		for walk in input_cave_system.walks(policy).unwrap() {
			println!("{}", walk.iter().join(","));
		}
	}

	input_cave_system.count_paths(policy).unwrap()
}

pub(crate) fn part1() -> usize {
	part1and2_impl(&input_cave_system(), RevisitPolicy::Strict)
}

pub(crate) fn part2() -> usize {
	part1and2_impl(&input_cave_system(), RevisitPolicy::OneDoubleVisit)
}


mod parsing {
	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum EdgeError {
		Format,
		Cave { column: usize, found: Option<char> },
	}

	fn try_edge_from_str(s: &str) -> Result<(&str, &str), EdgeError> {
		use {itertools::Itertools as _, EdgeError::*};

		fn valid_cave(s: &str, column: usize) -> Result<(), EdgeError> {
			if s.is_empty() { return Err(Cave { column, found: None }) }
			match s.chars().enumerate().find(|(_, c)| !c.is_ascii_alphabetic()) {
				Some((i, c)) => Err(Cave { column: column + i, found: Some(c) }),
				None => Ok(()),
			}
		}

		let (a, b) = s.split('-').collect_tuple().ok_or(Format)?;
		valid_cave(a, 1)?;
		valid_cave(b, a.chars().count() + 2)?;
		Ok((a, b))
	}

	#[allow(dead_code)]
	#[derive(Debug)]
	pub(super) enum EdgesError {
		Empty,
		Edge { line: usize, source: EdgeError },
	}

	pub(super) fn try_edges_from_str(s: &str) -> Result<Vec<(&str, &str)>, EdgesError> {
		if s.is_empty() { return Err(EdgesError::Empty) }
		s.lines()
			.enumerate()
			.map(|(l, line)| try_edge_from_str(line)
				.map_err(|e| EdgesError::Edge { line: l + 1, source: e }))
			.collect()
	}
}

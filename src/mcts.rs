//! Monte Carlo Tree Search (MCTS) with UCB1 selection.
//!
//! Each iteration runs four phases:
//! - Selection: descend from the root by UCB1 until a node without children
//! - Expansion: add one child per legal move (or a single pass child)
//! - Simulation: random playout from one of the new children
//! - Backpropagation: update visits and values on the path back to the root
//!
//! Nodes live in an arena ([`Tree`]) and refer to each other by index. Each node
//! gets its parent index once, at creation, so the tree can never form a cycle.
//!
//! A node's `value` is kept from the point of view of the colour that moved
//! into it, which is the colour choosing between it and its siblings.

use log::debug;

use crate::board::{Board, Color};
use crate::constants::{EXPLORATION, N_ITERATIONS, UCB_EPSILON, WIN_SCORE};
use crate::heuristics::{DEFAULT_HEURISTICS, Heuristic, evaluate_all};
use crate::player::Player;
use crate::playout::simulate;
use crate::position::Position;

/// Index of a node in the [`Tree`] arena.
pub type NodeId = usize;

/// A node in the MCTS search tree.
pub struct TreeNode {
    /// Board after `mv` was played
    pub board: Board,
    /// Colour to move from this node
    pub to_move: Color,
    /// Move that produced this node (`None` for the root and for passes)
    pub mv: Option<Position>,
    /// Parent index, `None` only for the root
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Number of visits
    pub visits: u32,
    /// Sum of playout results, signed for the colour that moved into this node
    pub value: i64,
    /// Static heuristic score of `board` for the mover, used for blending
    pub prior: f64,
    pub expanded: bool,
}

impl TreeNode {
    fn new(board: Board, to_move: Color, mv: Option<Position>, parent: Option<NodeId>) -> Self {
        Self {
            board,
            to_move,
            mv,
            parent,
            children: Vec::new(),
            visits: 0,
            value: 0,
            prior: 0.0,
            expanded: false,
        }
    }

    /// Colour whose move led to this node.
    #[inline]
    pub fn mover(&self) -> Color {
        self.to_move.opponent()
    }

    /// Mean playout result in [-1, 1] for the mover.
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.visits > 0 {
            self.value as f64 / self.visits as f64 / WIN_SCORE as f64
        } else {
            0.0
        }
    }
}

/// How the final move is picked from the root's children.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveSelection {
    /// Most visited child
    MostVisited,
    /// Highest value / visits
    BestAverage,
}

/// Parameters shared by every iteration of a search.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub exploration: f64,
    /// Weight of the static heuristic bonus in selection; 0 gives plain UCB1
    pub heuristic_weight: f64,
    pub heuristics: Vec<Heuristic>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: EXPLORATION,
            heuristic_weight: 0.0,
            heuristics: DEFAULT_HEURISTICS.to_vec(),
        }
    }
}

/// Arena holding every node of one search.
pub struct Tree {
    nodes: Vec<TreeNode>,
    /// Colour of the player running the search
    root_color: Color,
}

impl Tree {
    pub const ROOT: NodeId = 0;

    pub fn new(board: &Board, color: Color) -> Self {
        Self {
            nodes: vec![TreeNode::new(board.clone(), color, None, None)],
            root_color: color,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    fn push(&mut self, node: TreeNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        id
    }

    /// Add one child per legal move of the node's colour.
    ///
    /// A colour without moves in an unfinished game gets a single pass child.
    /// Finished games get no children. Expanding twice is a no-op.
    pub fn expand(&mut self, id: NodeId, config: &SearchConfig) {
        if self.nodes[id].expanded {
            return;
        }
        self.nodes[id].expanded = true;

        let color = self.nodes[id].to_move;
        let moves = self.nodes[id].board.legal_moves(color);
        let mut children = Vec::with_capacity(moves.len().max(1));

        if moves.is_empty() {
            if !self.nodes[id].board.has_legal_move(color.opponent()) {
                return;
            }
            let board = self.nodes[id].board.clone();
            children.push(TreeNode::new(board, color.opponent(), None, Some(id)));
        } else {
            for mv in moves {
                let mut board = self.nodes[id].board.clone();
                board.place_and_flip_discs(mv, color, true);
                children.push(TreeNode::new(board, color.opponent(), Some(mv), Some(id)));
            }
        }

        for mut child in children {
            if config.heuristic_weight != 0.0 {
                let prior = evaluate_all(&config.heuristics, &child.board, child.mover());
                child.prior = f64::from(prior);
            }
            let child_id = self.push(child);
            self.nodes[id].children.push(child_id);
        }
    }

    /// UCB1 score of `child`, optionally blended with its heuristic prior.
    ///
    /// The prior's influence fades as the child collects visits.
    fn ucb_urgency(&self, parent: &TreeNode, child: &TreeNode, config: &SearchConfig) -> f64 {
        let visits = f64::from(child.visits);
        let explore = ((f64::from(parent.visits) + 1.0).ln() / (visits + UCB_EPSILON)).sqrt();
        let mut urgency = child.mean() + config.exploration * explore;
        if config.heuristic_weight != 0.0 {
            urgency += config.heuristic_weight * child.prior / (visits + 1.0);
        }
        urgency
    }

    /// Child of `id` with the highest urgency; ties go to the first child.
    fn most_urgent(&self, id: NodeId, config: &SearchConfig) -> Option<NodeId> {
        let parent = &self.nodes[id];
        let mut best: Option<(NodeId, f64)> = None;
        for &c in &parent.children {
            let u = self.ucb_urgency(parent, &self.nodes[c], config);
            if best.is_none_or(|(_, b)| u > b) {
                best = Some((c, u));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Descend from the root to a node without children.
    pub fn tree_descend(&self, config: &SearchConfig) -> NodeId {
        let mut id = Self::ROOT;
        while let Some(next) = self.most_urgent(id, config) {
            id = next;
        }
        id
    }

    /// Propagate a playout result from `id` up to the root.
    ///
    /// `result` is from the root colour's point of view; it is added at nodes
    /// the root colour moved into and subtracted at the opponent's.
    pub fn tree_update(&mut self, id: NodeId, result: i32) {
        let mut current = Some(id);
        while let Some(i) = current {
            let node = &mut self.nodes[i];
            node.visits += 1;
            if node.mover() == self.root_color {
                node.value += i64::from(result);
            } else {
                node.value -= i64::from(result);
            }
            current = node.parent;
        }
    }

    /// Move of the root child chosen by `selection`.
    ///
    /// Returns `None` if the root has no children or the chosen child is a pass.
    pub fn best_move(&self, selection: MoveSelection) -> Option<Position> {
        let mut best: Option<&TreeNode> = None;
        for &c in &self.root().children {
            let child = &self.nodes[c];
            let better = match best {
                None => true,
                Some(b) => match selection {
                    MoveSelection::MostVisited => child.visits > b.visits,
                    MoveSelection::BestAverage => {
                        child.value as f64 / f64::from(child.visits.max(1))
                            > b.value as f64 / f64::from(b.visits.max(1))
                    }
                },
            };
            if better {
                best = Some(child);
            }
        }
        best.and_then(|c| c.mv)
    }

    /// Log statistics of the root's children.
    pub fn dump_children(&self) {
        for &c in &self.root().children {
            let child = &self.nodes[c];
            debug!(
                "move {} v={} value={} mean={:.3}",
                child.mv.map_or_else(|| "pass".to_string(), |p| p.to_string()),
                child.visits,
                child.value,
                child.mean()
            );
        }
    }
}

/// Run `iterations` rounds of MCTS on `tree` and return the chosen move.
pub fn tree_search(
    tree: &mut Tree,
    iterations: usize,
    config: &SearchConfig,
    selection: MoveSelection,
    rng: &mut fastrand::Rng,
) -> Option<Position> {
    tree.expand(Tree::ROOT, config);

    for _ in 0..iterations {
        let leaf = tree.tree_descend(config);
        tree.expand(leaf, config);

        let children = &tree.node(leaf).children;
        let target = if children.is_empty() {
            leaf
        } else {
            children[rng.usize(..children.len())]
        };

        let node = tree.node(target);
        let result = simulate(&node.board, node.to_move, tree.root_color, rng);
        tree.tree_update(target, result);
    }

    tree.best_move(selection)
}

pub struct MctsPlayer {
    color: Color,
    score: usize,
    iterations: usize,
    selection: MoveSelection,
    config: SearchConfig,
    rng: fastrand::Rng,
}

impl MctsPlayer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            score: 2,
            iterations: N_ITERATIONS,
            selection: MoveSelection::MostVisited,
            config: SearchConfig::default(),
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.config.exploration = exploration;
        self
    }

    pub fn with_selection(mut self, selection: MoveSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Blend static heuristics into selection with the given weight.
    pub fn with_heuristic_blend(mut self, weight: f64, heuristics: Vec<Heuristic>) -> Self {
        self.config.heuristic_weight = weight;
        self.config.heuristics = heuristics;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl Player for MctsPlayer {
    fn color(&self) -> Color {
        self.color
    }

    fn score(&self) -> usize {
        self.score
    }

    fn set_score(&mut self, score: usize) {
        self.score = score;
    }

    fn name(&self) -> &'static str {
        "mcts"
    }

    fn play(&mut self, board: &Board) -> Option<Position> {
        if !board.has_legal_move(self.color) {
            return None;
        }
        let mut tree = Tree::new(board, self.color);
        let mv = tree_search(
            &mut tree,
            self.iterations,
            &self.config,
            self.selection,
            &mut self.rng,
        );
        tree.dump_children();
        debug!("{} mcts built {} nodes, picks {:?}", self.color, tree.len(), mv);
        mv
    }
}

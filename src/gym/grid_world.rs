use std::{collections::HashSet, fmt};

use strum::{EnumIter, FromRepr, VariantArray};

use crate::{
    env::{DiscreteActionSpace, Environment, Outcome},
    Error, Result,
};

/// Grid coordinates as `(row, col)`, with `(0, 0)` in the top left corner
pub type Pos = (usize, usize);

#[derive(EnumIter, VariantArray, FromRepr, Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Move {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Goal,
    Hazard,
}

/// Layout and rewards for a [`GridWorld`]
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorldConfig {
    pub height: usize,
    pub width: usize,
    pub start: Pos,
    pub goal: Pos,
    pub hazards: Vec<Pos>,
    /// Reward for stepping onto the goal
    pub goal_reward: f32,
    /// Reward for stepping onto a hazard
    pub hazard_reward: f32,
}

impl Default for GridWorldConfig {
    /// The classic 5x5 layout: start in the corner, goal in the center, guarded on three sides
    fn default() -> Self {
        Self {
            height: 5,
            width: 5,
            start: (0, 0),
            goal: (2, 2),
            hazards: vec![(1, 2), (2, 1), (3, 2)],
            goal_reward: 100.0,
            hazard_reward: -100.0,
        }
    }
}

impl GridWorldConfig {
    /// Default layout with terminal rewards scaled to `±1`
    pub fn unit_rewards() -> Self {
        Self {
            goal_reward: 1.0,
            hazard_reward: -1.0,
            ..Default::default()
        }
    }
}

/// A bounded grid with one goal cell and static hazard cells
///
/// Moves that would leave the grid are clipped to a no-op that still consumes a step.
/// Stepping onto the goal or a hazard ends the episode.
#[derive(Debug, Clone)]
pub struct GridWorld {
    height: usize,
    width: usize,
    start: Pos,
    goal: Pos,
    hazards: HashSet<Pos>,
    goal_reward: f32,
    hazard_reward: f32,
    pos: Pos,
}

impl GridWorld {
    /// **Errors** if a dimension is zero, if the start, goal, or a hazard lies outside the grid,
    /// or if the start coincides with the goal or a hazard
    pub fn new(config: GridWorldConfig) -> Result<Self> {
        let GridWorldConfig {
            height,
            width,
            start,
            goal,
            hazards,
            goal_reward,
            hazard_reward,
        } = config;

        if height == 0 || width == 0 {
            return Err(Error::invalid(format!(
                "grid dimensions must be positive, got {height}x{width}"
            )));
        }

        let in_bounds = |(row, col): Pos| row < height && col < width;
        let named = [("start", start), ("goal", goal)];
        let labeled = named
            .into_iter()
            .chain(hazards.iter().map(|&h| ("hazard", h)));
        for (name, pos) in labeled {
            if !in_bounds(pos) {
                return Err(Error::invalid(format!(
                    "{name} {pos:?} is outside the {height}x{width} grid"
                )));
            }
        }

        let hazards: HashSet<Pos> = hazards.into_iter().collect();
        if start == goal || hazards.contains(&start) {
            return Err(Error::invalid(format!("start {start:?} is a terminal cell")));
        }
        if hazards.contains(&goal) {
            return Err(Error::invalid(format!("goal {goal:?} is also a hazard")));
        }

        Ok(Self {
            height,
            width,
            start,
            goal,
            hazards,
            goal_reward,
            hazard_reward,
            pos: start,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn start(&self) -> Pos {
        self.start
    }

    pub fn goal(&self) -> Pos {
        self.goal
    }

    /// Current agent position
    pub fn pos(&self) -> Pos {
        self.pos
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        if pos == self.goal {
            Cell::Goal
        } else if self.hazards.contains(&pos) {
            Cell::Hazard
        } else {
            Cell::Empty
        }
    }

    /// Position reached by taking `action` from `pos`, clipped at the borders
    fn moved(&self, (row, col): Pos, action: Move) -> Pos {
        match action {
            Move::Up => (row.saturating_sub(1), col),
            Move::Down => ((row + 1).min(self.height - 1), col),
            Move::Left => (row, col.saturating_sub(1)),
            Move::Right => (row, (col + 1).min(self.width - 1)),
        }
    }
}

impl Environment for GridWorld {
    type State = Pos;
    type Action = Move;

    fn step(&mut self, action: Self::Action) -> (Self::State, f32, bool) {
        self.pos = self.moved(self.pos, action);

        let (reward, done) = match self.cell(self.pos) {
            Cell::Goal => (self.goal_reward, true),
            Cell::Hazard => (self.hazard_reward, true),
            Cell::Empty => (0.0, false),
        };

        (self.pos, reward, done)
    }

    fn reset(&mut self) -> Self::State {
        self.pos = self.start;
        self.pos
    }

    fn outcome(&self) -> Option<Outcome> {
        match self.cell(self.pos) {
            Cell::Goal => Some(Outcome::Goal),
            Cell::Hazard => Some(Outcome::Hazard),
            Cell::Empty => None,
        }
    }
}

impl DiscreteActionSpace for GridWorld {
    fn actions(&self) -> Vec<Self::Action> {
        Move::VARIANTS.to_vec()
    }
}

/// ASCII map: `A` agent, `G` goal, `X` hazard, `.` empty
impl fmt::Display for GridWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            let line = (0..self.width)
                .map(|col| match ((row, col) == self.pos, self.cell((row, col))) {
                    (true, _) => 'A',
                    (false, Cell::Goal) => 'G',
                    (false, Cell::Hazard) => 'X',
                    (false, Cell::Empty) => '.',
                })
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

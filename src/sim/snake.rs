//! The snake: body, heading and move cadence
//!
//! `tick` only ever inserts a new head. Whether the tail is cut afterwards is
//! the caller's decision: no cut means the snake grew (food eaten).

use std::collections::VecDeque;
use std::fmt;

use super::grid::{Direction, Position, corner_rotation};

/// Snake construction and mutation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    /// Initial length below two segments
    InvalidLength(usize),
    /// Move interval of zero, or a floor above the starting interval
    InvalidMoveInterval { interval: u32, min_interval: u32 },
    /// Cutting the tail would leave no body behind the head
    TailTooShort(usize),
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::InvalidLength(len) => {
                write!(f, "invalid snake size: expected greater than 1, received {len}")
            }
            SnakeError::InvalidMoveInterval {
                interval,
                min_interval,
            } => write!(
                f,
                "invalid move interval {interval} (minimum {min_interval}): expected 0 < minimum <= interval"
            ),
            SnakeError::TailTooShort(len) => {
                write!(f, "can't cut tail of snake with {len} segment(s)")
            }
        }
    }
}

impl std::error::Error for SnakeError {}

/// A grid snake. Head is `body[0]`. Only `Snake::new` builds one.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    next_direction: Direction,
    alive: bool,
    /// Ticks between advances (smaller = faster)
    move_interval: u32,
    /// Speed floor for `move_interval`
    min_move_interval: u32,
    move_timer: u32,
}

impl Snake {
    /// Build a snake of `length` contiguous cells extending left from `head`,
    /// heading right.
    pub fn new(
        head: Position,
        length: usize,
        move_interval: u32,
        min_move_interval: u32,
    ) -> Result<Self, SnakeError> {
        if length < 2 {
            return Err(SnakeError::InvalidLength(length));
        }
        if move_interval == 0 || min_move_interval == 0 || min_move_interval > move_interval {
            return Err(SnakeError::InvalidMoveInterval {
                interval: move_interval,
                min_interval: min_move_interval,
            });
        }

        let body = (0..length as i32)
            .map(|i| Position::new(head.x - i, head.y))
            .collect();

        Ok(Self {
            body,
            direction: Direction::Right,
            next_direction: Direction::Right,
            alive: true,
            move_interval,
            min_move_interval,
            move_timer: 0,
        })
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn body(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn move_interval(&self) -> u32 {
        self.move_interval
    }

    pub fn min_move_interval(&self) -> u32 {
        self.min_move_interval
    }

    /// True if `pos` is covered by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Queue a heading for the next advance. A reversal onto the body is
    /// silently ignored.
    pub fn set_next_direction(&mut self, direction: Direction) {
        if !self.direction.is_opposite(direction) {
            self.next_direction = direction;
        }
    }

    /// Advance the move timer. On the `move_interval`-th call the queued
    /// heading is committed and a new head is pushed; returns whether that
    /// happened.
    pub fn tick(&mut self) -> bool {
        self.move_timer += 1;
        if self.move_timer < self.move_interval {
            return false;
        }
        self.move_timer = 0;
        self.direction = self.next_direction;
        let new_head = self.head().step(self.direction);
        self.body.push_front(new_head);
        true
    }

    /// Drop the last segment (the step did not grow the snake)
    pub fn cut_tail(&mut self) -> Result<(), SnakeError> {
        if self.body.len() <= 1 {
            return Err(SnakeError::TailTooShort(self.body.len()));
        }
        self.body.pop_back();
        Ok(())
    }

    /// Speed up by `amount` ticks, never past the floor
    pub fn decrease_move_interval(&mut self, amount: u32) {
        self.move_interval = self
            .move_interval
            .saturating_sub(amount)
            .max(self.min_move_interval);
    }

    /// True if the head shares a cell with any other segment
    pub fn head_hits_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&p| p == head)
    }

    /// Marks the snake dead on a head/body overlap
    pub fn check_self_collision(&mut self) {
        if self.head_hits_body() {
            self.alive = false;
        }
    }

    /// Per-segment sprite choice and rotation for the renderer
    pub fn sprites(&self) -> Vec<SegmentSprite> {
        let last = self.body.len() - 1;
        self.body
            .iter()
            .enumerate()
            .map(|(i, &position)| {
                let (kind, rotation) = if i == 0 {
                    (SegmentKind::Head, self.direction.rotation())
                } else if i == last {
                    let dir = Direction::between(self.body[i - 1], position);
                    (SegmentKind::Tail, dir.rotation())
                } else {
                    let new = Direction::between(self.body[i - 1], position);
                    let old = Direction::between(position, self.body[i + 1]);
                    if new == old {
                        (SegmentKind::Body, old.rotation())
                    } else {
                        (SegmentKind::Corner, corner_rotation(old, new))
                    }
                };
                SegmentSprite {
                    position,
                    kind,
                    rotation,
                }
            })
            .collect()
    }
}

/// Which sprite a segment is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Head,
    Body,
    Corner,
    Tail,
}

/// Render snapshot of one segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSprite {
    pub position: Position,
    pub kind: SegmentKind,
    pub rotation: f32,
}

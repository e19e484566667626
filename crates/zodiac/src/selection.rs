//! Hover and click-to-lock selection.
//!
//! The controller is the single owner of interaction state. Each handler
//! returns the events the host should forward to its listeners, in order.

use crate::chart::PlanetName;
use crate::hit::hit_test;
use crate::layout::{Point, RenderSnapshot};
use crate::rings::RingId;
use std::fmt;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanetPick {
    pub name: PlanetName,
    pub degree_longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    None,
    RingSegment {
        ring: RingId,
        index: usize,
    },
    Planet(PlanetPick),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn planet(&self) -> Option<&PlanetPick> {
        match self {
            Self::Planet(pick) => Some(pick),
            _ => None,
        }
    }

    pub fn is_segment(&self, ring: RingId, index: usize) -> bool {
        matches!(self, Self::RingSegment { ring: r, index: i } if *r == ring && *i == index)
    }

    pub fn is_planet(&self, name: &PlanetName) -> bool {
        self.planet().is_some_and(|p| &p.name == name)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::RingSegment { ring, index } => {
                write!(f, "{ring} #{} ({})", index + 1, ring.spec().label(*index))
            }
            Self::Planet(pick) => write!(f, "{} at {:.2}°", pick.name, pick.degree_longitude),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum LockState {
    #[default]
    Unlocked,
    Locked,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MandalaEvent {
    /// The active selection changed (or was re-asserted by a lock toggle).
    HoverChanged(Selection),
    /// Sent for every click, carrying the planet under the pointer if any.
    PlanetClicked(Option<PlanetPick>),
}

#[derive(Debug, Default)]
pub struct SelectionController {
    lock: LockState,
    hover: Selection,
    locked: Selection,
    pointer: Option<Point>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock_state(&self) -> LockState {
        self.lock
    }

    /// Last known pointer position, tracked even while locked.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    pub fn active(&self) -> &Selection {
        match self.lock {
            LockState::Unlocked => &self.hover,
            LockState::Locked => &self.locked,
        }
    }

    pub fn pointer_moved(
        &mut self,
        snapshot: Option<&RenderSnapshot>,
        pointer: Point,
    ) -> Vec<MandalaEvent> {
        self.pointer = Some(pointer);
        if self.lock == LockState::Locked {
            return Vec::new();
        }
        self.set_hover(pick(snapshot, pointer))
    }

    pub fn pointer_left(&mut self) -> Vec<MandalaEvent> {
        self.pointer = None;
        if self.lock == LockState::Locked {
            return Vec::new();
        }
        self.set_hover(Selection::None)
    }

    pub fn clicked(
        &mut self,
        snapshot: Option<&RenderSnapshot>,
        pointer: Point,
    ) -> Vec<MandalaEvent> {
        self.pointer = Some(pointer);
        let hit = pick(snapshot, pointer);
        let planet_click = MandalaEvent::PlanetClicked(hit.planet().cloned());

        match self.lock {
            LockState::Unlocked => {
                self.lock = LockState::Locked;
                self.locked = hit.clone();
            }
            LockState::Locked => {
                self.lock = LockState::Unlocked;
                self.locked = Selection::None;
            }
        }
        log::debug!("selection {} on {hit}", self.lock);
        self.hover = hit.clone();

        vec![planet_click, MandalaEvent::HoverChanged(hit)]
    }

    /// Drops any lock and hover, e.g. when the chart behind the diagram is swapped.
    pub fn reset(&mut self) -> Vec<MandalaEvent> {
        let was_active = !self.active().is_none();
        self.lock = LockState::Unlocked;
        self.locked = Selection::None;
        self.hover = Selection::None;
        if was_active {
            vec![MandalaEvent::HoverChanged(Selection::None)]
        } else {
            Vec::new()
        }
    }

    fn set_hover(&mut self, hit: Selection) -> Vec<MandalaEvent> {
        if self.hover == hit {
            return Vec::new();
        }
        self.hover = hit.clone();
        vec![MandalaEvent::HoverChanged(hit)]
    }
}

fn pick(snapshot: Option<&RenderSnapshot>, pointer: Point) -> Selection {
    snapshot
        .map(|s| hit_test(s, pointer))
        .unwrap_or_default()
}

//! Hand module - the pieces currently available to place
//!
//! A hand has a fixed number of slots. Slots empty one at a time as pieces are committed;
//! once every slot is empty the whole hand is dealt again in one step.

use arrayvec::ArrayVec;

use crate::error::{EngineError, EngineResult};
use crate::pieces::Piece;
use crate::rng::PieceDealer;
use crate::types::{GameMode, MAX_HAND_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    slots: ArrayVec<Option<Piece>, MAX_HAND_SIZE>,
}

impl Hand {
    /// Deal a full hand of `size` random pieces
    pub fn deal(dealer: &mut PieceDealer, size: usize) -> EngineResult<Self> {
        let pieces = dealer.deal_pieces(size)?;
        Ok(Self {
            slots: pieces.into_iter().map(Some).collect(),
        })
    }

    /// Deal a full hand sized for a game mode
    pub fn for_mode(dealer: &mut PieceDealer, mode: GameMode) -> Self {
        let mut hand = Self {
            slots: (0..mode.hand_size()).map(|_| None).collect(),
        };
        hand.refill(dealer);
        hand
    }

    /// Build a hand from explicit slots (scripted scenarios and tests)
    pub fn from_slots(slots: &[Option<Piece>]) -> EngineResult<Self> {
        if slots.is_empty() || slots.len() > MAX_HAND_SIZE {
            return Err(EngineError::InvalidHandSize { size: slots.len() });
        }
        Ok(Self {
            slots: slots.iter().copied().collect(),
        })
    }

    /// Number of slots, occupied or not
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when every slot has been played
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn slots(&self) -> &[Option<Piece>] {
        &self.slots
    }

    /// Piece in `slot`, without removing it
    pub fn get(&self, slot: usize) -> EngineResult<Piece> {
        match self.slots.get(slot) {
            Some(Some(piece)) => Ok(*piece),
            Some(None) => Err(EngineError::EmptyHandSlot { slot }),
            None => Err(EngineError::SlotOutOfRange {
                slot,
                len: self.slots.len(),
            }),
        }
    }

    /// Remove and return the piece in `slot`
    pub fn take(&mut self, slot: usize) -> EngineResult<Piece> {
        let piece = self.get(slot)?;
        self.slots[slot] = None;
        Ok(piece)
    }

    /// Occupied slots as `(slot, piece)`
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &Piece)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i, p)))
    }

    /// Replace every slot with a freshly dealt piece
    pub fn refill(&mut self, dealer: &mut PieceDealer) {
        for slot in self.slots.iter_mut() {
            *slot = Some(dealer.deal_piece());
        }
    }
}

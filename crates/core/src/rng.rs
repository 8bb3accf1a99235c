//! RNG module - random piece generation
//!
//! Shape selection and colour assignment are two separate draws: the shape decides
//! legality, the colour is presentation-only and comes from the active palette.
//! Shapes are drawn uniformly from the whole catalog.
//!
//! The dealer owns a seeded `StdRng`, so the same seed always produces the same
//! sequence of hands (for tests and replays).

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{EngineError, EngineResult};
use crate::pieces::{Piece, ShapeKind};
use crate::theme::Palette;
use crate::types::{Color, MAX_HAND_SIZE};

/// Draw a shape uniformly from the catalog
pub fn random_shape<R: Rng + ?Sized>(rng: &mut R) -> ShapeKind {
    ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())]
}

/// Draw a colour uniformly from a palette
pub fn random_color<R: Rng + ?Sized>(rng: &mut R, palette: &Palette) -> Color {
    palette[rng.gen_range(0..palette.len())]
}

/// Seeded piece generator
#[derive(Debug, Clone)]
pub struct PieceDealer {
    rng: StdRng,
    palette: Palette,
}

impl PieceDealer {
    /// Create a new dealer with the given seed and palette
    pub fn new(seed: u64, palette: &Palette) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            palette: *palette,
        }
    }

    /// Draw a single piece
    pub fn deal_piece(&mut self) -> Piece {
        let kind = random_shape(&mut self.rng);
        let color = random_color(&mut self.rng, &self.palette);
        Piece::new(kind, color)
    }

    /// Draw `size` independent pieces
    pub fn deal_pieces(&mut self, size: usize) -> EngineResult<ArrayVec<Piece, MAX_HAND_SIZE>> {
        if size == 0 || size > MAX_HAND_SIZE {
            return Err(EngineError::InvalidHandSize { size });
        }
        Ok((0..size).map(|_| self.deal_piece()).collect())
    }

    /// Swap the palette used for subsequent draws
    pub fn set_palette(&mut self, palette: &Palette) {
        self.palette = *palette;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeKind;

    #[test]
    fn test_dealer_deterministic() {
        let palette = ThemeKind::Classic.piece_colors();
        let mut d1 = PieceDealer::new(12345, palette);
        let mut d2 = PieceDealer::new(12345, palette);

        for _ in 0..100 {
            assert_eq!(d1.deal_piece(), d2.deal_piece());
        }
    }

    #[test]
    fn test_dealer_different_seeds_diverge() {
        let palette = ThemeKind::Classic.piece_colors();
        let mut d1 = PieceDealer::new(1, palette);
        let mut d2 = PieceDealer::new(2, palette);

        let a: Vec<_> = (0..20).map(|_| d1.deal_piece()).collect();
        let b: Vec<_> = (0..20).map(|_| d2.deal_piece()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_colors_come_from_palette() {
        let palette = ThemeKind::Neon.piece_colors();
        let mut dealer = PieceDealer::new(7, palette);
        for _ in 0..200 {
            let piece = dealer.deal_piece();
            assert!(palette.contains(&piece.color));
        }
    }

    #[test]
    fn test_every_shape_eventually_dealt() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..5000 {
            seen.insert(random_shape(&mut rng));
        }
        assert_eq!(seen.len(), ShapeKind::ALL.len());
    }

    #[test]
    fn test_deal_pieces_size() {
        let mut dealer = PieceDealer::new(3, ThemeKind::Dark.piece_colors());
        assert_eq!(dealer.deal_pieces(3).unwrap().len(), 3);
        assert_eq!(dealer.deal_pieces(5).unwrap().len(), 5);
        assert_eq!(
            dealer.deal_pieces(0),
            Err(EngineError::InvalidHandSize { size: 0 })
        );
        assert_eq!(
            dealer.deal_pieces(MAX_HAND_SIZE + 1),
            Err(EngineError::InvalidHandSize {
                size: MAX_HAND_SIZE + 1
            })
        );
    }

    #[test]
    fn test_set_palette_switches_colors() {
        let mut dealer = PieceDealer::new(5, ThemeKind::Classic.piece_colors());
        dealer.set_palette(ThemeKind::Retro.piece_colors());
        for _ in 0..50 {
            let piece = dealer.deal_piece();
            assert!(ThemeKind::Retro.piece_colors().contains(&piece.color));
        }
    }
}

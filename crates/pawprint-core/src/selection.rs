//! Current avatar selection
//!
//! One optional frame per category. A present value always lies inside its
//! category's range; setters refuse anything else.

use crate::category::Category;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// Selection errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Frame {index} is outside the {category} range [{start}, {end})")]
    OutOfRange {
        category: Category,
        index: u32,
        start: u32,
        end: u32,
    },

    #[error("Frame {0} does not belong to any category")]
    UnknownFrame(u32),
}

/// Frame chosen for each category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSelection {
    pub skin: Option<u32>,
    pub hair: Option<u32>,
    pub hat: Option<u32>,
    pub expression: Option<u32>,
    pub shirt: Option<u32>,
}

impl Default for SpriteSelection {
    fn default() -> Self {
        Self {
            skin: Some(Category::Skin.range().start),
            hair: Some(Category::Hair.range().start),
            hat: Some(Category::Hat.range().start),
            expression: Some(Category::Expression.range().start),
            shirt: Some(Category::Shirt.range().start),
        }
    }
}

/// One entry in a category's option row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionEntry {
    pub index: u32,
    pub selected: bool,
}

impl SpriteSelection {
    /// Selection with every category at its first frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame shown for a category
    pub fn get(&self, category: Category) -> Option<u32> {
        *self.slot(category)
    }

    fn slot(&self, category: Category) -> &Option<u32> {
        match category {
            Category::Skin => &self.skin,
            Category::Hair => &self.hair,
            Category::Hat => &self.hat,
            Category::Expression => &self.expression,
            Category::Shirt => &self.shirt,
        }
    }

    fn slot_mut(&mut self, category: Category) -> &mut Option<u32> {
        match category {
            Category::Skin => &mut self.skin,
            Category::Hair => &mut self.hair,
            Category::Hat => &mut self.hat,
            Category::Expression => &mut self.expression,
            Category::Shirt => &mut self.shirt,
        }
    }

    /// Set a category's frame. Out-of-range indices leave the slot as is.
    pub fn set(&mut self, category: Category, index: u32) -> Result<(), SelectionError> {
        let range = category.range();
        if !range.contains(index) {
            return Err(SelectionError::OutOfRange {
                category,
                index,
                start: range.start,
                end: range.end(),
            });
        }
        debug!(%category, index, "Selected frame");
        *self.slot_mut(category) = Some(index);
        Ok(())
    }

    /// Select a frame, routing it to whichever category owns it
    pub fn select_frame(&mut self, index: u32) -> Result<Category, SelectionError> {
        let category = Category::for_frame(index).ok_or(SelectionError::UnknownFrame(index))?;
        self.set(category, index)?;
        Ok(category)
    }

    /// Hide a category's layer
    pub fn clear(&mut self, category: Category) {
        debug!(%category, "Cleared layer");
        *self.slot_mut(category) = None;
    }

    /// Pick a uniformly random frame for every category, independently
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for category in Category::ALL {
            let range = category.range();
            *self.slot_mut(category) = Some(rng.gen_range(range.start..range.end()));
        }
        debug!(selection = ?self, "Randomized selection");
    }

    /// Present frames in back-to-front draw order
    pub fn layers(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::DRAW_ORDER
            .into_iter()
            .filter_map(move |c| self.get(c).map(|index| (c, index)))
    }

    /// Whether any category currently shows this frame
    pub fn is_selected(&self, index: u32) -> bool {
        Category::ALL.iter().any(|c| self.get(*c) == Some(index))
    }

    /// Option row for a category, clipped to the sheet's `total` frames
    pub fn options(&self, category: Category, total: u32) -> Vec<OptionEntry> {
        category
            .range()
            .iter()
            .take_while(|index| *index < total)
            .map(|index| OptionEntry {
                index,
                selected: self.get(category) == Some(index),
            })
            .collect()
    }
}

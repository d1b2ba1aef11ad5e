//! Item bank: calibrated questionnaire items grouped by personality dimension
//!
//! The bank is read-only input to the engine. Items arrive from an external
//! question provider already annotated with 2PL parameters; the bank
//! validates them once at construction so malformed payloads never reach
//! the numerical core. Question text stays with the provider - the engine
//! only ever sees ids and parameters.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::BankError;

/// The five personality dimensions, in fixed administration order
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl Dimension {
    /// All dimensions in administration order
    pub const ALL: [Dimension; 5] = [
        Dimension::Openness,
        Dimension::Conscientiousness,
        Dimension::Extraversion,
        Dimension::Agreeableness,
        Dimension::Neuroticism,
    ];

    /// Stable index of this dimension in [`Dimension::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name as used in external payloads
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Openness => "openness",
            Dimension::Conscientiousness => "conscientiousness",
            Dimension::Extraversion => "extraversion",
            Dimension::Agreeableness => "agreeableness",
            Dimension::Neuroticism => "neuroticism",
        }
    }

    /// The dimension administered after this one, if any
    pub fn next(self) -> Option<Dimension> {
        Dimension::ALL.get(self.index() + 1).copied()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unique identifier for an item in the bank
///
/// Ids are assigned by the question provider and remain stable for the
/// lifetime of a session, which allows administration records to reference
/// items without owning their text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// A calibrated questionnaire item
///
/// Immutable once created. Belongs to exactly one dimension.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// The dimension this item measures
    pub dimension: Dimension,
    /// 2PL difficulty parameter (b): the theta at which endorsement is 50/50
    pub difficulty: f64,
    /// 2PL discrimination parameter (a): steepness of the response curve
    pub discrimination: f64,
    /// Whether agreement indicates the low end of the trait
    pub reverse_scored: bool,
}

impl Item {
    /// Create a regularly-scored item
    pub fn new(id: impl Into<ItemId>, dimension: Dimension, difficulty: f64, discrimination: f64) -> Self {
        Self {
            id: id.into(),
            dimension,
            difficulty,
            discrimination,
            reverse_scored: false,
        }
    }

    /// Mark the item as reverse-scored
    pub fn reversed(mut self) -> Self {
        self.reverse_scored = true;
        self
    }
}

/// Read-only collection of items across all dimensions
///
/// May be shared freely between concurrent sessions; nothing in the engine
/// ever mutates it after construction.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ItemBank {
    items: Vec<Item>,
}

impl ItemBank {
    /// Build a bank from externally provided items, validating each one
    ///
    /// Rejects duplicate ids, non-finite parameters, and non-positive
    /// discrimination. An empty bank (or an empty per-dimension pool) is
    /// not an error; selection simply reports exhaustion.
    pub fn new(items: Vec<Item>) -> Result<Self, BankError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(BankError::DuplicateItem(item.id));
            }
            if !item.difficulty.is_finite() {
                return Err(BankError::InvalidParameter {
                    item: item.id,
                    parameter: "difficulty",
                    value: item.difficulty,
                });
            }
            if !item.discrimination.is_finite() || item.discrimination <= 0.0 {
                return Err(BankError::InvalidParameter {
                    item: item.id,
                    parameter: "discrimination",
                    value: item.discrimination,
                });
            }
        }
        Ok(Self { items })
    }

    /// All items measuring the given dimension
    pub fn for_dimension(&self, dimension: Dimension) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.dimension == dimension)
    }

    /// Number of items in the given dimension's pool
    pub fn pool_size(&self, dimension: Dimension) -> usize {
        self.for_dimension(dimension).count()
    }

    /// Look up an item by id
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Total number of items across all dimensions
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the bank holds no items at all
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_order() {
        assert_eq!(Dimension::ALL[0], Dimension::Openness);
        assert_eq!(Dimension::ALL[4], Dimension::Neuroticism);
        assert_eq!(Dimension::Openness.next(), Some(Dimension::Conscientiousness));
        assert_eq!(Dimension::Neuroticism.next(), None);
    }

    #[test]
    fn test_dimension_serde_names() {
        let json = serde_json::to_string(&Dimension::Agreeableness).unwrap();
        assert_eq!(json, "\"agreeableness\"");
        assert_eq!(format!("{}", Dimension::Openness), "openness");
    }

    #[test]
    fn test_bank_accepts_valid_items() {
        let bank = ItemBank::new(vec![
            Item::new(1u32, Dimension::Openness, -1.0, 1.2),
            Item::new(2u32, Dimension::Openness, 0.5, 0.8).reversed(),
            Item::new(3u32, Dimension::Extraversion, 0.0, 1.0),
        ])
        .unwrap();

        assert_eq!(bank.len(), 3);
        assert_eq!(bank.pool_size(Dimension::Openness), 2);
        assert_eq!(bank.pool_size(Dimension::Extraversion), 1);
        assert_eq!(bank.pool_size(Dimension::Neuroticism), 0);
        assert!(bank.get(ItemId(2)).unwrap().reverse_scored);
    }

    #[test]
    fn test_bank_rejects_duplicate_ids() {
        let result = ItemBank::new(vec![
            Item::new(1u32, Dimension::Openness, 0.0, 1.0),
            Item::new(1u32, Dimension::Neuroticism, 1.0, 1.0),
        ]);
        assert_eq!(result.unwrap_err(), BankError::DuplicateItem(ItemId(1)));
    }

    #[test]
    fn test_bank_rejects_bad_parameters() {
        let result = ItemBank::new(vec![Item::new(1u32, Dimension::Openness, f64::NAN, 1.0)]);
        assert!(matches!(
            result.unwrap_err(),
            BankError::InvalidParameter {
                parameter: "difficulty",
                ..
            }
        ));

        let result = ItemBank::new(vec![Item::new(1u32, Dimension::Openness, 0.0, 0.0)]);
        assert!(matches!(
            result.unwrap_err(),
            BankError::InvalidParameter {
                parameter: "discrimination",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_bank_is_not_an_error() {
        let bank = ItemBank::new(Vec::new()).unwrap();
        assert!(bank.is_empty());
        assert_eq!(bank.pool_size(Dimension::Openness), 0);
    }

    #[test]
    fn test_for_dimension_excludes_other_dimensions() {
        let bank = ItemBank::new(vec![
            Item::new(1u32, Dimension::Openness, 0.0, 1.0),
            Item::new(2u32, Dimension::Agreeableness, 0.0, 1.0),
        ])
        .unwrap();

        let openness: Vec<_> = bank.for_dimension(Dimension::Openness).collect();
        assert_eq!(openness.len(), 1);
        assert_eq!(openness[0].id, ItemId(1));
    }
}

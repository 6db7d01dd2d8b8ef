use std::fmt;
use std::str::FromStr;

use super::model::{RecordId, Table};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Tri-state filter on the `tradeable` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TradeableFilter {
    #[default]
    Any,
    Yes,
    No,
}

impl TradeableFilter {
    pub const ALL: [TradeableFilter; 3] =
        [TradeableFilter::Any, TradeableFilter::Yes, TradeableFilter::No];

    /// The required value, or `None` when unconstrained.
    pub fn wanted(self) -> Option<bool> {
        match self {
            TradeableFilter::Any => None,
            TradeableFilter::Yes => Some(true),
            TradeableFilter::No => Some(false),
        }
    }
}

impl fmt::Display for TradeableFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TradeableFilter::Any => "any",
            TradeableFilter::Yes => "yes",
            TradeableFilter::No => "no",
        };
        write!(f, "{label}")
    }
}

impl FromStr for TradeableFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "any" | "tous" => Ok(TradeableFilter::Any),
            "yes" | "oui" => Ok(TradeableFilter::Yes),
            "no" | "non" => Ok(TradeableFilter::No),
            other => Err(format!("unknown tradeable filter '{other}' (expected any, yes or no)")),
        }
    }
}

/// Everything the user can filter on. Blank text fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Free text matched against every cell of a row.
    pub query: String,
    pub serie: String,
    pub collection: String,
    pub tradeable: TradeableFilter,
}

impl FilterCriteria {
    /// Whether no criterion is active.
    pub fn is_blank(&self) -> bool {
        needle(&self.query).is_none()
            && needle(&self.serie).is_none()
            && needle(&self.collection).is_none()
            && self.tradeable == TradeableFilter::Any
    }
}

/// Lowercased trimmed needle, or `None` for a blank criterion.
fn needle(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Compute the inclusion mask: one entry per record, in table order.
///
/// A record is included when it satisfies every active criterion:
/// * `query` appears in the string form of any cell, extras included
/// * `serie` / `collection` appear in the respective column
/// * `tradeable` equals the requested value unless the filter is `Any`
pub fn mask(table: &Table, criteria: &FilterCriteria) -> Vec<bool> {
    let query = needle(&criteria.query);
    let serie = needle(&criteria.serie);
    let collection = needle(&criteria.collection);
    let wanted = criteria.tradeable.wanted();

    table
        .records
        .iter()
        .map(|record| {
            if let Some(q) = &query {
                let hit = table
                    .cells(record)
                    .iter()
                    .any(|cell| contains_ci(&cell.search_text(), q));
                if !hit {
                    return false;
                }
            }
            if let Some(s) = &serie {
                if !contains_ci(&record.serie, s) {
                    return false;
                }
            }
            if let Some(c) = &collection {
                if !contains_ci(&record.collection, c) {
                    return false;
                }
            }
            match wanted {
                Some(w) => record.tradeable == w,
                None => true,
            }
        })
        .collect()
}

/// Return indices of records that pass all active filters.
pub fn filtered_indices(table: &Table, criteria: &FilterCriteria) -> Vec<usize> {
    mask(table, criteria)
        .into_iter()
        .enumerate()
        .filter_map(|(i, keep)| keep.then_some(i))
        .collect()
}

/// Ids of records that pass all active filters, in table order.
pub fn visible_ids(table: &Table, criteria: &FilterCriteria) -> Vec<RecordId> {
    filtered_indices(table, criteria)
        .into_iter()
        .map(|i| table.records[i].id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    fn pin(name: &str, serie: &str, collection: &str, tradeable: bool) -> Record {
        let mut r = Record::blank(0);
        r.name = name.into();
        r.serie = serie.into();
        r.collection = collection.into();
        r.tradeable = tradeable;
        r
    }

    fn kanto() -> Table {
        Table::new(
            Vec::new(),
            vec![
                pin("Pikachu", "Kanto", "Starter", false),
                pin("Eevee", "Kanto", "Cute", true),
            ],
        )
    }

    #[test]
    fn test_serie_and_tradeable_combined() {
        let criteria = FilterCriteria {
            serie: "kanto".into(),
            tradeable: TradeableFilter::Yes,
            ..Default::default()
        };
        assert_eq!(mask(&kanto(), &criteria), vec![false, true]);
    }

    #[test]
    fn test_blank_criteria_include_everything() {
        let table = kanto();
        let criteria = FilterCriteria {
            query: "   ".into(),
            ..Default::default()
        };
        assert!(criteria.is_blank());
        assert_eq!(mask(&table, &criteria), vec![true; table.len()]);
    }

    #[test]
    fn test_mask_is_idempotent() {
        let table = kanto();
        let criteria = FilterCriteria {
            query: "CUTE".into(),
            ..Default::default()
        };
        let first = mask(&table, &criteria);
        assert_eq!(first, vec![false, true]);
        assert_eq!(mask(&table, &criteria), first);
    }

    #[test]
    fn test_query_searches_extra_columns() {
        let mut table = Table::new(vec!["origin".into()], Vec::new());
        let mut r = pin("Mew", "Kanto", "Legend", false);
        r.extra = vec![CellValue::String("Convention Lyon".into())];
        table.push(r);
        table.push(pin("Ditto", "Kanto", "Blob", false));

        let criteria = FilterCriteria {
            query: "lyon".into(),
            ..Default::default()
        };
        assert_eq!(mask(&table, &criteria), vec![true, false]);
    }

    #[test]
    fn test_query_matches_typed_columns() {
        let mut r = pin("Snorlax", "Kanto", "Big", true);
        r.quantity = 42;
        let table = Table::new(Vec::new(), vec![r, pin("Abra", "", "", false)]);

        let by_number = FilterCriteria {
            query: "42".into(),
            ..Default::default()
        };
        assert_eq!(mask(&table, &by_number), vec![true, false]);

        let by_bool = FilterCriteria {
            query: "TRUE".into(),
            ..Default::default()
        };
        assert_eq!(mask(&table, &by_bool), vec![true, false]);
    }

    #[test]
    fn test_query_matches_integral_price_with_decimal() {
        let table = crate::data::sample::make_sample();
        let criteria = FilterCriteria {
            query: "12.0".into(),
            ..Default::default()
        };
        assert_eq!(mask(&table, &criteria), vec![false, false, true]);

        let criteria = FilterCriteria {
            query: "9.9".into(),
            ..Default::default()
        };
        assert_eq!(mask(&table, &criteria), vec![true, false, false]);
    }

    #[test]
    fn test_substring_is_not_a_pattern() {
        let table = Table::new(Vec::new(), vec![pin("A", "Gen.1", "", false), pin("B", "Gen11", "", false)]);
        let criteria = FilterCriteria {
            serie: "gen.".into(),
            ..Default::default()
        };
        assert_eq!(mask(&table, &criteria), vec![true, false]);
    }

    #[test]
    fn test_empty_table() {
        let criteria = FilterCriteria {
            query: "x".into(),
            tradeable: TradeableFilter::No,
            ..Default::default()
        };
        assert!(mask(&Table::default(), &criteria).is_empty());
    }

    #[test]
    fn test_visible_ids_follow_mask() {
        let table = kanto();
        let criteria = FilterCriteria {
            tradeable: TradeableFilter::No,
            ..Default::default()
        };
        assert_eq!(filtered_indices(&table, &criteria), vec![0]);
        assert_eq!(visible_ids(&table, &criteria), vec![table.records[0].id]);
    }

    #[test]
    fn test_tradeable_filter_parse() {
        assert_eq!("any".parse::<TradeableFilter>(), Ok(TradeableFilter::Any));
        assert_eq!("Oui".parse::<TradeableFilter>(), Ok(TradeableFilter::Yes));
        assert_eq!("NO".parse::<TradeableFilter>(), Ok(TradeableFilter::No));
        assert!("maybe".parse::<TradeableFilter>().is_err());
    }
}

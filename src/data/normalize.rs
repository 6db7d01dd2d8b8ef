use super::model::{CellValue, RawTable, Record, RecordId, Table, FIXED_COLUMNS};

/// Lowercased, trimmed text values that read as "tradeable".
pub const TRUTHY_TOKENS: [&str; 6] = ["1", "true", "vrai", "yes", "oui", "y"];

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

fn parse_number(cell: &CellValue) -> Option<f64> {
    let value = match cell {
        CellValue::Integer(i) => *i as f64,
        CellValue::Float(v) => *v,
        CellValue::Bool(b) => f64::from(u8::from(*b)),
        CellValue::String(s) => s.trim().parse::<f64>().ok()?,
        CellValue::Date(_) | CellValue::Null => return None,
    };
    value.is_finite().then_some(value)
}

/// Coerce a cell to a quantity: truncated, clamped at zero, `0` on failure.
pub fn parse_quantity(cell: &CellValue) -> u32 {
    match parse_number(cell) {
        // `as` saturates, so huge values cap at u32::MAX
        Some(v) if v > 0.0 => v.trunc() as u32,
        Some(_) => 0,
        None => {
            if !cell.is_null() {
                log::debug!("quantity {cell:?} is not a number, using 0");
            }
            0
        }
    }
}

/// Coerce a cell to a price: non-negative, `0.0` on failure.
pub fn parse_price(cell: &CellValue) -> f64 {
    match parse_number(cell) {
        Some(v) if v > 0.0 => v,
        Some(_) => 0.0,
        None => {
            if !cell.is_null() {
                log::debug!("price {cell:?} is not a number, using 0.0");
            }
            0.0
        }
    }
}

/// Coerce a cell to the tradeable flag.
///
/// Text is true only when its trimmed, lowercased value is one of
/// [`TRUTHY_TOKENS`]; numbers are true when non-zero; booleans pass through.
pub fn parse_tradeable(cell: &CellValue) -> bool {
    match cell {
        CellValue::String(s) => {
            let token = s.trim().to_lowercase();
            TRUTHY_TOKENS.contains(&token.as_str())
        }
        CellValue::Bool(b) => *b,
        CellValue::Integer(i) => *i != 0,
        CellValue::Float(v) => *v != 0.0 && !v.is_nan(),
        CellValue::Date(d) => !d.is_empty(),
        CellValue::Null => false,
    }
}

// ---------------------------------------------------------------------------
// Table normalization
// ---------------------------------------------------------------------------

static NULL: CellValue = CellValue::Null;

fn fixed_cell(row: &[CellValue], idx: Option<usize>) -> &CellValue {
    idx.and_then(|i| row.get(i)).unwrap_or(&NULL)
}

/// Turn arbitrary imported rows into a [`Table`] with the fixed schema.
///
/// Missing fixed columns are filled with defaults, typed columns are coerced
/// and every other column is kept, in its original relative order, as an
/// extra column. Never fails: malformed cells degrade to defaults.
pub fn normalize(raw: &RawTable) -> Table {
    let fixed_idx: Vec<Option<usize>> = FIXED_COLUMNS
        .iter()
        .map(|col| raw.column_index(col))
        .collect();

    let extra_idx: Vec<usize> = (0..raw.headers.len())
        .filter(|i| !FIXED_COLUMNS.contains(&raw.headers[*i].as_str()))
        .collect();
    let extra_columns: Vec<String> = extra_idx.iter().map(|&i| raw.headers[i].clone()).collect();

    let records = raw
        .rows
        .iter()
        .map(|row| {
            let cell = |slot: usize| fixed_cell(row, fixed_idx[slot]);
            let text = |slot: usize| cell(slot).to_string();

            Record {
                id: RecordId::new(),
                name: text(0),
                serie: text(1),
                collection: text(2),
                quantity: parse_quantity(cell(3)),
                state: text(4),
                tradeable: parse_tradeable(cell(5)),
                price: parse_price(cell(6)),
                tags: text(7),
                notes: text(8),
                image_url: text(9),
                extra: extra_idx
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(CellValue::Null))
                    .collect(),
            }
        })
        .collect();

    Table::new(extra_columns, records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn test_missing_columns_are_added_in_order() {
        let raw = RawTable::new(
            vec!["color".into(), "price".into(), "name".into()],
            vec![vec![s("red"), s("2.5"), s("Pikachu")]],
        );
        let table = normalize(&raw);

        let columns = table.columns();
        assert_eq!(&columns[..10], &FIXED_COLUMNS[..]);
        assert_eq!(&columns[10..], &["color"]);

        let rec = &table.records[0];
        assert_eq!(rec.name, "Pikachu");
        assert_eq!(rec.price, 2.5);
        assert_eq!(rec.quantity, 0);
        assert!(!rec.tradeable);
        assert_eq!(rec.serie, "");
        assert_eq!(rec.extra, vec![s("red")]);
    }

    #[test]
    fn test_extra_columns_keep_relative_order() {
        let raw = RawTable::new(
            vec!["zeta".into(), "name".into(), "alpha".into(), "quantity".into()],
            vec![vec![s("z"), s("n"), s("a"), CellValue::Integer(2)]],
        );
        let table = normalize(&raw);
        assert_eq!(table.extra_columns, vec!["zeta", "alpha"]);
        assert_eq!(table.records[0].extra, vec![s("z"), s("a")]);
    }

    #[test]
    fn test_quantity_coercion() {
        assert_eq!(parse_quantity(&s("abc")), 0);
        assert_eq!(parse_quantity(&s("3.7")), 3);
        assert_eq!(parse_quantity(&s(" 4 ")), 4);
        assert_eq!(parse_quantity(&CellValue::Float(2.9)), 2);
        assert_eq!(parse_quantity(&CellValue::Integer(-5)), 0);
        assert_eq!(parse_quantity(&CellValue::Float(f64::NAN)), 0);
        assert_eq!(parse_quantity(&CellValue::Null), 0);
    }

    #[test]
    fn test_price_coercion() {
        assert_eq!(parse_price(&s("abc")), 0.0);
        assert_eq!(parse_price(&s("7.5")), 7.5);
        assert_eq!(parse_price(&CellValue::Integer(12)), 12.0);
        assert_eq!(parse_price(&s("-1")), 0.0);
        assert_eq!(parse_price(&s("inf")), 0.0);
        assert_eq!(parse_price(&CellValue::Null), 0.0);
    }

    #[test]
    fn test_tradeable_tokens() {
        for yes in ["Oui", "VRAI", "1", "yes", " Y ", "true"] {
            assert!(parse_tradeable(&s(yes)), "{yes} should be truthy");
        }
        for no in ["non", "", "0", "false", "maybe"] {
            assert!(!parse_tradeable(&s(no)), "{no} should be falsy");
        }
        assert!(parse_tradeable(&CellValue::Bool(true)));
        assert!(!parse_tradeable(&CellValue::Bool(false)));
        assert!(parse_tradeable(&CellValue::Integer(2)));
        assert!(!parse_tradeable(&CellValue::Float(0.0)));
        assert!(!parse_tradeable(&CellValue::Null));
    }

    #[test]
    fn test_empty_input() {
        let table = normalize(&RawTable::default());
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 10);
    }

    #[test]
    fn test_every_subset_of_missing_columns() {
        fn present(col: &str) -> CellValue {
            match col {
                "quantity" => s("3"),
                "tradeable" => s("oui"),
                "price" => s("2.5"),
                other => s(&format!("v-{other}")),
            }
        }
        fn absent(col: &str) -> CellValue {
            match col {
                "quantity" => CellValue::Integer(0),
                "tradeable" => CellValue::Bool(false),
                "price" => CellValue::Float(0.0),
                _ => s(""),
            }
        }

        // Bit i set means FIXED_COLUMNS[i] is in the input.
        for bits in 0u32..(1 << FIXED_COLUMNS.len()) {
            let kept: Vec<&str> = FIXED_COLUMNS
                .iter()
                .enumerate()
                .filter(|(i, _)| bits & (1 << i) != 0)
                .map(|(_, c)| *c)
                .collect();
            let mut headers: Vec<String> = kept.iter().rev().map(|c| c.to_string()).collect();
            headers.push("origin".into());
            let mut row: Vec<CellValue> = kept.iter().rev().map(|c| present(c)).collect();
            row.push(s("Lyon"));

            let table = normalize(&RawTable::new(headers, vec![row]));
            let mut expected_columns = FIXED_COLUMNS.to_vec();
            expected_columns.push("origin");
            assert_eq!(table.columns(), expected_columns, "subset {bits:#012b}");

            let rec = &table.records[0];
            let expected: Vec<CellValue> = FIXED_COLUMNS
                .iter()
                .map(|c| match (c, kept.contains(c)) {
                    (&"quantity", true) => CellValue::Integer(3),
                    (&"tradeable", true) => CellValue::Bool(true),
                    (&"price", true) => CellValue::Float(2.5),
                    (c, true) => s(&format!("v-{c}")),
                    (c, false) => absent(c),
                })
                .collect();
            assert_eq!(rec.fixed_cells().to_vec(), expected, "subset {bits:#012b}");
            assert_eq!(rec.extra, vec![s("Lyon")]);
        }
    }

    #[test]
    fn test_text_columns_stringify_numbers() {
        let raw = RawTable::new(
            vec!["name".into(), "tags".into()],
            vec![vec![CellValue::Integer(151), CellValue::Null]],
        );
        let rec = &normalize(&raw).records[0];
        assert_eq!(rec.name, "151");
        assert_eq!(rec.tags, "");
    }
}

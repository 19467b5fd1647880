//! Percentage return from the start of the period.

use std::fmt;

use serde::Serialize;

use crate::table::{AlignedTable, Row};

/// Which values the table carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Raw closing price in BRL.
    #[default]
    Price,
    /// Cumulative percentage return since each column's first value.
    Return,
}

impl DisplayMode {
    pub fn caption(&self) -> &'static str {
        match self {
            DisplayMode::Price => "Preço de fechamento (R$)",
            DisplayMode::Return => {
                "Retorno percentual acumulado desde o início do período selecionado"
            }
        }
    }

    /// Applies the mode to a price table.
    pub fn apply(&self, table: &AlignedTable) -> AlignedTable {
        match self {
            DisplayMode::Price => table.clone(),
            DisplayMode::Return => percent_returns(table),
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Price => f.write_str("price"),
            DisplayMode::Return => f.write_str("return"),
        }
    }
}

/// Rebases every column to `(v / base - 1) * 100`, where `base` is the
/// column's first non-null value in date order. Nulls stay null.
///
/// A column whose base is zero has no defined return: all of its non-null
/// cells become NaN.
pub fn percent_returns(table: &AlignedTable) -> AlignedTable {
    let bases: Vec<Option<f64>> = (0..table.columns().len())
        .map(|idx| table.rows().iter().find_map(|r| r.values[idx]))
        .collect();

    for (column, base) in table.columns().iter().zip(&bases) {
        if *base == Some(0.0) {
            tracing::warn!("{}: first close is zero, returns are undefined", column);
        }
    }

    let rows = table
        .rows()
        .iter()
        .map(|row| Row {
            date: row.date,
            values: row
                .values
                .iter()
                .zip(&bases)
                .map(|(value, base)| match (value, base) {
                    (Some(v), Some(b)) => Some(pct_change(*v, *b)),
                    _ => None,
                })
                .collect(),
        })
        .collect();

    AlignedTable::from_parts(table.columns().to_vec(), rows)
}

fn pct_change(value: f64, base: f64) -> f64 {
    if base == 0.0 {
        f64::NAN
    } else {
        (value / base - 1.0) * 100.0
    }
}

//! Known settlement samples of a load case

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::loadcase::{Dimension, LoadCaseId};
use crate::table::{Cell, Table};

/// A coordinate with a known settlement value.
///
/// For [`Dimension::OneD`] sets only `x` (chainage) is meaningful and `y` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnownPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

impl KnownPoint {
    /// Sample on the chainage axis
    pub fn chainage(x: f64, value: f64) -> Self {
        Self { x, y: 0.0, value }
    }

    /// Sample on the (x, y) plane
    pub fn plan(x: f64, y: f64, value: f64) -> Self {
        Self { x, y, value }
    }

    /// Squared Euclidean distance to another point
    #[inline]
    pub fn dist_sq(&self, other_x: f64, other_y: f64) -> f64 {
        let dx = self.x - other_x;
        let dy = self.y - other_y;
        dx * dx + dy * dy
    }
}

/// Counters for table content that did not become a known point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipStats {
    /// Candidate points dropped because a coordinate or value was missing
    pub missing: usize,
    /// Rows skipped for being too short or holding text where a number belongs
    pub malformed: usize,
}

impl SkipStats {
    pub fn total(&self) -> usize {
        self.missing + self.malformed
    }
}

impl std::ops::AddAssign for SkipStats {
    fn add_assign(&mut self, other: Self) {
        self.missing += other.missing;
        self.malformed += other.malformed;
    }
}

/// Column positions of the known-point table.
///
/// One row per cross-section: a chainage column and, for 2D load cases, a
/// set of transverse offset columns. Settlement columns are given per load
/// case; in 2D they pair up with `y_cols` by position.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownPointLayout {
    pub x_col: usize,
    pub y_cols: Vec<usize>,
}

impl KnownPointLayout {
    pub fn new(x_col: usize, y_cols: Vec<usize>) -> Self {
        Self { x_col, y_cols }
    }

    /// Resolve a layout from header names
    pub fn from_headers(table: &Table, x: &str, ys: &[&str]) -> Result<Self> {
        let x_col = table.require_column(x)?;
        let y_cols = ys
            .iter()
            .map(|name| table.require_column(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { x_col, y_cols })
    }
}

/// Immutable, ordered set of known points for one load case
#[derive(Debug, Clone, PartialEq)]
pub struct KnownPointSet {
    load_case: LoadCaseId,
    dimension: Dimension,
    points: Vec<KnownPoint>,
    skipped: SkipStats,
}

impl KnownPointSet {
    pub fn new(load_case: impl Into<LoadCaseId>, dimension: Dimension, points: Vec<KnownPoint>) -> Self {
        Self {
            load_case: load_case.into(),
            dimension,
            points,
            skipped: SkipStats::default(),
        }
    }

    /// Extract the known points of one load case from a table.
    ///
    /// 1D load cases read the first of `value_cols`; 2D load cases read one
    /// point per (`y_col`, `value_col`) pair. Missing cells drop the candidate
    /// point, malformed rows are skipped whole. Both are counted in
    /// [`KnownPointSet::skipped`].
    ///
    /// # Errors
    /// [`Error::InsufficientPoints`] if nothing usable remains,
    /// [`Error::InvalidParameter`] if the value columns don't fit the layout.
    pub fn from_table(
        load_case: impl Into<LoadCaseId>,
        dimension: Dimension,
        table: &Table,
        layout: &KnownPointLayout,
        value_cols: &[usize],
    ) -> Result<Self> {
        let load_case = load_case.into();

        if value_cols.is_empty() {
            return Err(Error::InvalidParameter {
                name: "value_cols",
                value: "[]".into(),
                reason: format!("load case {} has no settlement columns", load_case),
            });
        }
        if dimension == Dimension::TwoD && value_cols.len() > layout.y_cols.len() {
            return Err(Error::InvalidParameter {
                name: "value_cols",
                value: value_cols.len().to_string(),
                reason: format!(
                    "load case {} has more settlement columns than offset columns ({})",
                    load_case,
                    layout.y_cols.len()
                ),
            });
        }

        let mut points = Vec::new();
        let mut skipped = SkipStats::default();

        for row in table.rows() {
            if row.iter().all(Cell::is_missing) {
                continue;
            }

            let pairs: Vec<(Option<usize>, usize)> = match dimension {
                Dimension::OneD => vec![(None, value_cols[0])],
                Dimension::TwoD => layout
                    .y_cols
                    .iter()
                    .zip(value_cols)
                    .map(|(&y, &z)| (Some(y), z))
                    .collect(),
            };

            let needed = pairs
                .iter()
                .flat_map(|&(y, z)| y.into_iter().chain(std::iter::once(z)))
                .chain(std::iter::once(layout.x_col))
                .max()
                .unwrap_or(layout.x_col);
            if row.len() <= needed {
                skipped.malformed += 1;
                continue;
            }

            let is_text = |col: usize| matches!(row[col], Cell::Text(_));
            if is_text(layout.x_col)
                || pairs
                    .iter()
                    .any(|&(y, z)| is_text(z) || y.is_some_and(is_text))
            {
                skipped.malformed += 1;
                continue;
            }

            let Some(x) = row[layout.x_col].as_f64() else {
                skipped.missing += 1;
                continue;
            };

            for (y_col, z_col) in pairs {
                let z = row[z_col].as_f64();
                match y_col {
                    None => match z {
                        Some(z) => points.push(KnownPoint::chainage(x, z)),
                        None => skipped.missing += 1,
                    },
                    Some(y_col) => match (row[y_col].as_f64(), z) {
                        (Some(y), Some(z)) => points.push(KnownPoint::plan(x, y, z)),
                        // Unused offset slot of a short section
                        (None, None) => {}
                        _ => skipped.missing += 1,
                    },
                }
            }
        }

        if points.is_empty() {
            return Err(Error::InsufficientPoints {
                required: 1,
                actual: 0,
                context: format!("known points of load case {}", load_case),
            });
        }

        Ok(Self {
            load_case,
            dimension,
            points,
            skipped,
        })
    }

    /// Expand the set with every point reflected about the centerline (`y → -y`).
    ///
    /// Only meaningful for 2D sets; a 1D set is returned unchanged.
    pub fn mirrored(&self) -> Self {
        let mut out = self.clone();
        if self.dimension == Dimension::TwoD {
            out.points.extend(
                self.points
                    .iter()
                    .map(|p| KnownPoint::plan(p.x, -p.y, p.value)),
            );
        }
        out
    }

    pub fn load_case(&self) -> &LoadCaseId {
        &self.load_case
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn points(&self) -> &[KnownPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn skipped(&self) -> SkipStats {
        self.skipped
    }
}

//! Response builders for the chart and table endpoints

use common::{SeriesSet, WideTable};

use crate::align::align;

/// Chart payload: each identifier mapped to its own points, unaligned
pub fn build_chart(series: SeriesSet) -> SeriesSet {
    series
}

/// Table payload: the aligned wide table
pub fn build_table(series: &SeriesSet) -> WideTable {
    align(series)
}

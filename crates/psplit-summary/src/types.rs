/// Tunables of the clipboard summary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Amounts within this distance of a cluster's smallest amount join it.
    pub tolerance: i64,
    /// Exclusive upper bound of a single displayed price (currency stack limit).
    pub price_ceiling: i64,
    /// Member names printed per line under each price line.
    pub names_per_line: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            tolerance: 100,
            price_ceiling: 5_000_000,
            names_per_line: 4,
        }
    }
}

/// Members paid (approximately) the same amount.
///
/// `amount` is the median member's actual amount, so it always occurs in the data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayoutCluster {
    pub amount: i64,
    /// Display names (`name` or `name(note)`) in roster order.
    pub names: Vec<String>,
}

/// `price × count = product` presentation of one amount.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PriceSplit {
    pub price: i64,
    pub count: i64,
    pub product: i64,
}

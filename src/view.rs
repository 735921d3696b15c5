//! Sort + paginate view state for the market table
//!
//! [`ViewState`] owns the fetched records immutably and derives an index
//! permutation for the active sort, so the source order is never mutated
//! and concurrent readers of the record set cannot observe a half-sorted
//! slice. Pagination is a clamped window over the permuted order.

use crate::types::{CoinRecord, SortDirection, SortKey};
use std::cmp::Ordering;
use std::ops::Range;

/// Column headers in display order
const COLUMN_TITLES: [&str; 10] = [
    "Rank",
    "Name",
    "Symbol",
    "Price (USD)",
    "1h",
    "24h",
    "7d",
    "Market Cap",
    "Volume (24h)",
    "Total Supply",
];

/// Pagination + sort context driving what the table displays
pub struct ViewState {
    records: Vec<CoinRecord>,
    /// Permutation of `records` indices in display order
    order: Vec<usize>,
    /// 1-based page number
    page: usize,
    per_page: usize,
    sort_key: SortKey,
    direction: SortDirection,
}

impl ViewState {
    /// Creates a view over `records`, ordered as fetched (rank ascending)
    pub fn new(records: Vec<CoinRecord>, per_page: usize) -> Self {
        let order = (0..records.len()).collect();
        Self {
            records,
            order,
            page: 1,
            per_page,
            sort_key: SortKey::Rank,
            direction: SortDirection::Ascending,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Activates `key`, flipping direction when it is already active and
    /// resetting to ascending otherwise, then reorders the view.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.flip();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Ascending;
        }
        self.reorder();
    }

    /// Advances one page if the current page's end is still within bounds
    pub fn next_page(&mut self) {
        if self.page * self.per_page < self.records.len() {
            self.page += 1;
        }
    }

    /// Retreats one page unless already on page 1
    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// The clamped window `[(page-1)*per_page, page*per_page)` over the order
    pub fn window(&self) -> Range<usize> {
        let len = self.records.len();
        let start = ((self.page - 1) * self.per_page).min(len);
        let end = (self.page * self.per_page).min(len);
        start..end
    }

    /// Visible rows with their display rank (continuing across pages)
    pub fn visible(&self) -> Vec<(usize, &CoinRecord)> {
        self.window()
            .map(|pos| (pos + 1, &self.records[self.order[pos]]))
            .collect()
    }

    /// Column headers with the active sort column marked by a direction arrow
    pub fn column_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = COLUMN_TITLES.iter().map(|t| t.to_string()).collect();
        titles[column_of(self.sort_key)].push_str(self.direction.arrow());
        titles
    }

    /// Recomputes the permutation with a stable sort by the active key
    fn reorder(&mut self) {
        let records = &self.records;
        let key = self.sort_key;
        self.order = (0..records.len()).collect();
        self.order
            .sort_by(|&a, &b| compare(key, &records[a], &records[b]));
        if self.direction == SortDirection::Descending {
            self.order.reverse();
        }
    }
}

/// Column index carrying the sort marker for each key.
/// Symbol (column 2) has no sort key.
fn column_of(key: SortKey) -> usize {
    match key {
        SortKey::Rank => 0,
        SortKey::Name => 1,
        SortKey::Price => 3,
        SortKey::Change1h => 4,
        SortKey::Change24h => 5,
        SortKey::Change7d => 6,
        SortKey::MarketCap => 7,
        SortKey::Volume => 8,
        SortKey::TotalSupply => 9,
    }
}

/// Ascending comparator for one sort key.
///
/// Rank is a market-cap-derived ordering, not a stored field, so Rank and
/// MarketCap share a comparator. Name deliberately compares only the first
/// byte of the lowercased name - parity with the long-standing behavior of
/// the original comparator, kept so existing orderings stay reproducible.
fn compare(key: SortKey, a: &CoinRecord, b: &CoinRecord) -> Ordering {
    match key {
        SortKey::Rank | SortKey::MarketCap => a.market_cap.total_cmp(&b.market_cap),
        SortKey::Name => first_byte(&a.name).cmp(&first_byte(&b.name)),
        SortKey::Price => a.price_usd.total_cmp(&b.price_usd),
        SortKey::Change1h => a.change_1h.total_cmp(&b.change_1h),
        SortKey::Change24h => a.change_24h.total_cmp(&b.change_24h),
        SortKey::Change7d => a.change_7d.total_cmp(&b.change_7d),
        SortKey::Volume => a.volume_24h.total_cmp(&b.volume_24h),
        SortKey::TotalSupply => a.total_supply.total_cmp(&b.total_supply),
    }
}

fn first_byte(name: &str) -> u8 {
    name.to_lowercase().bytes().next().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, market_cap: f64) -> CoinRecord {
        CoinRecord {
            id: name.to_lowercase(),
            name: name.to_string(),
            symbol: name[..1].to_lowercase(),
            price_usd: market_cap / 10.0,
            change_1h: 0.0,
            change_24h: 0.0,
            change_7d: 0.0,
            market_cap,
            volume_24h: market_cap / 100.0,
            total_supply: 1000.0,
        }
    }

    fn many(n: usize) -> Vec<CoinRecord> {
        (0..n)
            .map(|i| record(&format!("Coin{}", i), (n - i) as f64))
            .collect()
    }

    fn visible_caps(view: &ViewState) -> Vec<f64> {
        view.visible().iter().map(|(_, r)| r.market_cap).collect()
    }

    #[test]
    fn market_cap_sort_orders_both_directions() {
        let mut view = ViewState::new(
            vec![record("A", 5.0), record("B", 1.0), record("C", 3.0)],
            50,
        );

        view.toggle_sort(SortKey::MarketCap);
        assert_eq!(visible_caps(&view), vec![1.0, 3.0, 5.0]);

        view.toggle_sort(SortKey::MarketCap);
        assert_eq!(visible_caps(&view), vec![5.0, 3.0, 1.0]);
    }

    #[test]
    fn rank_sorts_by_market_cap() {
        let mut view = ViewState::new(
            vec![record("A", 5.0), record("B", 1.0), record("C", 3.0)],
            50,
        );

        view.toggle_sort(SortKey::Rank);
        assert_eq!(visible_caps(&view), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn toggling_twice_restores_direction() {
        let mut view = ViewState::new(many(10), 50);

        view.toggle_sort(SortKey::Price);
        let ascending = visible_caps(&view);
        view.toggle_sort(SortKey::Price);
        view.toggle_sort(SortKey::Price);

        assert_eq!(view.direction(), SortDirection::Ascending);
        assert_eq!(visible_caps(&view), ascending);
    }

    #[test]
    fn switching_keys_resets_to_ascending() {
        let mut view = ViewState::new(many(10), 50);

        view.toggle_sort(SortKey::Price);
        view.toggle_sort(SortKey::Price);
        assert_eq!(view.direction(), SortDirection::Descending);

        view.toggle_sort(SortKey::Volume);
        assert_eq!(view.sort_key(), SortKey::Volume);
        assert_eq!(view.direction(), SortDirection::Ascending);
    }

    #[test]
    fn name_sort_compares_first_character_only() {
        let mut view = ViewState::new(
            vec![
                record("banana", 1.0),
                record("Apple", 2.0),
                record("aardvark", 3.0),
            ],
            50,
        );

        view.toggle_sort(SortKey::Name);
        let names: Vec<&str> = view.visible().iter().map(|(_, r)| r.name.as_str()).collect();

        // "Apple" and "aardvark" tie on first char; the stable sort keeps
        // their relative input order.
        assert_eq!(names, vec!["Apple", "aardvark", "banana"]);
    }

    #[test]
    fn pagination_clamps_the_last_window() {
        let mut view = ViewState::new(many(120), 50);

        view.next_page();
        view.next_page();
        assert_eq!(view.page(), 3);
        assert_eq!(view.window(), 100..120);
        assert_eq!(view.visible().len(), 20);
    }

    #[test]
    fn next_past_the_last_page_is_a_no_op() {
        let mut view = ViewState::new(many(120), 50);

        view.next_page();
        view.next_page();
        view.next_page();
        assert_eq!(view.page(), 3);
    }

    #[test]
    fn prev_below_page_one_is_a_no_op() {
        let mut view = ViewState::new(many(120), 50);

        view.prev_page();
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn exact_multiple_has_no_empty_trailing_page() {
        let mut view = ViewState::new(many(100), 50);

        view.next_page();
        assert_eq!(view.page(), 2);
        view.next_page();
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn empty_record_set_yields_empty_window() {
        let mut view = ViewState::new(Vec::new(), 50);

        assert_eq!(view.window(), 0..0);
        view.next_page();
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn display_ranks_continue_across_pages() {
        let mut view = ViewState::new(many(120), 50);

        view.next_page();
        let ranks: Vec<usize> = view.visible().iter().map(|(rank, _)| *rank).collect();
        assert_eq!(ranks.first(), Some(&51));
        assert_eq!(ranks.last(), Some(&100));
    }

    #[test]
    fn active_column_carries_the_sort_arrow() {
        let mut view = ViewState::new(many(5), 50);

        view.toggle_sort(SortKey::Volume);
        let titles = view.column_titles();
        assert_eq!(titles[8], "Volume (24h) ↑");
        assert!(titles
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 8)
            .all(|(_, t)| !t.contains('↑') && !t.contains('↓')));

        view.toggle_sort(SortKey::Volume);
        assert_eq!(view.column_titles()[8], "Volume (24h) ↓");
    }

    #[test]
    fn every_sort_key_decorates_exactly_one_column() {
        let mut view = ViewState::new(many(5), 50);

        for &key in SortKey::all() {
            view.toggle_sort(key);
            let arrows = view
                .column_titles()
                .iter()
                .filter(|t| t.contains('↑') || t.contains('↓'))
                .count();
            assert_eq!(arrows, 1, "key {:?}", key);
        }
    }

    #[test]
    fn initial_view_marks_rank_ascending() {
        let view = ViewState::new(many(5), 50);
        assert_eq!(view.column_titles()[0], "Rank ↑");
    }
}

use iter_num_tools::lin_space;
use more_asserts::assert_ge;

/**
 * Dense lookup table over a closed query domain. Entries are precomputed at
 * uniformly spaced queries; `lookup` then maps a query to the nearest-below
 * entry with `floor(alpha * (N - 1))`, clamped at both ends, so the domain
 * endpoints land exactly on the first and last entries.
 */
pub struct LookupTable<T> {
    table_entries: Vec<T>,
    query_offset: f32,
    query_to_index_scale: f32,
}

impl<T> LookupTable<T> {
    pub fn new<F>(query_domain: [f32; 2], entry_count: usize, query_to_data: F) -> LookupTable<T>
    where
        F: Fn(f32) -> T,
    {
        assert_ge!(query_domain[1], query_domain[0]);

        let table_entries: Vec<T> = lin_space(query_domain[0]..=query_domain[1], entry_count)
            .map(query_to_data)
            .collect();

        let query_to_index_scale = if entry_count > 1 {
            ((entry_count - 1) as f32) / (query_domain[1] - query_domain[0])
        } else {
            0.0
        };

        LookupTable {
            table_entries,
            query_offset: query_domain[0],
            query_to_index_scale,
        }
    }

    pub fn len(&self) -> usize {
        self.table_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table_entries.is_empty()
    }

    /// Nearest-below entry for `query`. Queries outside the domain clamp to
    /// the first/last entry. Must not be called on an empty table.
    pub fn lookup(&self, query: f32) -> &T {
        let index_upper_bound = (self.table_entries.len() - 1) as f32;
        let index = ((query - self.query_offset) * self.query_to_index_scale)
            .clamp(0.0, index_upper_bound) as usize;
        &self.table_entries[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_endpoints_map_to_first_and_last_entries() {
        let table = LookupTable::new([0.0, 1.0], 512, |query| query);
        assert_eq!(table.len(), 512);
        assert_eq!(*table.lookup(0.0), 0.0);
        assert_eq!(*table.lookup(1.0), 1.0);
    }

    #[test]
    fn test_lookup_clamps_out_of_domain_queries() {
        let table = LookupTable::new([0.0, 1.0], 16, |query| (query * 100.0) as i32);
        assert_eq!(*table.lookup(-2.5), 0);
        assert_eq!(*table.lookup(3.0), 100);
    }

    #[test]
    fn test_index_mapping_uses_entry_count_minus_one() {
        // With 5 entries over [0,1] the scale is 4, so query 0.5 floors to
        // index 2, the middle entry.
        let table = LookupTable::new([0.0, 1.0], 5, |query| query);
        assert_eq!(*table.lookup(0.5), 0.5);
        assert_eq!(*table.lookup(0.49), 0.25);
    }

    #[test]
    fn test_non_finite_query_does_not_panic() {
        let table = LookupTable::new([0.0, 1.0], 8, |query| query);
        // NaN fails both clamp comparisons and casts to index zero.
        assert_eq!(*table.lookup(f32::NAN), 0.0);
        assert_eq!(*table.lookup(f32::INFINITY), 1.0);
    }
}

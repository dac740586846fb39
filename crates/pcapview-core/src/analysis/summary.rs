use std::collections::{BTreeMap, HashMap};

use crate::{AddressCount, CaptureSummary, FrameRecord};

const UNKNOWN_LABEL: &str = "Unknown";

/// Frequency table that remembers first-seen order for tie breaking.
#[derive(Debug, Default)]
pub(crate) struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    pub(crate) fn add(&mut self, key: &str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), 1));
            }
        }
    }

    /// The `n` most frequent keys; equal counts keep insertion order.
    pub(crate) fn top(&self, n: usize) -> Vec<AddressCount> {
        let mut ranked: Vec<&(String, u64)> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(n)
            .map(|(address, count)| AddressCount {
                address: address.clone(),
                count: *count,
            })
            .collect()
    }
}

fn label_or_unknown(value: &str) -> &str {
    if value.is_empty() { UNKNOWN_LABEL } else { value }
}

/// Fold decoded records into protocol and address statistics.
///
/// # Examples
/// ```
/// use pcapview_core::summarize;
///
/// let summary = summarize(&[], 3);
/// assert_eq!(summary.total_packets, 0);
/// assert!(summary.top_sources.is_empty());
/// ```
pub fn summarize(records: &[FrameRecord], top_n: usize) -> CaptureSummary {
    let mut protocols: BTreeMap<String, u64> = BTreeMap::new();
    let mut sources = FrequencyTable::default();
    let mut destinations = FrequencyTable::default();
    let mut total_bytes = 0u64;

    for record in records {
        *protocols.entry(record.protocol.to_string()).or_default() += 1;
        sources.add(label_or_unknown(&record.source));
        destinations.add(label_or_unknown(&record.destination));
        total_bytes += record.length as u64;
    }

    CaptureSummary {
        total_packets: records.len() as u64,
        total_bytes,
        protocols,
        top_sources: sources.top(top_n),
        top_destinations: destinations.top(top_n),
    }
}

#[cfg(test)]
mod tests {
    use super::{FrequencyTable, summarize};
    use crate::decode_frame;

    fn frame(src_last: u8, dst_last: u8, ether_type: u16, extra: usize) -> Vec<u8> {
        let mut frame = vec![0x02, 0, 0, 0, 0, dst_last, 0x02, 0, 0, 0, 0, src_last];
        frame.extend_from_slice(&ether_type.to_be_bytes());
        frame.extend(std::iter::repeat_n(0u8, extra));
        frame
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let mut table = FrequencyTable::default();
        for key in ["b", "a", "c", "a", "b", "d"] {
            table.add(key);
        }
        let top: Vec<_> = table
            .top(3)
            .into_iter()
            .map(|entry| (entry.address, entry.count))
            .collect();
        assert_eq!(
            top,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn totals_and_protocol_counts() {
        let records: Vec<_> = [
            frame(1, 9, 0x0806, 28),
            frame(1, 9, 0x86dd, 40),
            frame(2, 9, 0x0806, 28),
        ]
        .iter()
        .filter_map(|bytes| decode_frame(bytes, 0, 0))
        .collect();

        let summary = summarize(&records, 3);
        assert_eq!(summary.total_packets, 3);
        assert_eq!(summary.total_bytes, 42 + 54 + 42);
        assert_eq!(summary.protocols.get("ARP"), Some(&2));
        assert_eq!(summary.protocols.get("IPv6"), Some(&1));
        assert_eq!(summary.top_sources[0].address, "02:00:00:00:00:01");
        assert_eq!(summary.top_sources[0].count, 2);
        assert_eq!(summary.top_destinations.len(), 1);
        assert_eq!(summary.top_destinations[0].count, 3);
    }

    #[test]
    fn top_lists_are_bounded_and_sorted() {
        let records: Vec<_> = (1..=8u8)
            .flat_map(|src| std::iter::repeat_n(src, src as usize))
            .filter_map(|src| decode_frame(&frame(src, 0xff, 0x0806, 28), 0, 0))
            .collect();

        for n in [0, 1, 3, 5, 20] {
            let summary = summarize(&records, n);
            assert!(summary.top_sources.len() <= n);
            assert!(
                summary
                    .top_sources
                    .windows(2)
                    .all(|pair| pair[0].count >= pair[1].count)
            );
        }
        let summary = summarize(&records, 3);
        assert_eq!(summary.top_sources[0].address, "02:00:00:00:00:08");
        assert_eq!(summary.top_sources[0].count, 8);
    }

    #[test]
    fn empty_addresses_count_as_unknown() {
        let mut record = decode_frame(&frame(1, 2, 0x0806, 28), 0, 0).unwrap();
        record.source.clear();
        let summary = summarize(&[record], 3);
        assert_eq!(summary.top_sources[0].address, "Unknown");
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let summary = summarize(&[], 5);
        assert_eq!(summary.total_packets, 0);
        assert_eq!(summary.total_bytes, 0);
        assert!(summary.protocols.is_empty());
        assert!(summary.top_sources.is_empty());
        assert!(summary.top_destinations.is_empty());
    }
}

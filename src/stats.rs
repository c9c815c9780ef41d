use crate::options::{GenerateOptions, LayoutMode};
use crate::types::PageRef;

/// Statistics about one planned job, derived from the padding rules
/// without materializing the spread sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobStatistics {
    /// Logical pages before padding
    pub source_pages: usize,
    /// Synthetic blanks the planner will append (including the cover
    /// offset blank for two-up)
    pub blank_pages_added: usize,
    /// Output pages (one per spread)
    pub spreads: usize,
    /// Physical sheets: one per spread for two-up, one per two spreads
    /// (front and back) for booklets
    pub sheets: usize,
}

/// Calculate statistics for the given page sequence and options.
pub fn calculate_statistics(pages: &[PageRef], options: &GenerateOptions) -> JobStatistics {
    let source_pages = pages.len();

    match options.layout_mode {
        LayoutMode::Booklet => {
            let padded = source_pages.div_ceil(4) * 4;
            JobStatistics {
                source_pages,
                blank_pages_added: padded - source_pages,
                spreads: padded / 2,
                sheets: padded / 4,
            }
        }
        LayoutMode::TwoUp => {
            let with_cover = source_pages + usize::from(options.cover_preview);
            let padded = with_cover + with_cover % 2;
            JobStatistics {
                source_pages,
                blank_pages_added: padded - source_pages,
                spreads: padded / 2,
                sheets: padded / 2,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan_spreads;

    fn pages(count: usize) -> Vec<PageRef> {
        (0..count)
            .map(|index| PageRef {
                item_index: Some(index),
                page_index: None,
                is_blank: false,
            })
            .collect()
    }

    #[test]
    fn booklet_stats_count_sheets_and_padding() {
        let stats = calculate_statistics(&pages(5), &GenerateOptions::default());
        assert_eq!(stats.source_pages, 5);
        assert_eq!(stats.blank_pages_added, 3);
        assert_eq!(stats.spreads, 4);
        assert_eq!(stats.sheets, 2);
    }

    #[test]
    fn stats_agree_with_the_planner() {
        for count in 0..13 {
            for layout_mode in [LayoutMode::Booklet, LayoutMode::TwoUp] {
                for cover_preview in [false, true] {
                    let options = GenerateOptions {
                        layout_mode,
                        cover_preview,
                        ..GenerateOptions::default()
                    };
                    let input = pages(count);
                    let stats = calculate_statistics(&input, &options);
                    assert_eq!(
                        stats.spreads,
                        plan_spreads(&input, &options).len(),
                        "count {count}, mode {layout_mode:?}, cover {cover_preview}"
                    );
                }
            }
        }
    }

    #[test]
    fn two_up_cover_counts_as_an_added_blank() {
        let options = GenerateOptions {
            layout_mode: LayoutMode::TwoUp,
            cover_preview: true,
            ..GenerateOptions::default()
        };
        let stats = calculate_statistics(&pages(3), &options);
        assert_eq!(stats.blank_pages_added, 1);
        assert_eq!(stats.spreads, 2);
    }
}

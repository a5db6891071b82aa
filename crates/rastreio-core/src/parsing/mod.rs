pub mod block;
pub mod normalize;
pub mod plate;
pub mod segment;

use crate::extraction::PageContent;
use crate::model::Record;
use block::parse_block;
use segment::segment_page;

/// Parse every page of a source into its kept records.
///
/// Blocks are segmented per page, so a record split across a page break is
/// lost. Records without both coordinates are dropped. Page order and
/// in-page order are preserved.
pub fn collect_records(pages: &[PageContent]) -> Vec<Record> {
    let mut records = Vec::new();

    for page in pages {
        let blocks = segment_page(page.lines.as_slice());
        let mut kept = 0;
        for block in &blocks {
            match parse_block(block) {
                Ok(record) if record.has_coordinates() => {
                    records.push(record);
                    kept += 1;
                }
                Ok(_) => {
                    tracing::trace!(page = page.page_number, "block without coordinates dropped");
                }
                Err(rejection) => {
                    tracing::trace!(page = page.page_number, ?rejection, "block rejected");
                }
            }
        }
        tracing::debug!(
            page = page.page_number,
            blocks = blocks.len(),
            kept,
            "segmented page"
        );
    }

    records
}

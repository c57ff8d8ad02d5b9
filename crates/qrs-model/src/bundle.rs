use crate::Table;

/// Sheet that collects every statistics block of one intermediate workbook.
pub const SUMMARY_SHEET: &str = "所有统计汇总";

/// Block titles of the intermediate summary sheet, in write order.
pub const BLOCK_PRIMARY: &str = "【统计一：药品类别一】";
pub const BLOCK_COARSE: &str = "【统计二：粗分类】";
pub const BLOCK_FINE: &str = "【统计三：细分类】";
pub const BLOCK_DISEASE: &str = "【统计四：疾病领域】";
pub const BLOCK_TARGET_SUMMARY: &str = "【统计五：靶点 Top10 + Others】";
pub const BLOCK_TARGET_DETAIL: &str = "【统计六：靶点全量明细】";

/// Block titles appended below each sheet of the final aligned workbook.
pub const EXPORT_COARSE: &str = "【粗分类统计】";
pub const EXPORT_DISEASE: &str = "【疾病领域统计】";
pub const EXPORT_TARGET: &str = "【靶点统计】";

/// The statistics computed for one source's classified table.
///
/// `None` means the block was not computed (its source column was absent or
/// the pipeline did not request it); a present empty table means it was
/// computed and nothing qualified. The two cases write differently: absent
/// and empty blocks are both skipped by the sheet writer, but an empty block
/// still counts as computed for reporting.
#[derive(Debug, Clone, Default)]
pub struct StatsBundle {
    pub primary: Option<Table>,
    pub coarse: Option<Table>,
    pub fine: Option<Table>,
    pub disease: Option<Table>,
    pub target_summary: Option<Table>,
    pub target_detail: Option<Table>,
    /// Rows dropped from the target statistic because target and both
    /// category columns were blank.
    pub target_excluded_rows: usize,
}

impl StatsBundle {
    /// All six blocks with their intermediate-sheet titles, in write order.
    pub fn summary_blocks(&self) -> [(&'static str, Option<&Table>); 6] {
        [
            (BLOCK_PRIMARY, self.primary.as_ref()),
            (BLOCK_COARSE, self.coarse.as_ref()),
            (BLOCK_FINE, self.fine.as_ref()),
            (BLOCK_DISEASE, self.disease.as_ref()),
            (BLOCK_TARGET_SUMMARY, self.target_summary.as_ref()),
            (BLOCK_TARGET_DETAIL, self.target_detail.as_ref()),
        ]
    }

    /// The subset appended beneath each data block of the final workbook.
    pub fn export_blocks(&self) -> [(&'static str, Option<&Table>); 3] {
        [
            (EXPORT_COARSE, self.coarse.as_ref()),
            (EXPORT_DISEASE, self.disease.as_ref()),
            (EXPORT_TARGET, self.target_summary.as_ref()),
        ]
    }

    /// Number of computed, non-empty blocks.
    pub fn block_count(&self) -> usize {
        self.summary_blocks()
            .iter()
            .filter(|(_, table)| table.is_some_and(|table| !table.is_empty()))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.block_count() == 0
    }
}

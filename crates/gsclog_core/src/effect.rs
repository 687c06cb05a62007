use crate::FilterPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartImport { policy: FilterPolicy },
    CancelImport,
    AutoSizeColumns,
    OpenInEditor {
        module: String,
        line: u32,
        column: u32,
    },
}

use crate::encode_index::EncodeLayout;

/// Settings for a table generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableConfig {
    /// Layout of the encode gather for the last two fields.
    pub encode_layout: EncodeLayout,
    /// Compute entries on the rayon pool. Ignored unless the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            encode_layout: EncodeLayout::SplitStore,
            parallel: true,
        }
    }
}

impl TableConfig {
    pub fn with_encode_layout(mut self, layout: EncodeLayout) -> Self {
        self.encode_layout = layout;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// True if this run will actually fan out.
    pub fn runs_parallel(&self) -> bool {
        cfg!(feature = "parallel") && self.parallel
    }
}

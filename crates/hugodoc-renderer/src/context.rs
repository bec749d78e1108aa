//! Per-page rendering context.

use crate::error::RenderError;

/// Flags that change how inline and list content is written.
///
/// A value is owned by one page render. The writer replaces it when entering
/// a code block or table cell and puts the previous value back on exit,
/// whether or not the nested render succeeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderContext {
    in_code_block: bool,
    in_table_cell: bool,
}

impl RenderContext {
    #[must_use]
    pub fn in_code_block(self) -> bool {
        self.in_code_block
    }

    #[must_use]
    pub fn in_table_cell(self) -> bool {
        self.in_table_cell
    }

    /// Context for the body of a code block or code span.
    #[must_use]
    pub(crate) fn code_block(self) -> Self {
        Self {
            in_code_block: true,
            ..self
        }
    }

    /// Context for the body of a table cell.
    #[must_use]
    pub(crate) fn table_cell(self) -> Self {
        Self {
            in_table_cell: true,
            ..self
        }
    }

    /// Fails unless the context is back at its initial state.
    pub(crate) fn ensure_restored(self) -> Result<(), RenderError> {
        if self == Self::default() {
            Ok(())
        } else {
            Err(RenderError::ContextLeak {
                in_code_block: self.in_code_block,
                in_table_cell: self.in_table_cell,
            })
        }
    }
}

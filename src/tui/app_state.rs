use crate::selection::NodeId;

/// One line of the tree view. Rows are kept in pre-order, so row order is
/// also export order.
#[derive(Debug, Clone)]
pub(super) struct Row {
    pub id: NodeId,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Last message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

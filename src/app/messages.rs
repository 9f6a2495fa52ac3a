//! AppMessage enum for async communication within the application.

use crate::models::UsageList;

/// Messages received from background tasks.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A poll cycle succeeded; replace the displayed list.
    UsagesUpdated {
        /// Issue order of the request that produced this list
        seq: u64,
        list: UsageList,
    },
}

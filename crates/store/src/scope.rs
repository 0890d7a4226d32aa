//! Installation scope for stored data.

use common::{AppId, PlatformApiUrl};
use serde::{Deserialize, Serialize};

/// Identifies one app installation on one platform instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordScope {
    pub platform_api_url: PlatformApiUrl,
    pub app_id: AppId,
}

impl RecordScope {
    pub fn new(platform_api_url: PlatformApiUrl, app_id: AppId) -> Self {
        Self {
            platform_api_url,
            app_id,
        }
    }
}

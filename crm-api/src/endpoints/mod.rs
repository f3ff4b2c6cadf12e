pub mod agent_settings;
pub mod companies;
pub mod contacts;
pub mod conversations;
pub mod health;
pub mod meetings;
pub mod products;
pub mod projects;
pub mod sales_flows;
pub mod users;

use serde::{Deserialize, Serialize};

/// Pagination for list endpoints. `page_id` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page_id: u32,
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page_id: 1,
            page_size: 10,
        }
    }
}

impl PageQuery {
    pub fn new(page_id: u32, page_size: u32) -> Self {
        Self { page_id, page_size }
    }
}

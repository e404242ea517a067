pub mod incidents;
pub mod maintenances;
pub mod status;

use crate::core::settings::Settings;
use anyhow::Result;

pub fn resolve_page_id(flag: Option<String>, settings: &Settings) -> Result<String> {
    flag.or_else(|| settings.page.id.clone()).ok_or_else(|| {
        anyhow::anyhow!("No page id given. Pass --page or set page.id in the config file.")
    })
}

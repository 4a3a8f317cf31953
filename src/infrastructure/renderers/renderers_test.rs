use anyhow::Result;

use super::RendererManager;
use crate::domain::models::RendererName;

#[test]
fn it_builds_every_renderer() -> Result<()> {
    assert_eq!(
        RendererManager::get(RendererName::Terminal)?.name(),
        RendererName::Terminal
    );
    assert_eq!(
        RendererManager::get(RendererName::Headless)?.name(),
        RendererName::Headless
    );

    return Ok(());
}
